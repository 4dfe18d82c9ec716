//! Quote (cotação) types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cotafrete_types::ValidationError;

use crate::service::quote_calculator::percent_of_invoice;

/// Header fields of one freight quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteHeader {
    pub date: NaiveDate,
    pub supplier: String,
    pub order_number: Option<String>,
    /// Invoice (NF) value the freight is compared against
    pub invoice_value: f64,
    pub weight_kg: Option<f64>,
    pub volume_count: Option<i64>,
    pub cubage_m3: Option<f64>,
    pub winner_carrier_id: Option<i64>,
}

impl QuoteHeader {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.supplier.trim().is_empty() {
            return Err(ValidationError::MissingSupplier);
        }
        if self.invoice_value <= 0.0 {
            return Err(ValidationError::InvalidInvoiceValue(self.invoice_value));
        }
        Ok(())
    }
}

/// One per-carrier freight value to persist with a quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateInput {
    pub carrier_id: i64,
    pub freight_value: f64,
    pub selected: bool,
}

/// Candidate rows must be non-empty and strictly positive before any write
pub fn validate_candidates(candidates: &[CandidateInput]) -> Result<(), ValidationError> {
    if candidates.is_empty() {
        return Err(ValidationError::NoCandidates);
    }
    for candidate in candidates {
        if candidate.freight_value <= 0.0 {
            return Err(ValidationError::InvalidFreightValue {
                carrier_id: candidate.carrier_id,
                value: candidate.freight_value,
            });
        }
    }
    Ok(())
}

/// Candidate row read back for comparison, joined with its carrier name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCandidate {
    pub carrier_id: i64,
    pub carrier_name: String,
    pub freight_value: f64,
    pub selected: bool,
    /// Percent of the invoice value; None when the invoice is non-positive
    pub percent: Option<f64>,
}

/// Row of the history listing, joined with the winning candidate (if any)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub id: i64,
    pub date: NaiveDate,
    pub supplier: String,
    pub invoice_value: f64,
    pub weight_kg: Option<f64>,
    pub volume_count: Option<i64>,
    pub cubage_m3: Option<f64>,
    pub winner_name: Option<String>,
    pub winner_freight: Option<f64>,
}

impl QuoteSummary {
    pub fn winner_percent(&self) -> Option<f64> {
        percent_of_invoice(self.winner_freight?, self.invoice_value)
    }
}

/// Full quote read-back: header plus all candidates, cheapest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteDetail {
    pub id: i64,
    pub header: QuoteHeader,
    pub winner_name: Option<String>,
    pub candidates: Vec<QuoteCandidate>,
}

/// History listing filter; every field optional
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub supplier_contains: Option<String>,
    pub carrier_contains: Option<String>,
}
