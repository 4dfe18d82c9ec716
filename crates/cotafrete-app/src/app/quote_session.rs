//! In-memory state for one freight quote being built
//!
//! Holds the supplier/invoice fields, one candidate freight value per
//! carrier and the chosen winner. The default carrier's freight is never
//! entered manually; it is derived from the invoice value whenever read.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use cotafrete_domain::model::{CandidateInput, Carrier, QuoteHeader};
use cotafrete_domain::service::quote_calculator::{default_carrier_fee, percent_of_invoice};
use cotafrete_types::{Error, Result};

/// One display row of the carrier comparison table
#[derive(Debug, Clone, Serialize)]
pub struct SessionRow {
    pub carrier_id: i64,
    pub carrier_name: String,
    /// None while no positive freight is known for this carrier
    pub freight_value: Option<f64>,
    /// None when the invoice or the freight is non-positive
    pub percent: Option<f64>,
    /// True for the default carrier, whose fee is derived
    pub auto_priced: bool,
    pub selected: bool,
}

/// Quote entry session state
#[derive(Debug, Clone)]
pub struct QuoteSession {
    pub date: NaiveDate,
    pub supplier: String,
    pub order_number: Option<String>,
    pub weight_kg: Option<f64>,
    pub volume_count: Option<i64>,
    pub cubage_m3: Option<f64>,
    invoice_value: f64,
    carriers: Vec<Carrier>,
    freight_values: HashMap<i64, f64>,
    selected_carrier_id: Option<i64>,
}

impl QuoteSession {
    pub fn new(date: NaiveDate, carriers: Vec<Carrier>) -> Self {
        Self {
            date,
            supplier: String::new(),
            order_number: None,
            weight_kg: None,
            volume_count: None,
            cubage_m3: None,
            invoice_value: 0.0,
            carriers,
            freight_values: HashMap::new(),
            selected_carrier_id: None,
        }
    }

    pub fn carriers(&self) -> &[Carrier] {
        &self.carriers
    }

    pub fn invoice_value(&self) -> f64 {
        self.invoice_value
    }

    pub fn set_invoice_value(&mut self, value: f64) {
        self.invoice_value = value;
    }

    fn carrier(&self, carrier_id: i64) -> Result<&Carrier> {
        self.carriers
            .iter()
            .find(|c| c.id == carrier_id)
            .ok_or(Error::CarrierNotFound(carrier_id))
    }

    /// Record a manual freight value for a carrier. The default carrier is
    /// auto-priced and rejects manual entry.
    pub fn set_freight(&mut self, carrier_id: i64, value: f64) -> Result<()> {
        let carrier = self.carrier(carrier_id)?;
        if carrier.is_default() {
            return Err(Error::AutoPricedCarrier(carrier.name.clone()));
        }
        if value > 0.0 {
            self.freight_values.insert(carrier_id, value);
        } else {
            self.freight_values.remove(&carrier_id);
        }
        Ok(())
    }

    pub fn select_carrier(&mut self, carrier_id: i64) -> Result<()> {
        self.carrier(carrier_id)?;
        self.selected_carrier_id = Some(carrier_id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_carrier_id = None;
    }

    pub fn selected_carrier_id(&self) -> Option<i64> {
        self.selected_carrier_id
    }

    /// Freight for one carrier: the manual entry, or the derived fee for
    /// the default carrier
    fn freight_for(&self, carrier: &Carrier) -> Option<f64> {
        if carrier.is_default() {
            return default_carrier_fee(
                self.invoice_value,
                carrier.base_fee_percent,
                carrier.tax_percent,
            );
        }
        self.freight_values.get(&carrier.id).copied()
    }

    /// The comparison table in carrier order
    pub fn rows(&self) -> Vec<SessionRow> {
        self.carriers
            .iter()
            .map(|carrier| {
                let freight_value = self.freight_for(carrier);
                SessionRow {
                    carrier_id: carrier.id,
                    carrier_name: carrier.name.clone(),
                    freight_value,
                    percent: freight_value
                        .and_then(|freight| percent_of_invoice(freight, self.invoice_value)),
                    auto_priced: carrier.is_default(),
                    selected: self.selected_carrier_id == Some(carrier.id),
                }
            })
            .collect()
    }

    /// Validate and turn the session into a persistable header plus its
    /// positive candidates, with at most one marked selected. A selection
    /// pointing at a carrier without a positive freight is dropped so the
    /// header winner always matches a candidate row.
    pub fn finalize(&self) -> Result<(QuoteHeader, Vec<CandidateInput>)> {
        let winner_id = self.selected_carrier_id.filter(|&id| {
            self.carriers
                .iter()
                .find(|c| c.id == id)
                .and_then(|c| self.freight_for(c))
                .is_some()
        });

        let candidates: Vec<CandidateInput> = self
            .carriers
            .iter()
            .filter_map(|carrier| {
                self.freight_for(carrier).map(|freight_value| CandidateInput {
                    carrier_id: carrier.id,
                    freight_value,
                    selected: winner_id == Some(carrier.id),
                })
            })
            .collect();

        let header = QuoteHeader {
            date: self.date,
            supplier: self.supplier.trim().to_string(),
            order_number: self
                .order_number
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            invoice_value: self.invoice_value,
            weight_kg: self.weight_kg,
            volume_count: self.volume_count,
            cubage_m3: self.cubage_m3,
            winner_carrier_id: winner_id,
        };

        header.validate()?;
        cotafrete_domain::model::validate_candidates(&candidates)?;
        Ok((header, candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(id: i64, name: &str, base: f64, tax: f64) -> Carrier {
        Carrier {
            id,
            name: name.to_string(),
            tax_id: None,
            base_fee_percent: base,
            tax_percent: tax,
            created_at: None,
        }
    }

    fn session() -> QuoteSession {
        let carriers = vec![
            carrier(1, "Rodocargas", 14.0, 7.0),
            carrier(2, "Transporte Azul", 0.0, 0.0),
            carrier(3, "Zeta Cargas", 0.0, 0.0),
        ];
        let mut session = QuoteSession::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            carriers,
        );
        session.supplier = "Fornecedor Alfa".to_string();
        session
    }

    #[test]
    fn test_default_carrier_fee_follows_invoice() {
        let mut session = session();
        session.set_invoice_value(1000.0);

        let rows = session.rows();
        let rodocargas = &rows[0];
        assert!(rodocargas.auto_priced);
        assert!((rodocargas.freight_value.unwrap() - 149.8).abs() < 1e-9);
        assert!((rodocargas.percent.unwrap() - 14.98).abs() < 1e-9);

        session.set_invoice_value(0.0);
        let rows = session.rows();
        assert!(rows[0].freight_value.is_none());
        assert!(rows[0].percent.is_none());
    }

    #[test]
    fn test_manual_freight_and_percent() {
        let mut session = session();
        session.set_invoice_value(1000.0);
        session.set_freight(2, 120.0).unwrap();

        let rows = session.rows();
        assert_eq!(rows[1].freight_value, Some(120.0));
        assert!((rows[1].percent.unwrap() - 12.0).abs() < 1e-9);
        // No entry yet: blank, not zero
        assert!(rows[2].freight_value.is_none());
        assert!(rows[2].percent.is_none());
    }

    #[test]
    fn test_non_positive_entry_clears_the_cell() {
        let mut session = session();
        session.set_invoice_value(1000.0);
        session.set_freight(2, 120.0).unwrap();
        session.set_freight(2, 0.0).unwrap();
        assert!(session.rows()[1].freight_value.is_none());
    }

    #[test]
    fn test_default_carrier_rejects_manual_freight() {
        let mut session = session();
        assert!(matches!(
            session.set_freight(1, 99.0),
            Err(Error::AutoPricedCarrier(_))
        ));
    }

    #[test]
    fn test_unknown_carrier() {
        let mut session = session();
        assert!(matches!(
            session.set_freight(42, 10.0),
            Err(Error::CarrierNotFound(42))
        ));
        assert!(matches!(
            session.select_carrier(42),
            Err(Error::CarrierNotFound(42))
        ));
    }

    #[test]
    fn test_finalize_keeps_positive_candidates_and_winner() {
        let mut session = session();
        session.set_invoice_value(1000.0);
        session.set_freight(2, 120.0).unwrap();
        session.select_carrier(2).unwrap();

        let (header, candidates) = session.finalize().unwrap();
        assert_eq!(header.winner_carrier_id, Some(2));
        // Rodocargas auto fee plus the manual entry; carrier 3 left out
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates.iter().filter(|c| c.selected).count(), 1);
        assert!(candidates.iter().all(|c| c.freight_value > 0.0));
    }

    #[test]
    fn test_finalize_drops_selection_without_freight() {
        let mut session = session();
        session.set_invoice_value(1000.0);
        session.select_carrier(3).unwrap(); // no freight entered for 3

        let (header, candidates) = session.finalize().unwrap();
        assert_eq!(header.winner_carrier_id, None);
        assert!(candidates.iter().all(|c| !c.selected));
    }

    #[test]
    fn test_finalize_requires_supplier_and_invoice() {
        let mut session = session();
        session.set_invoice_value(1000.0);
        session.supplier = "   ".to_string();
        assert!(session.finalize().is_err());

        let mut session = self::session();
        session.set_invoice_value(0.0);
        session.set_freight(2, 120.0).unwrap();
        assert!(session.finalize().is_err());
    }

    #[test]
    fn test_finalize_requires_at_least_one_candidate() {
        // No default carrier registered, so nothing is auto-priced
        let mut session = QuoteSession::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            vec![carrier(2, "Transporte Azul", 0.0, 0.0)],
        );
        session.supplier = "Fornecedor".to_string();
        session.set_invoice_value(1000.0);

        assert!(matches!(
            session.finalize(),
            Err(Error::Validation(
                cotafrete_types::ValidationError::NoCandidates
            ))
        ));
    }
}
