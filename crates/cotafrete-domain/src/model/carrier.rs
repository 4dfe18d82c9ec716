//! Carrier (transportadora) types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use cotafrete_types::ValidationError;

/// Display name of the seeded default carrier whose fee is auto-computed
pub const DEFAULT_CARRIER_NAME: &str = "Rodocargas";

/// Case-insensitive match against the default carrier name
pub fn is_default_carrier(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(DEFAULT_CARRIER_NAME)
}

/// A freight transportation company that can be asked for a price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carrier {
    pub id: i64,
    pub name: String,
    /// CNPJ, unique when present
    pub tax_id: Option<String>,
    /// Percentual base applied over the invoice value (default carrier only)
    pub base_fee_percent: f64,
    /// ICMS percentage applied on top of the base fee
    pub tax_percent: f64,
    pub created_at: Option<NaiveDateTime>,
}

impl Carrier {
    pub fn is_default(&self) -> bool {
        is_default_carrier(&self.name)
    }
}

/// Contact entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Phone,
    Email,
}

impl ContactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactKind::Phone => "phone",
            ContactKind::Email => "email",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "phone" => Some(ContactKind::Phone),
            "email" => Some(ContactKind::Email),
            _ => None,
        }
    }
}

/// Phone/email entry with an optional contact-person name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierContact {
    pub kind: ContactKind,
    pub value: String,
    pub person: Option<String>,
}

/// Payload for creating or replacing a carrier record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCarrier {
    pub name: String,
    pub tax_id: Option<String>,
    pub base_fee_percent: f64,
    pub tax_percent: f64,
    pub contacts: Vec<CarrierContact>,
}

impl NewCarrier {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingCarrierName);
        }
        Ok(())
    }
}
