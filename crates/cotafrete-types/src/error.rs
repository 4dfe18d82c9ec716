//! Error types for cotafrete

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[allow(dead_code)]
    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

/// Validation errors reported before anything touches storage
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Supplier name is required")]
    MissingSupplier,

    #[error("Invoice value must be positive, got {0}")]
    InvalidInvoiceValue(f64),

    #[error("At least one carrier freight value is required")]
    NoCandidates,

    #[error("Freight value for carrier {carrier_id} must be positive, got {value}")]
    InvalidFreightValue { carrier_id: i64, value: f64 },

    #[error("Carrier name is required")]
    MissingCarrierName,

    #[error("Invalid e-mail address: {0}")]
    InvalidEmail(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("A carrier with tax id {0} already exists")]
    DuplicateTaxId(String),

    #[error("Carrier not found: {0}")]
    CarrierNotFound(i64),

    #[error("No carrier named \"{0}\"")]
    UnknownCarrierName(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Quote not found: {0}")]
    QuoteNotFound(i64),

    #[error("Carrier \"{0}\" is the default carrier and cannot be removed")]
    ProtectedCarrier(String),

    #[error("Freight for \"{0}\" is computed automatically from the invoice value")]
    AutoPricedCarrier(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
