//! Domain model types

pub mod carrier;
pub mod cubage;
pub mod quote;

pub use carrier::{is_default_carrier, Carrier, CarrierContact, ContactKind, NewCarrier};
pub use cubage::{CubageItem, CubageLine, DimensionUnit};
pub use quote::{
    validate_candidates, CandidateInput, QuoteCandidate, QuoteDetail, QuoteFilter, QuoteHeader,
    QuoteSummary,
};
