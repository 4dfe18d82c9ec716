//! Repository trait definitions for data persistence

use cotafrete_types::Error;

use crate::model::{
    CandidateInput, Carrier, CarrierContact, CubageItem, NewCarrier, QuoteDetail, QuoteFilter,
    QuoteHeader, QuoteSummary,
};

/// Repository for carrier records and their contact lists
pub trait CarrierRepository {
    /// Insert a carrier with its contacts; duplicate tax ids surface as
    /// [`Error::DuplicateTaxId`]
    fn save(&self, carrier: &NewCarrier) -> Result<i64, Error>;

    /// Replace a carrier's fields and its whole contact list
    fn update(&self, id: i64, carrier: &NewCarrier) -> Result<(), Error>;

    /// Delete a carrier and its contacts (quote history is left untouched)
    fn delete(&self, id: i64) -> Result<(), Error>;

    /// All carriers ordered by name
    fn find_all(&self) -> Result<Vec<Carrier>, Error>;

    fn find_by_id(&self, id: i64) -> Result<Option<Carrier>, Error>;

    /// Case-insensitive name lookup
    fn find_by_name(&self, name: &str) -> Result<Option<Carrier>, Error>;

    fn contacts(&self, carrier_id: i64) -> Result<Vec<CarrierContact>, Error>;
}

/// Repository for quotes and their per-carrier candidate rows
pub trait QuoteRepository {
    /// Persist header plus candidates in one all-or-nothing transaction
    fn save(&self, header: &QuoteHeader, candidates: &[CandidateInput]) -> Result<i64, Error>;

    /// Replace the header fields and the full candidate set
    fn update(
        &self,
        id: i64,
        header: &QuoteHeader,
        candidates: &[CandidateInput],
    ) -> Result<(), Error>;

    /// Delete candidates then header in one transaction
    fn delete(&self, id: i64) -> Result<(), Error>;

    /// Filtered history, newest first
    fn list(&self, filter: &QuoteFilter) -> Result<Vec<QuoteSummary>, Error>;

    /// Header plus all candidates ordered by freight value ascending
    fn detail(&self, id: i64) -> Result<Option<QuoteDetail>, Error>;
}

/// Write-only log of cubing calculations
pub trait CubageRepository {
    fn save(&self, items: &[CubageItem], total_m3: f64) -> Result<i64, Error>;
}
