//! SQLite implementations of the repository traits

mod sqlite_carrier_repo;
mod sqlite_cubage_repo;
mod sqlite_quote_repo;

pub use sqlite_carrier_repo::SqliteCarrierRepository;
pub use sqlite_cubage_repo::SqliteCubageRepository;
pub use sqlite_quote_repo::SqliteQuoteRepository;
