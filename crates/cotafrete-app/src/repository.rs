//! Repository adapters for the persistence layer

use std::path::PathBuf;

use cotafrete_infra::persistence::{
    SqliteCarrierRepository, SqliteCubageRepository, SqliteQuoteRepository,
};
use cotafrete_store::Db;
use cotafrete_types::Result;

use crate::config::Config;

/// Open the configured database, creating schema and seed data if needed
pub fn open_db(config: &Config) -> Result<Db> {
    Db::open(config.db_path()?)
}

/// Open a database at a custom path
pub fn open_db_at(path: PathBuf) -> Result<Db> {
    Db::open(path)
}

pub fn carrier_repo(db: &Db) -> SqliteCarrierRepository {
    SqliteCarrierRepository::new(db.clone())
}

pub fn quote_repo(db: &Db) -> SqliteQuoteRepository {
    SqliteQuoteRepository::new(db.clone())
}

pub fn cubage_repo(db: &Db) -> SqliteCubageRepository {
    SqliteCubageRepository::new(db.clone())
}
