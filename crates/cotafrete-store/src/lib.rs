//! File-backed SQLite store
//!
//! One local database file holds everything. [`Db`] creates the schema
//! idempotently on open and hands out one connection per unit of work.

mod db;

pub use db::Db;
