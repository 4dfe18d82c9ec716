//! Infrastructure layer
//!
//! SQLite-backed implementations of the domain repository traits. Every
//! mutating call opens one connection, runs one transaction and commits or
//! rolls back before returning.

pub mod persistence;
