//! Application use cases

pub mod quote_session;
pub mod quoting;
pub mod registry;

pub use quote_session::{QuoteSession, SessionRow};
