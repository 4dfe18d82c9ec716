//! Pure domain services

pub mod cubage_calculator;
pub mod format;
pub mod money;
pub mod quote_calculator;

pub use cubage_calculator::compute_cubage;
pub use money::{format_money, parse_money};
pub use quote_calculator::{default_carrier_fee, percent_of_invoice};
