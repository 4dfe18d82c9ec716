//! Shared money-text parsing and rendering
//!
//! Every money field in the system goes through [`parse_money`]; the input
//! convention is locale-ambiguous (`1234,56`, `1.234,56` and `1234.56` all
//! occur) and unparsable text is zero by policy, never an error.

/// Parse a money string into a numeric amount.
///
/// An optional `R$` prefix and spaces are ignored. A single dot followed by
/// an all-digit fraction is taken as a decimal point; otherwise dots are
/// thousands separators and the comma is the decimal separator.
pub fn parse_money(text: &str) -> f64 {
    let cleaned = text.replace("R$", "").replace(' ', "");
    if cleaned.is_empty() {
        return 0.0;
    }

    let parts: Vec<&str> = cleaned.split('.').collect();
    if parts.len() == 2 && !parts[1].is_empty() && parts[1].bytes().all(|b| b.is_ascii_digit()) {
        return cleaned.parse().unwrap_or(0.0);
    }

    let normalized = cleaned.replace('.', "").replace(',', ".");
    normalized.parse().unwrap_or(0.0)
}

/// Render an amount as Brazilian currency text, e.g. `R$ 1.234,56`
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!("R$ {sign}{grouped},{frac:02}")
}
