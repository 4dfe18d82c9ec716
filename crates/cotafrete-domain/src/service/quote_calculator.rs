//! Freight percentage and default-carrier fee formulas

/// Fallback base percentage when the carrier record stores none
pub const DEFAULT_BASE_FEE_PERCENT: f64 = 14.0;

/// Fallback ICMS percentage when the carrier record stores none
pub const DEFAULT_TAX_PERCENT: f64 = 7.0;

/// Percentage a freight value represents of the invoice value.
///
/// Returns None when the invoice is non-positive (no data to compare
/// against) or the freight itself is non-positive (blank cell, not zero).
pub fn percent_of_invoice(freight_value: f64, invoice_value: f64) -> Option<f64> {
    if invoice_value <= 0.0 || freight_value <= 0.0 {
        return None;
    }
    Some(freight_value / invoice_value * 100.0)
}

/// Auto-computed fee for the default carrier: a base percentage of the
/// invoice plus ICMS on top of that base. Stored percentages of zero fall
/// back to the documented constants.
pub fn default_carrier_fee(
    invoice_value: f64,
    base_fee_percent: f64,
    tax_percent: f64,
) -> Option<f64> {
    if invoice_value <= 0.0 {
        return None;
    }
    let base_pct = if base_fee_percent > 0.0 {
        base_fee_percent
    } else {
        DEFAULT_BASE_FEE_PERCENT
    };
    let tax_pct = if tax_percent > 0.0 {
        tax_percent
    } else {
        DEFAULT_TAX_PERCENT
    };

    let base = invoice_value * base_pct / 100.0;
    let tax = base * tax_pct / 100.0;
    Some(base + tax)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_invoice() {
        let percent = percent_of_invoice(150.0, 1000.0).unwrap();
        assert!((percent - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_keeps_full_precision() {
        let percent = percent_of_invoice(123.45, 678.9).unwrap();
        assert!((percent - 123.45 / 678.9 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_percent_no_invoice_is_none() {
        assert!(percent_of_invoice(100.0, 0.0).is_none());
        assert!(percent_of_invoice(100.0, -5.0).is_none());
    }

    #[test]
    fn test_percent_no_freight_is_none() {
        assert!(percent_of_invoice(0.0, 1000.0).is_none());
        assert!(percent_of_invoice(-1.0, 1000.0).is_none());
    }

    #[test]
    fn test_default_fee_formula() {
        // 1000 * 14% = 140, plus 7% ICMS = 149.8
        let fee = default_carrier_fee(1000.0, 14.0, 7.0).unwrap();
        assert!((fee - 149.8).abs() < 1e-9);
    }

    #[test]
    fn test_default_fee_fallback_constants() {
        let explicit = default_carrier_fee(2500.0, 14.0, 7.0).unwrap();
        let fallback = default_carrier_fee(2500.0, 0.0, 0.0).unwrap();
        assert!((explicit - fallback).abs() < 1e-9);
    }

    #[test]
    fn test_default_fee_without_invoice() {
        assert!(default_carrier_fee(0.0, 14.0, 7.0).is_none());
        assert!(default_carrier_fee(-10.0, 14.0, 7.0).is_none());
    }
}
