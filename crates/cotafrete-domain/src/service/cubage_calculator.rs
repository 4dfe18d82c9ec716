//! Cubic volume calculation for boxed items

use crate::model::{CubageItem, CubageLine, DimensionUnit};

const CM3_PER_M3: f64 = 1_000_000.0;

/// Volume of one line in m³. Lines with a non-positive quantity or
/// dimension contribute 0 (empty and unparsable cells arrive here as 0).
pub fn line_volume_m3(line: &CubageLine, unit: DimensionUnit) -> f64 {
    if line.quantity <= 0.0 || line.width <= 0.0 || line.length <= 0.0 || line.height <= 0.0 {
        return 0.0;
    }
    let volume = line.quantity * line.width * line.length * line.height;
    match unit {
        DimensionUnit::Centimeters => volume / CM3_PER_M3,
        DimensionUnit::Meters => volume,
    }
}

/// Compute per-line volumes and the grand total in m³
pub fn compute_cubage(lines: &[CubageLine], unit: DimensionUnit) -> (Vec<CubageItem>, f64) {
    let items: Vec<CubageItem> = lines
        .iter()
        .map(|line| CubageItem {
            quantity: line.quantity,
            width: line.width,
            length: line.length,
            height: line.height,
            volume_m3: line_volume_m3(line, unit),
        })
        .collect();

    let total = items.iter().map(|item| item.volume_m3).sum();
    (items, total)
}
