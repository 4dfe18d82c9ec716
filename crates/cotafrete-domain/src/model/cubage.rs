//! Cubing calculator types

use serde::{Deserialize, Serialize};

/// Unit the box dimensions were entered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    #[default]
    Centimeters,
    Meters,
}

impl std::str::FromStr for DimensionUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(DimensionUnit::Centimeters),
            "m" => Ok(DimensionUnit::Meters),
            other => Err(format!("unknown unit \"{other}\" (expected cm or m)")),
        }
    }
}

/// One line of box dimensions as entered
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CubageLine {
    pub quantity: f64,
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

/// Line plus its computed volume, as persisted in the snapshot log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubageItem {
    pub quantity: f64,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub volume_m3: f64,
}
