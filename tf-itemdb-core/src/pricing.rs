//! The trade.tf pricing spreadsheet.
//!
//! The spreadsheet is keyed differently from the Steam schema: most keys are a
//! plain defindex, but crate series get an 8-character composite key made of
//! a 4-character defindex followed by a 4-character zero-padded series number
//! (`"50210027"` is series 27 of crate 5021).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Quality key marking an entry as available uncraftable.
pub const UNCRAFTABLE_QUALITY_KEY: &str = "-1";

/// Price observations for one item, keyed by quality (as a string).
pub type PricingEntry = BTreeMap<String, PriceObservation>;

/// A full pricing spreadsheet snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSheet {
    #[serde(default)]
    pub units: Option<PriceUnits>,
    pub items: BTreeMap<String, PricingEntry>,
    /// Unix timestamp of the spreadsheet export.
    #[serde(default)]
    pub last_modified: Option<u64>,
}

impl PricingSheet {
    /// Read a spreadsheet JSON file. A missing file is an error: there is no
    /// sensible reconciliation without pricing data.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::missing("Pricing spreadsheet", path));
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Conversion rates between currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceUnits {
    pub k: f64,
    pub r: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<PriceRange>,
    /// Shape varies between exports; kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub hi: f64,
    pub low: f64,
    pub mid: f64,
    /// `r` (refined), `b` (buds) or `k` (keys).
    pub unit: String,
    #[serde(default)]
    pub unsure: bool,
}

/// A decoded spreadsheet key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingKey {
    /// A plain item defindex.
    Defindex(u32),
    /// 4-character defindex + 4-character series. `series` is `None` when the
    /// series half is not a number.
    Composite { defindex: u32, series: Option<u32> },
    /// Not a recognizable key.
    Unknown,
}

impl PricingKey {
    pub fn parse(key: &str) -> Self {
        if key.len() == 8 && key.is_ascii() {
            let (defindex, series) = key.split_at(4);
            return match defindex.parse() {
                Ok(defindex) => Self::Composite {
                    defindex,
                    series: series.parse().ok(),
                },
                Err(_) => Self::Unknown,
            };
        }
        key.parse().map_or(Self::Unknown, Self::Defindex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_defindex() {
        assert_eq!(PricingKey::parse("5021"), PricingKey::Defindex(5021));
        assert_eq!(PricingKey::parse("30"), PricingKey::Defindex(30));
    }

    #[test]
    fn test_parse_composite_key() {
        assert_eq!(
            PricingKey::parse("50210027"),
            PricingKey::Composite {
                defindex: 5021,
                series: Some(27)
            }
        );
    }

    #[test]
    fn test_parse_composite_bad_series() {
        assert_eq!(
            PricingKey::parse("5021abcd"),
            PricingKey::Composite {
                defindex: 5021,
                series: None
            }
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(PricingKey::parse("abcd0027"), PricingKey::Unknown);
        assert_eq!(PricingKey::parse("strange"), PricingKey::Unknown);
        assert_eq!(PricingKey::parse(""), PricingKey::Unknown);
    }

    #[test]
    fn test_deserialize_sheet() {
        let json = r#"{
            "units": {"k": 50.0, "r": 1.0, "b": 400.0},
            "items": {
                "5021": {
                    "-1": {"regular": "r"},
                    "6": {"applied": {"hi": 1.0, "low": 0.5, "mid": 0.75, "unit": "r", "unsure": false}, "regular": "r"}
                }
            },
            "last_modified": 1400000000
        }"#;
        let sheet: PricingSheet = serde_json::from_str(json).unwrap();
        let entry = &sheet.items["5021"];
        assert!(entry.contains_key(UNCRAFTABLE_QUALITY_KEY));
        assert_eq!(entry["6"].applied.as_ref().map(|a| a.mid), Some(0.75));
        assert_eq!(sheet.last_modified, Some(1_400_000_000));
    }
}
