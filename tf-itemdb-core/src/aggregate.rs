use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The reconciled view of one item definition.
///
/// Sets and maps are ordered so that serializing the same aggregate twice
/// gives the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateItem {
    pub name: String,
    pub defindex: u32,
    /// Not known from any current source; always `-1`.
    pub class_id: i64,
    pub instance_ids: BTreeSet<u64>,
    pub qualities: BTreeSet<u32>,
    pub uncraftable_qualities: BTreeSet<u32>,
    pub attributes: ItemAttributes,
}

impl AggregateItem {
    pub fn new(name: impl Into<String>, defindex: u32, quality: u32) -> Self {
        Self {
            name: name.into(),
            defindex,
            class_id: -1,
            instance_ids: BTreeSet::new(),
            qualities: BTreeSet::from([quality]),
            uncraftable_qualities: BTreeSet::new(),
            attributes: ItemAttributes::None,
        }
    }

    /// Crate series map, if this is a crate.
    pub fn crate_series_mut(&mut self) -> Option<&mut BTreeMap<u32, CrateSeries>> {
        match &mut self.attributes {
            ItemAttributes::Crate { series } => Some(series),
            _ => None,
        }
    }

    pub fn is_crate(&self) -> bool {
        matches!(self.attributes, ItemAttributes::Crate { .. })
    }
}

/// Type-specific data. An item carries at most one kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemAttributes {
    #[default]
    None,
    Crate {
        series: BTreeMap<u32, CrateSeries>,
    },
    Recipe {
        outputs: Vec<RecipeOutput>,
    },
    Unusual {
        unusual_effects: BTreeSet<u32>,
    },
    Tool {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_type: Option<String>,
        applies_to: BTreeSet<String>,
    },
}

/// One numbered series of a supply crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrateSeries {
    pub series: u32,
    pub contents: Vec<CrateContent>,
    pub unusual_effects: BTreeSet<u32>,
}

impl CrateSeries {
    pub fn new(series: u32) -> Self {
        Self {
            series,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrateContent {
    pub defindex: u32,
    pub qualities: BTreeSet<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeOutput {
    pub defindex: u32,
    pub quality: u32,
    pub applies_to: BTreeSet<u32>,
}

/// All aggregates for one schema version, keyed by defindex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_last_modified: Option<u64>,
    pub items: BTreeMap<u32, AggregateItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_declared_quality() {
        let item = AggregateItem::new("Crate", 5021, 6);
        assert_eq!(item.qualities, BTreeSet::from([6]));
        assert!(item.uncraftable_qualities.is_empty());
        assert_eq!(item.class_id, -1);
        assert_eq!(item.attributes, ItemAttributes::None);
    }

    #[test]
    fn test_crate_attributes_json_shape() {
        let mut item = AggregateItem::new("Crate", 5021, 6);
        item.attributes = ItemAttributes::Crate {
            series: BTreeMap::from([(27, CrateSeries::new(27))]),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["attributes"]["crate"]["series"]["27"]["series"], 27);
    }

    #[test]
    fn test_snapshot_roundtrip_with_integer_keys() {
        let mut snapshot = AggregateSnapshot {
            version: 4,
            ..Default::default()
        };
        let mut item = AggregateItem::new("Crate", 5021, 6);
        item.attributes = ItemAttributes::Crate {
            series: BTreeMap::from([(27, CrateSeries::new(27))]),
        };
        snapshot.items.insert(5021, item);
        snapshot.items.insert(30, AggregateItem::new("Hat", 30, 6));

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: AggregateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
