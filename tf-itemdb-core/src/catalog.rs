use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Item class of supply crates in the TF2 schema.
pub const SUPPLY_CRATE_CLASS: &str = "supply_crate";

/// Item class of tools (keys, paints, name tags, ...).
pub const TOOL_CLASS: &str = "tool";

/// Attribute class carrying a crate's series number.
pub const CRATE_SERIES_ATTRIBUTE: &str = "supply_crate_series";

/// One item definition as returned by `IEconItems_440/GetSchemaItems`.
///
/// Optional fields are frequently missing from the API response, so almost
/// everything defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub defindex: u32,
    pub item_class: String,
    #[serde(default)]
    pub item_type_name: String,
    /// Locale token id, usually `#`-prefixed.
    #[serde(default)]
    pub item_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
    #[serde(default)]
    pub proper_name: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_slot: Option<String>,
    pub item_quality: u32,
    /// Empty or null when no image is available.
    #[serde(default)]
    pub image_inventory: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_url_large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_restriction: Option<String>,
    #[serde(default)]
    pub model_player: Option<String>,
    #[serde(default)]
    pub min_ilevel: u32,
    #[serde(default)]
    pub max_ilevel: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft_material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<ItemCapabilities>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ItemTool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_by_classes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_class_loadout_slots: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<ItemStyle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<ItemAttribute>>,
}

impl CatalogItem {
    pub fn is_crate(&self) -> bool {
        self.item_class == SUPPLY_CRATE_CLASS
    }

    pub fn is_tool(&self) -> bool {
        self.item_class == TOOL_CLASS
    }

    /// Find the first attribute with the given class.
    pub fn attribute(&self, class: &str) -> Option<&ItemAttribute> {
        self.attributes
            .as_deref()
            .and_then(|attrs| attrs.iter().find(|a| a.class == class))
    }

    /// The crate series number, if this item declares a nonzero one.
    pub fn crate_series(&self) -> Option<u32> {
        let value = self.attribute(CRATE_SERIES_ATTRIBUTE)?.value;
        if value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
            Some(value as u32)
        } else {
            None
        }
    }

    /// Locale token id with the leading `#` removed.
    pub fn name_token(&self) -> &str {
        self.item_name.strip_prefix('#').unwrap_or(&self.item_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_craft_mark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_gift_wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paintable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_craft_count: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decodable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable_gc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usable_out_of_game: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTool {
    /// Can be empty or missing in the API response.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_capabilities: Option<ItemCapabilities>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub name: String,
    pub class: String,
    pub value: f64,
}

/// The locally cached item catalog for one schema version.
///
/// `cursor` is the resumption offset: present while a fetch is incomplete,
/// absent once every page has been stored. It is stored as `next` to match
/// the API's paging field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub version: u64,
    #[serde(rename = "next", default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<u64>,
    pub items: Vec<CatalogItem>,
}

impl CatalogSnapshot {
    pub fn complete(version: u64, items: Vec<CatalogItem>) -> Self {
        Self {
            version,
            cursor: None,
            items,
        }
    }

    pub fn partial(version: u64, cursor: u64, items: Vec<CatalogItem>) -> Self {
        Self {
            version,
            cursor: Some(cursor),
            items,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cursor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_json(extra: &str) -> String {
        format!(
            r##"{{"name": "Mann Co. Supply Crate", "defindex": 5021, "item_class": "supply_crate",
                "item_name": "#TF_SupplyCrate", "item_quality": 6,
                "image_url": null, "model_player": null {extra}}}"##
        )
    }

    #[test]
    fn test_deserialize_minimal_item() {
        let item: CatalogItem = serde_json::from_str(&item_json("")).unwrap();
        assert_eq!(item.defindex, 5021);
        assert!(item.is_crate());
        assert!(item.image_url.is_none());
        assert_eq!(item.name_token(), "TF_SupplyCrate");
        assert_eq!(item.crate_series(), None);
    }

    #[test]
    fn test_crate_series_attribute() {
        let extra = r#", "attributes": [{"name": "set supply crate series", "class": "supply_crate_series", "value": 27}]"#;
        let item: CatalogItem = serde_json::from_str(&item_json(extra)).unwrap();
        assert_eq!(item.crate_series(), Some(27));
    }

    #[test]
    fn test_zero_series_is_none() {
        let extra = r#", "attributes": [{"name": "s", "class": "supply_crate_series", "value": 0}]"#;
        let item: CatalogItem = serde_json::from_str(&item_json(extra)).unwrap();
        assert_eq!(item.crate_series(), None);
    }

    #[test]
    fn test_tool_type_rename() {
        let extra = r#", "tool": {"type": "paint_can"}"#;
        let item: CatalogItem = serde_json::from_str(&item_json(extra)).unwrap();
        assert_eq!(
            item.tool.and_then(|t| t.tool_type).as_deref(),
            Some("paint_can")
        );
    }

    #[test]
    fn test_snapshot_cursor_serialized_as_next() {
        let partial = CatalogSnapshot::partial(3, 1000, vec![]);
        let json = serde_json::to_string(&partial).unwrap();
        assert_eq!(json, r#"{"version":3,"next":1000,"items":[]}"#);

        let complete = CatalogSnapshot::complete(3, vec![]);
        let json = serde_json::to_string(&complete).unwrap();
        assert_eq!(json, r#"{"version":3,"items":[]}"#);
        assert!(complete.is_complete());
        assert!(!partial.is_complete());
    }
}
