//! Warpaint display names from proto object definition tokens.
//!
//! Warpaint textures are named by tokens such as
//! `"9_102_field { field_number: 2 }" "Night Owl"`. Painted weapons in the
//! catalog carry the paint in their internal name as a lowercase suffix
//! (`concealedkiller_sniperrifle_nightowl`), which is how the two are joined.

use tf_itemdb_core::LocaleTable;

const WARPAINT_PREFIX: &str = "9_";
const WARPAINT_FIELD: &str = "_field";

/// One warpaint texture name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarpaintName {
    /// Numeric texture id from the token key, kept as text.
    pub texture: String,
    /// Display name, e.g. `Night Owl`.
    pub name: String,
    /// `_` followed by the lowercase alphanumerics of `name`.
    pub suffix: String,
}

/// Warpaint names in locale table order.
#[derive(Debug, Clone, Default)]
pub struct WarpaintIndex {
    entries: Vec<WarpaintName>,
}

impl WarpaintIndex {
    pub fn from_locale(locale: &LocaleTable) -> Self {
        let entries = locale
            .proto_obj_def_tokens
            .iter()
            .filter(|(key, _)| key.starts_with(WARPAINT_PREFIX))
            .filter_map(|(key, value)| {
                let Some(texture) = texture_id(key) else {
                    log::warn!("Skipping malformed warpaint token key {key:?}");
                    return None;
                };
                let stem: String = value
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .collect();
                if stem.is_empty() {
                    return None;
                }
                Some(WarpaintName {
                    texture: texture.to_string(),
                    name: value.clone(),
                    suffix: format!("_{stem}"),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First warpaint whose suffix ends `item_name`, compared case-insensitively.
    pub fn lookup(&self, item_name: &str) -> Option<&WarpaintName> {
        let item_name = item_name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| item_name.ends_with(&entry.suffix))
    }
}

/// Extract `<texture>` from `9_<texture>_field...`.
fn texture_id(key: &str) -> Option<&str> {
    let rest = key.strip_prefix(WARPAINT_PREFIX)?;
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (texture, tail) = rest.split_at(digits);
    tail.starts_with(WARPAINT_FIELD).then_some(texture)
}
