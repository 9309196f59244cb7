use serde::Deserialize;
use tf_itemdb_core::CatalogItem;

/// Top-level wrapper of `IEconItems_440/GetSchemaItems`.
#[derive(Debug, Deserialize)]
pub struct SchemaItemsEnvelope {
    pub result: SchemaItemsResult,
}

#[derive(Debug, Deserialize)]
pub struct SchemaItemsResult {
    /// `1` on success.
    pub status: i32,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub items_game_url: Option<String>,
    /// At most 1000 items per page.
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    /// Start offset of the next page; absent on the last page.
    #[serde(default)]
    pub next: Option<u64>,
}

/// Top-level wrapper of `ISteamApps/UpToDateCheck`.
#[derive(Debug, Deserialize)]
pub struct UpToDateEnvelope {
    pub response: UpToDateResponse,
}

/// See <https://wiki.teamfortress.com/wiki/WebAPI/UpToDateCheck>.
#[derive(Debug, Clone, Deserialize)]
pub struct UpToDateResponse {
    pub success: bool,
    pub up_to_date: bool,
    #[serde(default)]
    pub version_is_listable: bool,
    /// Only present when `up_to_date` is false.
    #[serde(default)]
    pub required_version: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}
