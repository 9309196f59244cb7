use tf_itemdb_core::StoreError;

/// Errors that can occur while talking to upstream sources.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Steam API rejected the API key")]
    Unauthorized,

    #[error("Rate limited by upstream")]
    RateLimit,

    #[error("Server error (HTTP {status}) from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FetchError {
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
