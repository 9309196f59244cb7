use std::path::PathBuf;

/// Errors that can occur while loading configuration or reading and writing
/// snapshots.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Locale decode error: {0}")]
    Format(#[from] tf_itemdb_vdf::FormatError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{what} not found at {}", path.display())]
    Missing { what: &'static str, path: PathBuf },

    #[error("Invalid data: {0}")]
    Invalid(String),
}

impl StoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn missing(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::Missing {
            what,
            path: path.into(),
        }
    }
}
