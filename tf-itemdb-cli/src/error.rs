use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings or snapshot storage
    #[error("{0}")]
    Store(#[from] tf_itemdb_core::StoreError),

    /// Steam API or locale download
    #[error("{0}")]
    Fetch(#[from] tf_itemdb_steam::FetchError),

    #[error("{0}")]
    Compile(#[from] tf_itemdb_compile::CompileError),

    #[error("Decode error: {0}")]
    Decode(#[from] tf_itemdb_vdf::FormatError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
