use std::path::PathBuf;

use tf_itemdb_core::StoreError;

/// Errors that abort a compile run. Pricing keys that cannot be reconciled
/// are not errors; they are counted in the run's statistics.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("No catalog snapshot at {}; fetch items first", .0.display())]
    MissingCatalog(PathBuf),

    #[error("Catalog snapshot for version {version} is incomplete (resume at {cursor}); fetch items first")]
    IncompleteCatalog { version: u64, cursor: u64 },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Input loader failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
