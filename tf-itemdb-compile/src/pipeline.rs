use std::path::{Path, PathBuf};

use tf_itemdb_core::{PricingSheet, SnapshotStore};

use crate::error::CompileError;
use crate::reconcile::{CompileStats, reconcile};

/// Summary of a finished compile run.
#[derive(Debug, Clone)]
pub struct CompileReport {
    pub version: u64,
    pub items: usize,
    pub stats: CompileStats,
    pub output: PathBuf,
}

/// Load the catalog, pricing sheet and locale table, reconcile them, and
/// replace the aggregate snapshot.
///
/// The three inputs are independent reads and are loaded concurrently. A
/// missing or partial catalog aborts the run before anything is written.
pub async fn compile(
    store: &SnapshotStore,
    pricing_path: &Path,
) -> Result<CompileReport, CompileError> {
    let catalog_task = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || store.load_catalog())
    };
    let locale_task = {
        let store = store.clone();
        tokio::task::spawn_blocking(move || store.load_locale())
    };
    let pricing_task = {
        let path = pricing_path.to_path_buf();
        tokio::task::spawn_blocking(move || PricingSheet::load(&path))
    };

    let (catalog, locale, pricing) = tokio::try_join!(catalog_task, locale_task, pricing_task)?;

    let catalog = catalog.ok_or_else(|| CompileError::MissingCatalog(store.catalog_path()))?;
    if let Some(cursor) = catalog.cursor {
        return Err(CompileError::IncompleteCatalog {
            version: catalog.version,
            cursor,
        });
    }
    let locale = locale?;
    let pricing = pricing?;

    log::info!(
        "Compiling version {}: {} catalog items, {} pricing entries, {} locale tokens",
        catalog.version,
        catalog.items.len(),
        pricing.items.len(),
        locale.tokens.len()
    );

    let result = reconcile(&catalog, &pricing, &locale);
    store.save_aggregates(&result.snapshot)?;

    Ok(CompileReport {
        version: result.snapshot.version,
        items: result.snapshot.items.len(),
        stats: result.stats,
        output: store.aggregates_path(),
    })
}
