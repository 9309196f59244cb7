//! Resumable, checkpointed catalog download.
//!
//! The catalog API pages by offset. The fetcher accumulates pages in memory
//! and writes the catalog snapshot at most once per run: as a complete
//! snapshot when the last page arrives, or as a partial snapshot (with the
//! failing offset as its cursor) when a page fails. A later run picks the
//! partial snapshot up and continues from the cursor.

use std::time::Duration;

use tokio::time::Instant;

use tf_itemdb_core::{CatalogItem, CatalogSnapshot, SnapshotStore};

use crate::client::SteamClient;
use crate::error::FetchError;

/// Upper bound on items per page promised by the schema API.
pub const MAX_PAGE_SIZE: usize = 1000;

/// One page of catalog items.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    /// Offset of the following page; `None` ends the catalog.
    pub next: Option<u64>,
}

/// A paginated catalog. Pages for one schema version must partition the
/// catalog without overlap, so that an offset alone identifies where to
/// resume.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&self, start: u64) -> Result<CatalogPage, FetchError>;
}

impl PageSource for SteamClient {
    async fn fetch_page(&self, start: u64) -> Result<CatalogPage, FetchError> {
        let result = self.get_schema_items(start).await?;
        Ok(CatalogPage {
            items: result.items,
            next: result.next,
        })
    }
}

/// What a fetch run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A complete snapshot for the version already existed.
    AlreadyComplete { items: usize },
    /// All pages were fetched and a complete snapshot written.
    Completed {
        items: usize,
        pages: usize,
        /// Offset the run started from; nonzero when resuming.
        resumed_from: u64,
    },
}

/// Drives a [`PageSource`] to completion, checkpointing into a
/// [`SnapshotStore`].
pub struct ResumableFetcher<S> {
    source: S,
    store: SnapshotStore,
    page_delay: Duration,
}

impl<S: PageSource> ResumableFetcher<S> {
    pub fn new(source: S, store: SnapshotStore, page_delay: Duration) -> Self {
        Self {
            source,
            store,
            page_delay,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch `version`, starting from whatever snapshot is on disk.
    pub async fn run(&self, version: u64) -> Result<FetchOutcome, FetchError> {
        let existing = self.store.load_catalog();
        self.fetch(version, existing).await
    }

    /// Fetch `version` given the last known snapshot.
    ///
    /// On error, a partial snapshot is written first if any items (including
    /// ones carried over from `existing`) have been accumulated; the error is
    /// then returned unchanged.
    pub async fn fetch(
        &self,
        version: u64,
        existing: Option<CatalogSnapshot>,
    ) -> Result<FetchOutcome, FetchError> {
        let (mut offset, mut items) = match existing {
            Some(snapshot) if snapshot.version == version => match snapshot.cursor {
                None => {
                    log::info!("Catalog for version {version} is already complete");
                    return Ok(FetchOutcome::AlreadyComplete {
                        items: snapshot.items.len(),
                    });
                }
                Some(cursor) => {
                    log::info!(
                        "Resuming catalog fetch for version {version} at {cursor} ({} items cached)",
                        snapshot.items.len()
                    );
                    (cursor, snapshot.items)
                }
            },
            Some(snapshot) => {
                log::info!(
                    "Discarding catalog snapshot for version {} (target {version})",
                    snapshot.version
                );
                (0, Vec::new())
            }
            None => (0, Vec::new()),
        };

        let resumed_from = offset;
        let mut pages = 0;
        let mut last_request: Option<Instant> = None;

        loop {
            self.wait_for_slot(&mut last_request).await;

            let page = match self.source.fetch_page(offset).await {
                Ok(page) => page,
                Err(e) => return Err(self.checkpoint(version, offset, items, e)),
            };

            if page.items.len() > MAX_PAGE_SIZE {
                log::warn!(
                    "Page at {offset} has {} items (expected at most {MAX_PAGE_SIZE})",
                    page.items.len()
                );
            }

            if let Some(next) = page.next {
                if next <= offset {
                    let err = FetchError::api(format!(
                        "Page at {offset} points back to {next}; refusing to loop"
                    ));
                    return Err(self.checkpoint(version, offset, items, err));
                }
            }

            pages += 1;
            items.extend(page.items);

            match page.next {
                Some(next) => {
                    log::info!("Getting next from {next}");
                    offset = next;
                }
                None => break,
            }
        }

        let count = items.len();
        self.store
            .save_catalog(&CatalogSnapshot::complete(version, items))?;
        log::info!("Finished updating catalog: {count} items in {pages} page(s)");

        Ok(FetchOutcome::Completed {
            items: count,
            pages,
            resumed_from,
        })
    }

    /// Enforce the pause between page requests: wait until at least
    /// `page_delay` has passed since the previous request.
    async fn wait_for_slot(&self, last_request: &mut Option<Instant>) {
        if let Some(last) = last_request {
            let elapsed = last.elapsed();
            if elapsed < self.page_delay {
                tokio::time::sleep(self.page_delay - elapsed).await;
            }
        }
        *last_request = Some(Instant::now());
    }

    /// Persist progress after a failed page and hand back the error.
    fn checkpoint(
        &self,
        version: u64,
        offset: u64,
        items: Vec<CatalogItem>,
        err: FetchError,
    ) -> FetchError {
        if items.is_empty() {
            log::warn!("Catalog fetch failed at {offset} with nothing to checkpoint: {err}");
            return err;
        }

        let count = items.len();
        match self
            .store
            .save_catalog(&CatalogSnapshot::partial(version, offset, items))
        {
            Ok(()) => log::warn!(
                "Catalog fetch failed at {offset}; saved {count} items to resume from there: {err}"
            ),
            Err(save_err) => log::error!(
                "Catalog fetch failed at {offset} and the checkpoint could not be written: {save_err}"
            ),
        }
        err
    }
}
