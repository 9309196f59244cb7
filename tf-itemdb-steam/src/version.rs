//! Schema version check.

use tf_itemdb_core::{SnapshotStore, VersionMarker};

use crate::client::SteamClient;
use crate::error::FetchError;
use crate::types::UpToDateResponse;

/// Something that can tell whether a schema version is current.
#[allow(async_fn_in_trait)]
pub trait VersionSource {
    async fn up_to_date(&self, version: u64) -> Result<UpToDateResponse, FetchError>;
}

impl VersionSource for SteamClient {
    async fn up_to_date(&self, version: u64) -> Result<UpToDateResponse, FetchError> {
        self.up_to_date_check(version).await
    }
}

/// Result of a version check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCheck {
    /// The stored version is current and every snapshot matches it.
    UpToDate { version: u64 },
    /// The stored version is current but the catalog or aggregate snapshot
    /// has not caught up with it, usually because an earlier run failed.
    Pending { version: u64 },
    /// A newer version exists and has been written to the version marker.
    Outdated { previous: u64, required: u64 },
}

impl UpdateCheck {
    /// Whether later stages have work to do.
    pub fn needs_update(&self) -> bool {
        !matches!(self, Self::UpToDate { .. })
    }

    /// The version later stages should target.
    pub fn target_version(&self) -> u64 {
        match *self {
            Self::UpToDate { version } | Self::Pending { version } => version,
            Self::Outdated { required, .. } => required,
        }
    }
}

/// Compare the stored version marker against upstream, recording a new
/// version when one is required. A missing marker counts as version 0.
///
/// The marker is written before any later stage runs, so a current marker
/// alone does not mean the snapshots are. When upstream agrees with the
/// marker but the catalog or aggregates lag behind it, the check reports
/// [`UpdateCheck::Pending`].
pub async fn check_for_update(
    source: &impl VersionSource,
    store: &SnapshotStore,
) -> Result<UpdateCheck, FetchError> {
    let current = store.load_version().map_or(0, |m| m.version);
    let response = source.up_to_date(current).await?;

    if !response.success {
        return Err(FetchError::api(format!(
            "UpToDateCheck failed for version {current}{}",
            response
                .message
                .as_deref()
                .map(|m| format!(": {m}"))
                .unwrap_or_default()
        )));
    }

    if response.up_to_date {
        if let Some(stage) = lagging_stage(store, current) {
            log::info!("Schema version {current} is current but the {stage} is behind");
            return Ok(UpdateCheck::Pending { version: current });
        }
        log::info!("Schema version {current} is up to date");
        return Ok(UpdateCheck::UpToDate { version: current });
    }

    let required = response.required_version.ok_or_else(|| {
        FetchError::api("UpToDateCheck reported out of date without a required_version")
    })?;

    store.save_version(VersionMarker { version: required })?;
    log::info!("Schema version changed: {current} -> {required}");

    Ok(UpdateCheck::Outdated {
        previous: current,
        required,
    })
}

/// The first snapshot that is missing, partial, or built for another version.
fn lagging_stage(store: &SnapshotStore, version: u64) -> Option<&'static str> {
    let catalog_done = store
        .load_catalog()
        .is_some_and(|c| c.version == version && c.is_complete());
    if !catalog_done {
        return Some("item catalog");
    }
    let compiled = store
        .load_aggregates()
        .is_some_and(|a| a.version == version);
    if !compiled {
        return Some("aggregate snapshot");
    }
    None
}
