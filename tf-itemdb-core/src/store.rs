//! Flat-file snapshot storage.
//!
//! Every artifact is a single JSON file that is replaced atomically: the new
//! contents go to a sibling `.tmp` file which is then renamed over the target,
//! so a reader never observes a half-written snapshot.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::aggregate::AggregateSnapshot;
use crate::catalog::CatalogSnapshot;
use crate::error::StoreError;
use crate::locale::LocaleTable;

const VERSION_FILE: &str = "version.json";
const CATALOG_FILE: &str = "econ-items.json";
const LOCALE_FILE: &str = "locale.json";
const AGGREGATES_FILE: &str = "item-aggregates.json";

/// The last schema version seen from the up-to-date check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMarker {
    pub version: u64,
}

/// Snapshot files rooted at one data directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version_path(&self) -> PathBuf {
        self.root.join(VERSION_FILE)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    pub fn locale_path(&self) -> PathBuf {
        self.root.join(LOCALE_FILE)
    }

    pub fn aggregates_path(&self) -> PathBuf {
        self.root.join(AGGREGATES_FILE)
    }

    /// Current version marker. Missing or unreadable markers count as absent.
    pub fn load_version(&self) -> Option<VersionMarker> {
        read_json_lenient(&self.version_path(), "version marker")
    }

    pub fn save_version(&self, marker: VersionMarker) -> Result<(), StoreError> {
        write_json(&self.version_path(), &marker)
    }

    /// Current catalog snapshot. Missing or unreadable snapshots count as
    /// absent, which makes the next fetch start over.
    pub fn load_catalog(&self) -> Option<CatalogSnapshot> {
        read_json_lenient(&self.catalog_path(), "catalog snapshot")
    }

    pub fn save_catalog(&self, snapshot: &CatalogSnapshot) -> Result<(), StoreError> {
        write_json(&self.catalog_path(), snapshot)
    }

    /// The locale table. Unlike the catalog this is required as-is: a missing
    /// or corrupt file is an error.
    pub fn load_locale(&self) -> Result<LocaleTable, StoreError> {
        read_json_required(&self.locale_path(), "Locale table")
    }

    pub fn save_locale(&self, table: &LocaleTable) -> Result<(), StoreError> {
        write_json(&self.locale_path(), table)
    }

    pub fn load_aggregates(&self) -> Option<AggregateSnapshot> {
        read_json_lenient(&self.aggregates_path(), "aggregate snapshot")
    }

    pub fn save_aggregates(&self, snapshot: &AggregateSnapshot) -> Result<(), StoreError> {
        write_json(&self.aggregates_path(), snapshot)
    }
}

/// Write `contents` to `path` via a temporary sibling file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let contents = serde_json::to_string_pretty(value)?;
    write_atomic(path, contents.as_bytes())?;
    Ok(())
}

fn read_json_lenient<T: DeserializeOwned>(path: &Path, what: &str) -> Option<T> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Could not read {what} at {}: {e}", path.display());
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring invalid {what} at {}: {e}", path.display());
            None
        }
    }
}

fn read_json_required<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T, StoreError> {
    if !path.exists() {
        return Err(StoreError::missing(what, path));
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
