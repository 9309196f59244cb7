use std::fs;

use tempfile::TempDir;
use tf_itemdb_core::*;

fn hat(defindex: u32) -> CatalogItem {
    serde_json::from_value(serde_json::json!({
        "name": format!("hat_{defindex}"),
        "defindex": defindex,
        "item_class": "tf_wearable",
        "item_name": format!("#TF_Hat_{defindex}"),
        "item_quality": 6,
    }))
    .unwrap()
}

#[test]
fn missing_files_load_as_absent() {
    let tmp = TempDir::new().unwrap();
    let store = SnapshotStore::new(tmp.path());

    assert!(store.load_version().is_none());
    assert!(store.load_catalog().is_none());
    assert!(store.load_aggregates().is_none());
    assert!(matches!(
        store.load_locale(),
        Err(StoreError::Missing { .. })
    ));
}

#[test]
fn corrupt_catalog_counts_as_absent() {
    let tmp = TempDir::new().unwrap();
    let store = SnapshotStore::new(tmp.path());
    fs::write(store.catalog_path(), "{ not json").unwrap();

    assert!(store.load_catalog().is_none());
}

#[test]
fn catalog_save_replaces_previous_snapshot() {
    let tmp = TempDir::new().unwrap();
    let store = SnapshotStore::new(tmp.path().join("nested"));

    store
        .save_catalog(&CatalogSnapshot::partial(7, 1000, vec![hat(1)]))
        .unwrap();
    let partial = store.load_catalog().unwrap();
    assert_eq!(partial.cursor, Some(1000));

    store
        .save_catalog(&CatalogSnapshot::complete(7, vec![hat(1), hat(2)]))
        .unwrap();
    let complete = store.load_catalog().unwrap();
    assert!(complete.is_complete());
    assert_eq!(complete.items.len(), 2);
}

#[test]
fn atomic_write_leaves_no_temp_file() {
    let tmp = TempDir::new().unwrap();
    let store = SnapshotStore::new(tmp.path());
    store.save_version(VersionMarker { version: 12 }).unwrap();

    let names: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["version.json".to_string()]);
    assert_eq!(store.load_version(), Some(VersionMarker { version: 12 }));
}

#[test]
fn locale_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let store = SnapshotStore::new(tmp.path());
    let table = LocaleTable {
        tokens: [("TF_Hat_1".to_string(), "Hat One".to_string())].into(),
        proto_obj_def_tokens: vec![("9_1_field".to_string(), "Paint".to_string())],
    };
    store.save_locale(&table).unwrap();
    assert_eq!(store.load_locale().unwrap(), table);
}

#[test]
fn pricing_sheet_missing_is_error() {
    let tmp = TempDir::new().unwrap();
    let err = PricingSheet::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, StoreError::Missing { .. }));
}
