use serde_json::json;

use riskmap::errors::RiskmapError;
use riskmap::settings::{FileStore, KeyValueStore, Settings, SettingsStore};

fn file_backed(dir: &tempfile::TempDir) -> SettingsStore {
    SettingsStore::new(Box::new(FileStore::open(dir.path()).unwrap()))
}

fn partial(value: serde_json::Value) -> Settings {
    serde_json::from_value(value).unwrap()
}

#[test]
fn write_then_read_is_merge_of_previous_and_partial() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed(&dir);

    store
        .write(&partial(json!({ "riskThreshold": 60, "darkMode": true })))
        .unwrap();
    store
        .write(&partial(json!({ "riskThreshold": 85, "alertEmail": "ops@example.com" })))
        .unwrap();

    // reopen against the same directory to prove persistence
    let reopened = file_backed(&dir);
    let settings = reopened.read().unwrap();
    assert_eq!(settings.risk_threshold(), 85);
    assert!(settings.dark_mode());
    assert_eq!(settings.alert_email(), Some("ops@example.com"));
}

#[test]
fn export_excludes_the_credential_for_any_stored_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed(&dir);

    store
        .write(&partial(json!({
            "apiKey": "super-secret-key",
            "demoMode": false,
            "customKey": "kept"
        })))
        .unwrap();

    let exported: serde_json::Value =
        serde_json::from_slice(&store.export().unwrap()).unwrap();
    let map = exported.as_object().unwrap();
    assert!(!map.contains_key("apiKey"));
    assert_eq!(map["customKey"], "kept");
}

#[test]
fn import_of_non_object_fails_and_leaves_settings_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed(&dir);
    store.write(&partial(json!({ "demoMode": true }))).unwrap();

    let err = store.import(b"[\"not\", \"an\", \"object\"]").unwrap_err();
    assert!(matches!(err, RiskmapError::Import(_)));

    let settings = store.read().unwrap();
    assert!(settings.demo_mode());
    assert_eq!(settings.iter().count(), 1);
}

#[test]
fn import_roundtrips_an_export() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed(&dir);
    store
        .write(&partial(json!({ "apiKey": "secret", "riskThreshold": 42 })))
        .unwrap();
    let exported = store.export().unwrap();

    let other_dir = tempfile::tempdir().unwrap();
    let other = file_backed(&other_dir);
    let merged = other.import(&exported).unwrap();
    assert_eq!(merged.risk_threshold(), 42);
    // credential never travels through export/import
    assert!(merged.get("apiKey").is_none());
}

#[test]
fn reset_clears_all_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = file_backed(&dir);
    store
        .write(&partial(json!({ "demoMode": true, "riskThreshold": 10 })))
        .unwrap();

    store.reset().unwrap();
    let settings = store.read().unwrap();
    assert!(settings.is_empty());
    // defaults apply again after a reset
    assert_eq!(settings.risk_threshold(), 75);
}

#[test]
fn corrupt_document_on_disk_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let backing = FileStore::open(dir.path()).unwrap();
    backing.set("settings", "{{{{ definitely not json").unwrap();

    let store = SettingsStore::new(Box::new(backing));
    assert!(store.read().unwrap().is_empty());
}
