use super::*;
use serde_json::json;

#[test]
fn test_memory_store_round_trip() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k"), None);

    store.set("k", json!({"a": 1}));
    assert_eq!(store.get("k"), Some(json!({"a": 1})));

    store.remove("k");
    assert_eq!(store.get("k"), None);
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = JsonFileStore::open(&path);
        store.set("settings", json!({"language": "pt"}));
        store.set("count", json!(3));
    }

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("settings"), Some(json!({"language": "pt"})));
    assert_eq!(reopened.get("count"), Some(json!(3)));
}

#[test]
fn test_file_store_remove_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = JsonFileStore::open(&path);
    store.set("k", json!(1));
    store.remove("k");

    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("k"), None);
}

#[test]
fn test_corrupt_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{not json at all").unwrap();

    let store = JsonFileStore::open(&path);
    assert_eq!(store.get("anything"), None);

    // And the store recovers on the next write
    store.set("k", json!("v"));
    let reopened = JsonFileStore::open(&path);
    assert_eq!(reopened.get("k"), Some(json!("v")));
}

#[test]
fn test_missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("never-written.json"));
    assert_eq!(store.get("k"), None);
}

#[test]
fn test_store_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("store.json");

    let store = JsonFileStore::open(&path);
    store.set("k", json!(true));
    assert!(path.exists());
}
