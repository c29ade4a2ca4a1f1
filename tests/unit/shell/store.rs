use super::*;

fn temp_path(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_store");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn exercise(store: &mut dyn SettingsStore) {
    assert_eq!(store.load("missing").unwrap(), None);
    assert!(store.keys().unwrap().is_empty());

    store.save("b", serde_json::json!({ "n": 1 })).unwrap();
    store.save("a", serde_json::json!("x")).unwrap();
    store.save("b", serde_json::json!({ "n": 2 })).unwrap();
    assert_eq!(store.load("b").unwrap(), Some(serde_json::json!({ "n": 2 })));
    assert_eq!(store.keys().unwrap(), ["a", "b"]);

    assert!(store.remove("a").unwrap());
    assert!(!store.remove("a").unwrap());
    assert_eq!(store.keys().unwrap(), ["b"]);
}

#[test]
fn memory_store_behaves_like_a_map() {
    exercise(&mut MemoryStore::new());
}

#[test]
fn json_file_store_behaves_like_a_map() {
    let path = temp_path("map.json");
    exercise(&mut JsonFileStore::new(&path));
}

#[test]
fn json_file_store_persists_across_instances() {
    let path = temp_path("persist.json");
    let mut first = JsonFileStore::new(&path);
    save_json(&mut first, "count", &7u32).unwrap();

    let second = JsonFileStore::new(&path);
    assert_eq!(load_json::<u32>(&second, "count").unwrap(), Some(7));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_file_store_reports_corrupt_files_as_serde_errors() {
    let path = temp_path("corrupt.json");
    std::fs::write(&path, "[1, 2").unwrap();
    let store = JsonFileStore::new(&path);
    assert!(matches!(store.load("x"), Err(CardError::Serde(_))));

    std::fs::write(&path, "  \n").unwrap();
    assert_eq!(store.keys().unwrap(), Vec::<String>::new());
}

#[test]
fn typed_load_rejects_mismatched_shapes() {
    let mut store = MemoryStore::new();
    store.save("n", serde_json::json!("not a number")).unwrap();
    assert!(matches!(
        load_json::<u32>(&store, "n"),
        Err(CardError::Serde(_))
    ));
}
