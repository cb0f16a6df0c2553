use sekaiapp::model::MangaRecord;
use sekaiapp::store::backend::{RecordIndex, StorageBackend, SCHEMA_VERSION};
use sekaiapp::store::fs_backend::FsBackend;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

fn sample_index() -> RecordIndex {
    RecordIndex {
        next_id: 3,
        records: vec![
            MangaRecord::new("Berserk", "Miura").with_id(1).with_year(1989),
            MangaRecord::new("Monster", "Urasawa")
                .with_id(2)
                .with_cover_uri("content://media/external/images/7"),
        ],
        ..Default::default()
    }
}

#[test]
fn test_missing_file_loads_empty_index() {
    let (_dir, backend) = setup();
    let index = backend.load_index().unwrap();
    assert!(index.records.is_empty());
    assert_eq!(index.next_id, 1);
    assert_eq!(index.schema_version, SCHEMA_VERSION);
}

#[test]
fn test_index_io() {
    let (_dir, backend) = setup();
    backend.save_index(&sample_index()).unwrap();

    let loaded = backend.load_index().unwrap();
    assert_eq!(loaded, sample_index());
}

#[test]
fn test_atomic_write_artifacts() {
    let (dir, backend) = setup();
    backend.save_index(&sample_index()).unwrap();
    backend.save_index(&RecordIndex::default()).unwrap();

    assert!(dir.path().join("mangas.json").exists());

    // Verify NO .tmp files are left behind
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_creates_missing_directory_on_save() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone()).with_file_name("shelf.json");

    backend.save_index(&sample_index()).unwrap();
    assert!(nested.join("shelf.json").exists());
    assert_eq!(backend.location(), nested.join("shelf.json"));
}

#[test]
fn test_on_disk_layout() {
    let (dir, backend) = setup();
    backend.save_index(&sample_index()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("mangas.json")).unwrap())
            .unwrap();
    assert_eq!(raw["schema_version"], 2);
    assert_eq!(raw["next_id"], 3);
    assert_eq!(raw["records"][0]["title"], "Berserk");
    assert_eq!(raw["records"][0]["year"], 1989);
    assert!(raw["records"][1]["year"].is_null());
    assert_eq!(
        raw["records"][1]["cover_uri"],
        "content://media/external/images/7"
    );
}

#[test]
fn test_other_schema_version_is_discarded() {
    let (dir, backend) = setup();
    fs::write(
        dir.path().join("mangas.json"),
        r#"{"schema_version": 1, "next_id": 9, "records": [{"id": 4, "title": "Old", "author": "Layout"}]}"#,
    )
    .unwrap();

    let index = backend.load_index().unwrap();
    assert!(index.records.is_empty());
    assert_eq!(index.next_id, 1);
}

#[test]
fn test_unversioned_file_is_discarded() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("mangas.json"), "[]").unwrap();
    assert_eq!(backend.load_index().unwrap(), RecordIndex::default());
}

#[test]
fn test_corrupt_file_is_an_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("mangas.json"), "{ not json").unwrap();
    assert!(backend.load_index().is_err());
}

#[test]
fn test_failed_rename_leaves_no_tmp_file() {
    let (dir, backend) = setup();
    // A non-empty directory where the index file should be makes the rename fail.
    let blocker = dir.path().join("mangas.json");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), "x").unwrap();

    assert!(backend.save_index(&sample_index()).is_err());

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}
