use super::*;
use serde::Deserialize;
use tempfile::tempdir;

#[derive(Serialize, Deserialize, PartialEq, Debug)]
struct Doc {
    a: u32,
}

#[test]
fn write_json_creates_parent_dirs_and_no_leftover_tmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/doc.json");

    write_json(&path, &Doc { a: 1 }).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let read: Doc = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read, Doc { a: 1 });
}

#[test]
fn write_json_overwrites_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.json");

    write_json(&path, &Doc { a: 1 }).unwrap();
    write_json(&path, &Doc { a: 2 }).unwrap();

    let read: Doc = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(read, Doc { a: 2 });
}
