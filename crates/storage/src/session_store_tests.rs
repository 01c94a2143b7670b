use super::*;
use chrono::Utc;
use tempfile::tempdir;
use tmuxd_core::SessionType;

fn sample(name: &str) -> Session {
    Session::new(
        name,
        SessionType::LongRunning,
        "",
        "bash",
        None,
        format!("/tmp/{name}/artifacts").into(),
        format!("/tmp/{name}/console.log").into(),
        Utc::now(),
    )
}

#[test]
fn save_then_load_round_trips_modulo_runtime() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(Layout::new(dir.path()));

    let session = sample("a");
    store.save(&session).unwrap();

    let loaded = store.load("a").unwrap();
    assert!(loaded.eq_ignoring_runtime(&session));
}

#[test]
fn list_skips_unparseable_metadata() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(Layout::new(dir.path()));

    store.save(&sample("good")).unwrap();

    let bad_dir = dir.path().join("bad");
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("metadata.json"), "{ not json").unwrap();

    let sessions = store.list().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].name, "good");
}

#[test]
fn list_on_missing_root_returns_empty() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(Layout::new(dir.path().join("does-not-exist")));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn exists_reflects_metadata_presence() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(Layout::new(dir.path()));
    assert!(!store.exists("a"));
    store.save(&sample("a")).unwrap();
    assert!(store.exists("a"));
}

#[test]
fn delete_removes_session_directory() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(Layout::new(dir.path()));
    store.save(&sample("a")).unwrap();
    store.delete("a").unwrap();
    assert!(!store.exists("a"));
}

#[test]
fn load_rejects_newer_schema_version() {
    let dir = tempdir().unwrap();
    let store = SessionStore::new(Layout::new(dir.path()));
    let layout = Layout::new(dir.path());
    let path = layout.metadata_path("a");
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut session = sample("a");
    session.schema_version = tmuxd_core::SCHEMA_VERSION + 1;
    fs::write(&path, serde_json::to_string(&session).unwrap()).unwrap();

    let err = store.load("a").unwrap_err();
    assert!(matches!(
        err,
        StorageError::UnsupportedSchemaVersion { .. }
    ));
}
