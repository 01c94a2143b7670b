use super::*;

#[test]
fn paths_are_nested_under_root() {
    let layout = Layout::new("/tmp/sessions");
    assert_eq!(layout.queue_path(), PathBuf::from("/tmp/sessions/queue.json"));
    assert_eq!(
        layout.metadata_path("a"),
        PathBuf::from("/tmp/sessions/a/metadata.json")
    );
    assert_eq!(
        layout.artifacts_dir("a"),
        PathBuf::from("/tmp/sessions/a/artifacts")
    );
    assert_eq!(
        layout.run_once_script_path("a"),
        PathBuf::from("/tmp/sessions/a/run-once.sh")
    );
}
