use super::*;
use tempfile::tempdir;

#[test]
fn tail_returns_last_n_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("console.log");
    fs::write(&path, "one\ntwo\nthree\nfour\n").unwrap();

    assert_eq!(tail(&path, 2).unwrap(), "three\nfour");
}

#[test]
fn tail_with_n_exceeding_line_count_returns_whole_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("console.log");
    fs::write(&path, "one\ntwo\n").unwrap();

    assert_eq!(tail(&path, 200).unwrap(), "one\ntwo");
}

#[test]
fn tail_with_zero_lines_returns_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("console.log");
    fs::write(&path, "one\ntwo\n").unwrap();

    assert_eq!(tail(&path, 0).unwrap(), "");
}

#[test]
fn tail_replaces_invalid_utf8_instead_of_failing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("console.log");
    let mut bytes = b"line one\n".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"\nline two\n");
    fs::write(&path, &bytes).unwrap();

    let result = tail(&path, 10).unwrap();
    assert!(result.contains("line one"));
    assert!(result.contains("line two"));
}

#[test]
fn tail_on_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.log");
    assert!(tail(&path, 10).is_err());
}
