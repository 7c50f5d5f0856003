//! Glob-expanded removal: per-entry failures are recorded, never fatal.

use std::fs;

use filex::{FileHub, FilexError};
use tempfile::tempdir;

#[test]
fn glob_remove_tolerates_a_bad_entry() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("a.tmp"), b"a").unwrap();
    fs::write(td.path().join("b.tmp"), b"b").unwrap();
    // A directory matching the pattern cannot be removed by plain remove.
    fs::create_dir(td.path().join("c.tmp")).unwrap();

    let hub = FileHub::builder().working_dir(td.path()).build();
    let outcome = hub
        .remove(&format!("{}/*.tmp", td.path().display()))
        .unwrap();

    assert_eq!(outcome.removed.len(), 2);
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].path.ends_with("c.tmp"));
    assert!(!td.path().join("a.tmp").exists());
    assert!(!td.path().join("b.tmp").exists());
    assert!(td.path().join("c.tmp").exists());
}

#[test]
fn glob_remove_all_takes_directories_too() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("x.old"), b"x").unwrap();
    let dir = td.path().join("y.old");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("inner.txt"), b"i").unwrap();

    let hub = FileHub::builder().working_dir(td.path()).build();
    let outcome = hub
        .remove_all(&format!("{}/*.old", td.path().display()), false)
        .unwrap();

    assert!(outcome.is_clean());
    assert_eq!(outcome.removed.len(), 2);
    assert!(!dir.exists());
}

#[test]
fn glob_with_no_matches_is_an_empty_clean_batch() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let outcome = hub
        .remove(&format!("{}/*.nope", td.path().display()))
        .unwrap();
    assert!(outcome.is_clean());
    assert!(outcome.removed.is_empty());
}

#[test]
fn single_missing_path_is_an_error() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let err = hub
        .remove(&format!("{}/missing.txt", td.path().display()))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn wildcard_in_directory_name_does_not_expand() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    // The wildcard sits above the final component, so this is a literal
    // (missing) path, not a batch.
    let err = hub
        .remove(&format!("{}/star*dir/file.txt", td.path().display()))
        .unwrap_err();
    assert!(matches!(err, FilexError::Io(_)));
}
