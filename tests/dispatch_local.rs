//! Local dispatch of the plain file operations.

use std::fs;

use assert_fs::prelude::*;
use filex::{FileHub, FilexError};

fn hub_in(td: &assert_fs::TempDir) -> FileHub {
    FileHub::builder().working_dir(td.path()).build()
}

#[test]
fn write_then_exists_and_copy() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = hub_in(&td);

    hub.write("a.txt", b"payload").unwrap();
    assert!(hub.exists("a.txt").unwrap());

    hub.copy("a.txt", "b.txt").unwrap();
    assert_eq!(fs::read(td.path().join("b.txt")).unwrap(), b"payload");
    assert!(td.path().join("a.txt").exists());
}

#[test]
fn rename_moves_the_file() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = hub_in(&td);

    hub.write("src.txt", b"content").unwrap();
    hub.rename("src.txt", "dst.txt").unwrap();
    assert!(!td.path().join("src.txt").exists());
    assert_eq!(fs::read(td.path().join("dst.txt")).unwrap(), b"content");
}

#[test]
fn mkdir_and_is_directory() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = hub_in(&td);

    hub.mkdir("sub").unwrap();
    assert!(hub.is_directory("sub").unwrap());
    assert!(!hub.is_directory("nope").unwrap());

    hub.mkdir_all("deep/nested/dir").unwrap();
    assert!(td.path().join("deep/nested/dir").is_dir());
}

#[test]
fn list_matches_glob() {
    let td = assert_fs::TempDir::new().unwrap();
    td.child("one.log").write_str("1").unwrap();
    td.child("two.log").write_str("2").unwrap();
    td.child("three.txt").write_str("3").unwrap();

    let hub = hub_in(&td);
    let mut logs = hub.list("*.log").unwrap();
    logs.sort();
    assert_eq!(logs.len(), 2);
    assert!(logs.iter().all(|p| p.ends_with(".log")));
}

#[cfg(unix)]
#[test]
fn chmod_applies_mode_bits() {
    use std::os::unix::fs::PermissionsExt;

    let td = assert_fs::TempDir::new().unwrap();
    let hub = hub_in(&td);
    hub.write("locked.txt", b"x").unwrap();
    hub.chmod(0o600, "locked.txt").unwrap();

    let mode = fs::metadata(td.path().join("locked.txt"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn write_to_http_location_is_refused_up_front() {
    let hub = FileHub::new();
    let err = hub.write("https://example.com/x", b"nope").unwrap_err();
    assert!(matches!(err, FilexError::Unsupported { backend: "http", .. }));
}

#[test]
fn file_prefix_targets_local_backend() {
    let td = assert_fs::TempDir::new().unwrap();
    let hub = hub_in(&td);
    let dest = format!("file://{}/via-prefix.txt", td.path().display());
    hub.write(&dest, b"prefixed write").unwrap();
    assert_eq!(
        fs::read(td.path().join("via-prefix.txt")).unwrap(),
        b"prefixed write"
    );
}
