//! Touch semantics: creation, explicit mtimes, idempotence.

use std::time::{Duration, SystemTime};

use filex::FileHub;
use tempfile::tempdir;

#[test]
fn touch_creates_a_missing_file() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    hub.touch("fresh.txt", None).unwrap();
    assert!(td.path().join("fresh.txt").is_file());
}

#[test]
fn touch_with_same_mtime_is_idempotent() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);

    hub.touch("stamp.txt", Some(when)).unwrap();
    let first = std::fs::metadata(td.path().join("stamp.txt"))
        .unwrap()
        .modified()
        .unwrap();

    hub.touch("stamp.txt", Some(when)).unwrap();
    let second = std::fs::metadata(td.path().join("stamp.txt"))
        .unwrap()
        .modified()
        .unwrap();

    assert_eq!(first, when);
    assert_eq!(second, when);
}

#[test]
fn touch_preserves_existing_content() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    hub.write("kept.txt", b"keep me").unwrap();
    hub.touch("kept.txt", Some(SystemTime::now())).unwrap();
    assert_eq!(std::fs::read(td.path().join("kept.txt")).unwrap(), b"keep me");
}
