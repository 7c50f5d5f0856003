//! Archive dispatch: local refuses, the DFS collaborator handles it.

use std::sync::Arc;

use filex::{Backend, FileHub, FilexError, MemoryFs, Op};
use tempfile::tempdir;

#[test]
fn local_archive_is_unsupported() {
    let td = tempdir().unwrap();
    let hub = FileHub::builder().working_dir(td.path()).build();
    let err = hub
        .archive("bundle.zip", &["a.txt".to_string()])
        .unwrap_err();
    assert!(matches!(
        err,
        FilexError::Unsupported {
            backend: "local",
            op: Op::Archive
        }
    ));
}

#[test]
fn dfs_archive_bundles_sources() {
    let mem = Arc::new(MemoryFs::new());
    mem.write("dfs://nas/a.txt", b"alpha ").unwrap();
    mem.write("dfs://nas/b.txt", b"beta").unwrap();

    let hub = FileHub::builder().dfs(mem.clone()).build();
    hub.archive(
        "dfs://nas/bundle.bin",
        &["dfs://nas/a.txt".to_string(), "dfs://nas/b.txt".to_string()],
    )
    .unwrap();

    assert_eq!(mem.read("dfs://nas/bundle.bin").unwrap(), b"alpha beta");
}

#[test]
fn archive_with_a_missing_source_fails() {
    let mem = Arc::new(MemoryFs::new());
    let hub = FileHub::builder().dfs(mem).build();
    let err = hub
        .archive("dfs://nas/bundle.bin", &["dfs://nas/ghost.txt".to_string()])
        .unwrap_err();
    assert!(err.is_not_found());
}
