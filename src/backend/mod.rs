//! Backend capability surface.
//!
//! One trait per storage medium, all sharing the same operation set. Not
//! every backend implements every capability (HTTP only reads); the
//! dispatcher consults `supports` before invoking anything, so an
//! unsupported call is a contract violation caught up front, not a runtime
//! backend error. Default method bodies return the same typed error as a
//! backstop.

pub mod http;
pub mod local;
pub mod memory;

use std::fmt;
use std::time::SystemTime;

use crate::errors::{FilexError, Result};

/// The closed set of operations a backend may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Read,
    Write,
    Copy,
    Rename,
    Remove,
    RemoveAll,
    List,
    Mkdir,
    MkdirAll,
    Chmod,
    Touch,
    Exists,
    IsDir,
    Archive,
    RecentlyUpdated,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Op::Read => "read",
            Op::Write => "write",
            Op::Copy => "copy",
            Op::Rename => "rename",
            Op::Remove => "remove",
            Op::RemoveAll => "recursive remove",
            Op::List => "list",
            Op::Mkdir => "mkdir",
            Op::MkdirAll => "recursive mkdir",
            Op::Chmod => "chmod",
            Op::Touch => "touch",
            Op::Exists => "existence check",
            Op::IsDir => "directory check",
            Op::Archive => "archive",
            Op::RecentlyUpdated => "recently-updated scan",
        };
        f.write_str(s)
    }
}

/// A capability provider for one storage medium.
///
/// Paths are plain strings rather than `Path`s: remote backends receive the
/// full scheme-prefixed location (`dfs://host/a/b`), local ones a normalized
/// filesystem path.
pub trait Backend: Send + Sync {
    /// Short name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Capability descriptor consulted by the dispatcher before any call.
    fn supports(&self, op: Op) -> bool;

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Err(self.unsupported_at(Op::Read, path))
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let _ = data;
        Err(self.unsupported_at(Op::Write, path))
    }

    fn copy(&self, from: &str, to: &str) -> Result<()> {
        let _ = (from, to);
        Err(self.unsupported(Op::Copy))
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let _ = (from, to);
        Err(self.unsupported(Op::Rename))
    }

    fn remove(&self, path: &str) -> Result<()> {
        Err(self.unsupported_at(Op::Remove, path))
    }

    /// Recursive removal. `force` suppresses per-path failures the way a
    /// forced removal is expected to.
    fn remove_all(&self, path: &str, force: bool) -> Result<()> {
        let _ = force;
        Err(self.unsupported_at(Op::RemoveAll, path))
    }

    /// List entries matching a glob-style pattern (or the children of an
    /// existing directory).
    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        Err(self.unsupported_at(Op::List, pattern))
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        Err(self.unsupported_at(Op::Mkdir, path))
    }

    fn mkdir_all(&self, path: &str) -> Result<()> {
        Err(self.unsupported_at(Op::MkdirAll, path))
    }

    fn chmod(&self, mode: u32, path: &str) -> Result<()> {
        let _ = mode;
        Err(self.unsupported_at(Op::Chmod, path))
    }

    fn touch(&self, path: &str, mtime: SystemTime) -> Result<()> {
        let _ = mtime;
        Err(self.unsupported_at(Op::Touch, path))
    }

    fn exists(&self, path: &str) -> bool {
        let _ = path;
        false
    }

    fn is_dir(&self, path: &str) -> bool {
        let _ = path;
        false
    }

    /// Bundle `sources` into an archive at `dest`. Formats are the
    /// backend's business.
    fn archive(&self, dest: &str, sources: &[String]) -> Result<()> {
        let _ = sources;
        Err(self.unsupported_at(Op::Archive, dest))
    }

    /// Most recently modified entry under `path`, or `None` when empty.
    fn most_recently_updated(&self, path: &str, recursive: bool) -> Result<Option<String>> {
        let _ = recursive;
        Err(self.unsupported_at(Op::RecentlyUpdated, path))
    }
}

/// Private helpers shared by the default bodies above.
trait UnsupportedExt {
    fn unsupported(&self, op: Op) -> FilexError;
    fn unsupported_at(&self, op: Op, path: &str) -> FilexError;
}

impl<B: Backend + ?Sized> UnsupportedExt for B {
    fn unsupported(&self, op: Op) -> FilexError {
        FilexError::Unsupported {
            backend: self.name(),
            op,
        }
    }

    fn unsupported_at(&self, op: Op, path: &str) -> FilexError {
        tracing::debug!(backend = self.name(), %op, path, "unsupported operation");
        self.unsupported(op)
    }
}
