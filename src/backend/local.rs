//! Local filesystem backend.
//!
//! Thin, synchronous wrappers over `std::fs` with three non-obvious pieces:
//! - `rename` falls back to copy+remove when the direct rename fails
//!   (cross-device moves),
//! - `list` uses glob semantics, listing children when handed an existing
//!   directory,
//! - `most_recently_updated` is a single-pass walk tracking the newest
//!   regular file, non-recursive or recursive.
//!
//! Archiving is not provided locally; in this design it belongs to the DFS
//! collaborator.

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{Backend, Op};
use crate::errors::Result;

/// Local disk capability provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for LocalFs {
    fn name(&self) -> &'static str {
        "local"
    }

    fn supports(&self, op: Op) -> bool {
        !matches!(op, Op::Archive)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        Ok(fs::write(path, data)?)
    }

    fn copy(&self, from: &str, to: &str) -> Result<()> {
        fs::copy(from, to)?;
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) => {
                // Cross-device renames fail; fall back to copy + remove.
                warn!(error = %e, from, to, "rename failed, falling back to copy+remove");
                fs::copy(from, to)?;
                fs::remove_file(from)?;
                Ok(())
            }
        }
    }

    fn remove(&self, path: &str) -> Result<()> {
        Ok(fs::remove_file(path)?)
    }

    fn remove_all(&self, path: &str, force: bool) -> Result<()> {
        let p = Path::new(path);
        let outcome = if p.is_dir() {
            fs::remove_dir_all(p)
        } else {
            fs::remove_file(p)
        };
        match outcome {
            Ok(()) => Ok(()),
            Err(e) if force => {
                debug!(path, error = %e, "forced removal ignored a failure");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        // An existing directory lists its children; anything else is a
        // glob pattern.
        let effective = if Path::new(pattern).is_dir() {
            format!("{}/*", pattern.trim_end_matches('/'))
        } else {
            pattern.to_string()
        };

        let paths = glob::glob(&effective)
            .map_err(|e| crate::errors::FilexError::InvalidInput(e.to_string()))?;

        let mut out = Vec::new();
        for entry in paths {
            match entry {
                Ok(p) => out.push(p.to_string_lossy().into_owned()),
                Err(e) => warn!(pattern = %effective, error = %e, "unreadable glob entry"),
            }
        }
        Ok(out)
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        Ok(fs::create_dir(path)?)
    }

    fn mkdir_all(&self, path: &str) -> Result<()> {
        Ok(fs::create_dir_all(path)?)
    }

    #[cfg(unix)]
    fn chmod(&self, mode: u32, path: &str) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        Ok(fs::set_permissions(path, fs::Permissions::from_mode(mode))?)
    }

    #[cfg(not(unix))]
    fn chmod(&self, _mode: u32, _path: &str) -> Result<()> {
        // Mode bits have no direct mapping off Unix.
        Ok(())
    }

    fn touch(&self, path: &str, mtime: SystemTime) -> Result<()> {
        if !Path::new(path).exists() {
            fs::File::create(path)?;
        }
        filetime::set_file_mtime(path, FileTime::from_system_time(mtime))?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn most_recently_updated(&self, path: &str, recursive: bool) -> Result<Option<String>> {
        let max_depth = if recursive { usize::MAX } else { 1 };

        // Single-pass walk tracking the newest candidate; metadata is
        // fetched once per entry.
        let mut newest: Option<(SystemTime, String)> = None;
        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|r| r.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Ok(meta) = entry.metadata() {
                if let Ok(modified) = meta.modified() {
                    let is_newer = newest
                        .as_ref()
                        .map(|(best, _)| modified > *best)
                        .unwrap_or(true);
                    if is_newer {
                        newest = Some((modified, entry.path().to_string_lossy().into_owned()));
                    }
                }
            }
        }

        Ok(newest.map(|(_, p)| p))
    }
}
