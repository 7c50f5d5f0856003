//! In-memory backend.
//!
//! A mutex-guarded map keyed by the full location string. It implements the
//! whole capability set, which makes it the natural stand-in for the DFS or
//! FTP collaborator in tests and a scratch filesystem for embedding. Its
//! archive operation simply concatenates the sources into the destination
//! entry; real archive formats are the business of a real collaborator.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::time::SystemTime;

use super::{Backend, Op};
use crate::errors::{FilexError, Result};

#[derive(Debug, Clone)]
struct Entry {
    data: Vec<u8>,
    mtime: SystemTime,
    mode: Option<u32>,
}

#[derive(Debug, Default)]
struct Store {
    files: BTreeMap<String, Entry>,
    dirs: BTreeSet<String>,
}

/// In-memory capability provider.
#[derive(Debug, Default)]
pub struct MemoryFs {
    inner: Mutex<Store>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of file entries held (test convenience).
    pub fn len(&self) -> usize {
        self.lock().files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recorded mode bits for a path, if `chmod` was ever applied.
    pub fn mode_of(&self, path: &str) -> Option<u32> {
        self.lock().files.get(path).and_then(|e| e.mode)
    }

    /// Recorded mtime for a path.
    pub fn mtime_of(&self, path: &str) -> Option<SystemTime> {
        self.lock().files.get(path).map(|e| e.mtime)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        // A poisoned lock means a previous test panicked mid-mutation;
        // the data is still usable for inspection.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn parent_of(path: &str) -> &str {
        // Never split inside a scheme prefix; `dfs://host` is a root.
        let start = path.find("://").map(|i| i + 3).unwrap_or(0);
        match path[start..].rfind('/') {
            Some(idx) => &path[..start + idx],
            None => "",
        }
    }
}

impl Backend for MemoryFs {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn supports(&self, _op: Op) -> bool {
        true
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.lock()
            .files
            .get(path)
            .map(|e| e.data.clone())
            .ok_or_else(|| FilexError::NotFound(path.to_string()))
    }

    fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        self.lock().files.insert(
            path.to_string(),
            Entry {
                data: data.to_vec(),
                mtime: SystemTime::now(),
                mode: None,
            },
        );
        Ok(())
    }

    fn copy(&self, from: &str, to: &str) -> Result<()> {
        let mut store = self.lock();
        let entry = store
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| FilexError::NotFound(from.to_string()))?;
        store.files.insert(to.to_string(), entry);
        Ok(())
    }

    fn rename(&self, from: &str, to: &str) -> Result<()> {
        let mut store = self.lock();
        let entry = store
            .files
            .remove(from)
            .ok_or_else(|| FilexError::NotFound(from.to_string()))?;
        store.files.insert(to.to_string(), entry);
        Ok(())
    }

    fn remove(&self, path: &str) -> Result<()> {
        self.lock()
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FilexError::NotFound(path.to_string()))
    }

    fn remove_all(&self, path: &str, force: bool) -> Result<()> {
        let mut store = self.lock();
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let before = store.files.len() + store.dirs.len();
        store
            .files
            .retain(|k, _| k != path && !k.starts_with(&prefix));
        store.dirs.retain(|d| d != path && !d.starts_with(&prefix));
        let removed = before != store.files.len() + store.dirs.len();
        if removed || force {
            Ok(())
        } else {
            Err(FilexError::NotFound(path.to_string()))
        }
    }

    fn list(&self, pattern: &str) -> Result<Vec<String>> {
        let store = self.lock();
        let prefix = pattern.trim_end_matches('*');
        Ok(store
            .files
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    fn mkdir(&self, path: &str) -> Result<()> {
        self.lock().dirs.insert(path.to_string());
        Ok(())
    }

    fn mkdir_all(&self, path: &str) -> Result<()> {
        let mut store = self.lock();
        let mut cur = path;
        while !cur.is_empty() {
            store.dirs.insert(cur.to_string());
            cur = Self::parent_of(cur);
        }
        Ok(())
    }

    fn chmod(&self, mode: u32, path: &str) -> Result<()> {
        let mut store = self.lock();
        match store.files.get_mut(path) {
            Some(entry) => {
                entry.mode = Some(mode);
                Ok(())
            }
            None => Err(FilexError::NotFound(path.to_string())),
        }
    }

    fn touch(&self, path: &str, mtime: SystemTime) -> Result<()> {
        let mut store = self.lock();
        store
            .files
            .entry(path.to_string())
            .or_insert_with(|| Entry {
                data: Vec::new(),
                mtime,
                mode: None,
            })
            .mtime = mtime;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        let store = self.lock();
        store.files.contains_key(path) || store.dirs.contains(path)
    }

    fn is_dir(&self, path: &str) -> bool {
        self.lock().dirs.contains(path)
    }

    fn archive(&self, dest: &str, sources: &[String]) -> Result<()> {
        let mut bundle = Vec::new();
        for src in sources {
            let data = self.read(src)?;
            bundle.extend_from_slice(&data);
        }
        self.write(dest, &bundle)
    }

    fn most_recently_updated(&self, path: &str, _recursive: bool) -> Result<Option<String>> {
        let store = self.lock();
        let prefix = format!("{}/", path.trim_end_matches('/'));
        Ok(store
            .files
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix) || *k == path)
            .max_by_key(|(_, e)| e.mtime)
            .map(|(k, _)| k.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn write_read_roundtrip() {
        let m = MemoryFs::new();
        m.write("dfs://nas/a.txt", b"hello").unwrap();
        assert_eq!(m.read("dfs://nas/a.txt").unwrap(), b"hello");
        assert!(m.exists("dfs://nas/a.txt"));
    }

    #[test]
    fn read_missing_is_not_found() {
        let m = MemoryFs::new();
        assert!(m.read("dfs://nas/nope").unwrap_err().is_not_found());
    }

    #[test]
    fn rename_moves_the_entry() {
        let m = MemoryFs::new();
        m.write("a", b"1").unwrap();
        m.rename("a", "b").unwrap();
        assert!(!m.exists("a"));
        assert_eq!(m.read("b").unwrap(), b"1");
    }

    #[test]
    fn remove_all_drops_subtree() {
        let m = MemoryFs::new();
        m.mkdir_all("dfs://nas/d/e").unwrap();
        m.write("dfs://nas/d/x", b"x").unwrap();
        m.write("dfs://nas/d/e/y", b"y").unwrap();
        m.write("dfs://nas/other", b"o").unwrap();
        m.remove_all("dfs://nas/d", false).unwrap();
        assert!(!m.exists("dfs://nas/d/x"));
        assert!(!m.exists("dfs://nas/d/e/y"));
        assert!(m.exists("dfs://nas/other"));
    }

    #[test]
    fn archive_concatenates_sources() {
        let m = MemoryFs::new();
        m.write("a", b"one,").unwrap();
        m.write("b", b"two").unwrap();
        m.archive("bundle", &["a".into(), "b".into()]).unwrap();
        assert_eq!(m.read("bundle").unwrap(), b"one,two");
    }

    #[test]
    fn mkdir_all_stops_at_the_scheme_root() {
        let m = MemoryFs::new();
        m.mkdir_all("dfs://nas/a/b").unwrap();
        assert!(m.is_dir("dfs://nas/a/b"));
        assert!(m.is_dir("dfs://nas/a"));
        assert!(m.is_dir("dfs://nas"));
        assert!(!m.is_dir("dfs:/"));
        assert!(!m.is_dir("dfs:"));
    }

    #[test]
    fn chmod_records_mode_bits() {
        let m = MemoryFs::new();
        m.write("f", b"x").unwrap();
        m.chmod(0o640, "f").unwrap();
        assert_eq!(m.mode_of("f"), Some(0o640));
        assert!(m.chmod(0o640, "missing").unwrap_err().is_not_found());
    }

    #[test]
    fn most_recently_updated_tracks_mtime() {
        let m = MemoryFs::new();
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let t1 = SystemTime::UNIX_EPOCH + Duration::from_secs(200);
        m.touch("dfs://nas/d/old", t0).unwrap();
        m.touch("dfs://nas/d/new", t1).unwrap();
        let latest = m.most_recently_updated("dfs://nas/d", true).unwrap();
        assert_eq!(latest.as_deref(), Some("dfs://nas/d/new"));
    }
}
