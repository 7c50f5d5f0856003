//! The dispatcher: one façade over all backends.
//!
//! Each public operation classifies its path arguments, checks the resolved
//! backend's capability descriptor, and delegates. Backend failures
//! propagate unchanged; the only tolerated failures are per-entry errors in
//! a glob-expanded removal batch, which are logged and recorded rather than
//! aborting the remainder.
//!
//! Calls are synchronous and block until the backend finishes. The hub owns
//! its session, so concurrent multi-target use means one hub per target (or
//! scheme-prefixed absolute locations throughout).

use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info, warn};

use crate::backend::http::HttpFetch;
use crate::backend::local::LocalFs;
use crate::backend::{Backend, Op};
use crate::errors::{FilexError, Result};
use crate::location::{Location, Scheme, classify};
use crate::session::Session;

/// Result of a (possibly glob-expanded) removal. The operation as a whole
/// succeeds even when individual entries fail; callers inspect `failures`.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub removed: Vec<String>,
    pub failures: Vec<BatchFailure>,
}

#[derive(Debug)]
pub struct BatchFailure {
    pub path: String,
    pub error: FilexError,
}

impl BatchOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Unified file-access façade over local disk, DFS, FTP and HTTP.
pub struct FileHub {
    local: Arc<dyn Backend>,
    http: HttpFetch,
    dfs: Option<Arc<dyn Backend>>,
    ftp: Option<Arc<dyn Backend>>,
    session: Session,
}

/// Builder wiring collaborator clients into a hub. Local disk and HTTP are
/// always present; DFS and FTP clients are injected by the embedder.
#[derive(Default)]
pub struct FileHubBuilder {
    dfs: Option<Arc<dyn Backend>>,
    ftp: Option<Arc<dyn Backend>>,
    session: Option<Session>,
}

impl FileHubBuilder {
    pub fn dfs(mut self, client: Arc<dyn Backend>) -> Self {
        self.dfs = Some(client);
        self
    }

    pub fn ftp(mut self, client: Arc<dyn Backend>) -> Self {
        self.ftp = Some(client);
        self
    }

    /// Root the session at an explicit local directory instead of the
    /// process cwd.
    pub fn working_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        self.session = Some(Session::with_local_dir(dir));
        self
    }

    pub fn build(self) -> FileHub {
        FileHub {
            local: Arc::new(LocalFs::new()),
            http: HttpFetch::new(),
            dfs: self.dfs,
            ftp: self.ftp,
            session: self.session.unwrap_or_default(),
        }
    }
}

impl Default for FileHub {
    fn default() -> Self {
        Self::new()
    }
}

impl FileHub {
    /// Hub with local disk and HTTP only.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> FileHubBuilder {
        FileHubBuilder::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn http(&self) -> &HttpFetch {
        &self.http
    }

    pub(crate) fn classify(&self, input: &str) -> Location {
        classify(input, &self.session)
    }

    fn backend_for(&self, scheme: Scheme) -> Result<&dyn Backend> {
        match scheme {
            Scheme::Local => Ok(&*self.local),
            Scheme::Http | Scheme::Https => Ok(&self.http),
            Scheme::Dfs => self
                .dfs
                .as_deref()
                .ok_or(FilexError::BackendUnavailable(Scheme::Dfs)),
            Scheme::Ftp => self
                .ftp
                .as_deref()
                .ok_or(FilexError::BackendUnavailable(Scheme::Ftp)),
        }
    }

    /// Resolve the backend for a scheme and verify the capability before
    /// any backend call is made.
    pub(crate) fn dispatch(&self, scheme: Scheme, op: Op) -> Result<&dyn Backend> {
        let backend = self.backend_for(scheme)?;
        if !backend.supports(op) {
            return Err(FilexError::Unsupported {
                backend: backend.name(),
                op,
            });
        }
        Ok(backend)
    }

    fn ensure_non_empty(location: &str) -> Result<()> {
        if location.trim().is_empty() {
            return Err(FilexError::InvalidInput(
                "empty string, expected a location".into(),
            ));
        }
        Ok(())
    }

    /// Write `data` to a location on whichever backend owns it. A
    /// local-classified target whose parent directory is missing locally
    /// but present on DFS is diverted there, mirroring the last-chance
    /// probe on the read path.
    pub fn write(&self, location: &str, data: &[u8]) -> Result<()> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        if loc.scheme == Scheme::Local
            && let Some(dfs) = self.dfs_write_fallback(&loc)
        {
            debug!(location, "local parent missing, writing to dfs");
            return dfs.write(&loc.raw, data);
        }
        debug!(location, scheme = %loc.scheme, "write");
        self.dispatch(loc.scheme, Op::Write)?.write(&loc.path, data)
    }

    /// The DFS collaborator, when the local parent directory of a write
    /// target does not exist but its parent on DFS does.
    fn dfs_write_fallback(&self, loc: &Location) -> Option<&dyn Backend> {
        if Path::new(&loc.path).parent().is_some_and(Path::exists) {
            return None;
        }
        let dfs = self.dfs.as_deref()?;
        let parent = Path::new(&loc.raw).parent()?.to_str()?;
        if !parent.is_empty() && dfs.supports(Op::Write) && dfs.is_dir(parent) {
            Some(dfs)
        } else {
            None
        }
    }

    /// Copy `from` to `to`. Cross-backend copies are not supported: when
    /// the operands mix schemes, the first non-local scheme encountered is
    /// the authoritative backend; each operand is handed over in its
    /// classified, normalized form.
    pub fn copy(&self, from: &str, to: &str) -> Result<()> {
        self.transfer(from, to, Op::Copy)
    }

    /// Move `from` to `to`, with the same operand rules as `copy`.
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        self.transfer(from, to, Op::Rename)
    }

    fn transfer(&self, from: &str, to: &str, op: Op) -> Result<()> {
        Self::ensure_non_empty(from)?;
        Self::ensure_non_empty(to)?;
        let a = self.classify(from);
        let b = self.classify(to);

        let scheme = [a.scheme, b.scheme]
            .into_iter()
            .find(Scheme::is_remote)
            .unwrap_or(Scheme::Local);
        let backend = self.dispatch(scheme, op)?;
        debug!(from, to, %scheme, %op, "transfer");

        // Each operand was classified independently; the backend always
        // gets the normalized path, so names resolved against a remote
        // session working directory stay resolved.
        match op {
            Op::Copy => backend.copy(&a.path, &b.path),
            Op::Rename => backend.rename(&a.path, &b.path),
            _ => unreachable!("transfer only handles copy and rename"),
        }
    }

    /// Remove a single path, or every match when the final component of a
    /// local target contains a wildcard.
    pub fn remove(&self, location: &str) -> Result<BatchOutcome> {
        self.remove_inner(location, None)
    }

    /// Recursive removal; glob expansion and batch tolerance as `remove`.
    pub fn remove_all(&self, location: &str, force: bool) -> Result<BatchOutcome> {
        self.remove_inner(location, Some(force))
    }

    fn remove_inner(&self, location: &str, recursive: Option<bool>) -> Result<BatchOutcome> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        let op = if recursive.is_some() {
            Op::RemoveAll
        } else {
            Op::Remove
        };
        let backend = self.dispatch(loc.scheme, op)?;

        let remove_one = |path: &str| match recursive {
            Some(force) => backend.remove_all(path, force),
            None => backend.remove(path),
        };

        if loc.scheme == Scheme::Local && has_wildcard(&loc.path) {
            // Expand first, then delete entry by entry. One bad entry is a
            // recorded warning, never an abort of the whole batch.
            let mut outcome = BatchOutcome::default();
            let matches = glob::glob(&loc.path)
                .map_err(|e| FilexError::InvalidInput(e.to_string()))?;
            for entry in matches {
                let path = match entry {
                    Ok(p) => p.to_string_lossy().into_owned(),
                    Err(e) => {
                        let path = e.path().to_string_lossy().into_owned();
                        let error = FilexError::Io(e.into());
                        outcome.failures.push(BatchFailure { path, error });
                        continue;
                    }
                };
                match remove_one(&path) {
                    Ok(()) => outcome.removed.push(path),
                    Err(error) => {
                        warn!(path = %path, %error, "removal failed, continuing batch");
                        outcome.failures.push(BatchFailure { path, error });
                    }
                }
            }
            info!(
                pattern = %loc.path,
                removed = outcome.removed.len(),
                failed = outcome.failures.len(),
                "glob removal finished"
            );
            return Ok(outcome);
        }

        remove_one(&loc.path)?;
        Ok(BatchOutcome {
            removed: vec![loc.path],
            failures: Vec::new(),
        })
    }

    /// List entries matching a glob pattern, or the children of a
    /// directory.
    pub fn list(&self, pattern: &str) -> Result<Vec<String>> {
        Self::ensure_non_empty(pattern)?;
        let loc = self.classify(pattern);
        self.dispatch(loc.scheme, Op::List)?.list(&loc.path)
    }

    pub fn mkdir(&self, location: &str) -> Result<()> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        self.dispatch(loc.scheme, Op::Mkdir)?.mkdir(&loc.path)
    }

    pub fn mkdir_all(&self, location: &str) -> Result<()> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        self.dispatch(loc.scheme, Op::MkdirAll)?.mkdir_all(&loc.path)
    }

    pub fn chmod(&self, mode: u32, location: &str) -> Result<()> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        self.dispatch(loc.scheme, Op::Chmod)?.chmod(mode, &loc.path)
    }

    /// Create or update the modification time of a file. Under a remote
    /// session the name resolves against the session working directory
    /// before anything else, matching relative-addressing semantics.
    pub fn touch(&self, location: &str, mtime: Option<SystemTime>) -> Result<()> {
        Self::ensure_non_empty(location)?;
        let when = mtime.unwrap_or_else(SystemTime::now);

        if self.session.is_remote() {
            let resolved = self.session.resolve_remote(location);
            debug!(location, resolved = %resolved, "touch under remote session");
            return self.dispatch(Scheme::Dfs, Op::Touch)?.touch(&resolved, when);
        }

        let loc = self.classify(location);
        self.dispatch(loc.scheme, Op::Touch)?.touch(&loc.path, when)
    }

    pub fn exists(&self, location: &str) -> Result<bool> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        Ok(self.dispatch(loc.scheme, Op::Exists)?.exists(&loc.path))
    }

    pub fn is_directory(&self, location: &str) -> Result<bool> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        Ok(self.dispatch(loc.scheme, Op::IsDir)?.is_dir(&loc.path))
    }

    /// Bundle `sources` into an archive at `dest` on the backend owning
    /// `dest`. The local backend does not archive; the DFS collaborator
    /// does.
    pub fn archive(&self, dest: &str, sources: &[String]) -> Result<()> {
        Self::ensure_non_empty(dest)?;
        let loc = self.classify(dest);
        self.dispatch(loc.scheme, Op::Archive)?
            .archive(&loc.path, sources)
    }

    /// Most recently modified entry directly under `path`.
    pub fn recently_updated(&self, path: &str) -> Result<Option<String>> {
        self.recent(path, false)
    }

    /// Most recently modified entry anywhere under `path`.
    pub fn recently_updated_recursive(&self, path: &str) -> Result<Option<String>> {
        self.recent(path, true)
    }

    fn recent(&self, path: &str, recursive: bool) -> Result<Option<String>> {
        Self::ensure_non_empty(path)?;
        let loc = self.classify(path);
        self.dispatch(loc.scheme, Op::RecentlyUpdated)?
            .most_recently_updated(&loc.path, recursive)
    }

    /// Whether `source` names somewhere content could be written back to:
    /// a single-line existing local path, or a DFS location. Multi-line
    /// input is content, not a reference, and no other remote scheme
    /// accepts writes here.
    pub fn is_writeable(&self, source: &str) -> bool {
        if source.lines().count() > 1 {
            return false;
        }
        if !source.contains("://") {
            let loc = self.classify(source);
            loc.scheme == Scheme::Local && Path::new(&loc.path).exists()
        } else {
            source.starts_with("dfs://")
        }
    }

    /// Change the session's active backend and working directory. Local
    /// targets must exist; `dfs://host/dir` switches the session to that
    /// host. Other schemes cannot be a working directory.
    pub fn chdir(&mut self, location: &str) -> Result<()> {
        Self::ensure_non_empty(location)?;
        let loc = self.classify(location);
        match loc.scheme {
            Scheme::Local => {
                let p = Path::new(&loc.path);
                if !p.is_dir() {
                    return Err(FilexError::InvalidInput(format!(
                        "not a directory: {location}"
                    )));
                }
                let canon = dunce::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
                info!(dir = %canon.display(), "session now local");
                self.session.enter_local(canon);
                Ok(())
            }
            Scheme::Dfs => {
                let rest = loc.path.trim_start_matches("dfs://");
                let (host, dir) = match rest.find('/') {
                    Some(idx) => (&rest[..idx], &rest[idx..]),
                    None => (rest, "/"),
                };
                if host.is_empty() {
                    return Err(FilexError::InvalidInput(format!(
                        "dfs location missing a host: {location}"
                    )));
                }
                info!(host, dir, "session now dfs");
                self.session.enter_dfs(host.to_string(), dir.to_string());
                Ok(())
            }
            other => Err(FilexError::InvalidInput(format!(
                "cannot chdir to a {other} location"
            ))),
        }
    }

    /// The session working directory, scheme-prefixed when remote.
    pub fn pwd(&self) -> String {
        self.session.pwd()
    }
}

/// Wildcard detection looks at the final path component only, so a literal
/// `*` in a directory name higher up does not trigger expansion.
fn has_wildcard(path: &str) -> bool {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.contains('*'))
        .unwrap_or(false)
}
