//! Session context: the currently active backend and working directory.
//!
//! An explicit value owned by the dispatcher and threaded into
//! classification, so tests get a fresh session per hub and concurrent hubs
//! never race.
//! The only transition is `chdir`, which updates scheme and working
//! directory together.

use std::env;
use std::path::{Path, PathBuf};

/// Which backend bare relative paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionScheme {
    /// Relative paths resolve against the local working directory.
    Local,
    /// Relative paths resolve against a directory on a DFS host.
    Dfs { host: String },
}

/// Mutable per-hub state: active scheme plus working directories.
///
/// The local working directory is kept even while the session points at a
/// remote host, so switching back to local resumes where it left off.
#[derive(Debug, Clone)]
pub struct Session {
    scheme: SessionScheme,
    local_dir: PathBuf,
    remote_dir: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session: local scheme, working directory = process cwd.
    pub fn new() -> Self {
        Self {
            scheme: SessionScheme::Local,
            local_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            remote_dir: String::from("/"),
        }
    }

    /// Session rooted at an explicit local directory (useful in tests and
    /// embedding, where depending on the process cwd is undesirable).
    pub fn with_local_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            local_dir: dir.into(),
            ..Self::new()
        }
    }

    pub fn scheme(&self) -> &SessionScheme {
        &self.scheme
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self.scheme, SessionScheme::Local)
    }

    /// Local directory that relative local paths resolve against.
    pub fn local_dir(&self) -> &Path {
        &self.local_dir
    }

    /// Switch to the local scheme rooted at `dir`. The single state
    /// transition updates scheme and directory together.
    pub(crate) fn enter_local(&mut self, dir: PathBuf) {
        self.scheme = SessionScheme::Local;
        self.local_dir = dir;
    }

    /// Switch to a DFS host and directory.
    pub(crate) fn enter_dfs(&mut self, host: String, dir: String) {
        let dir = if dir.is_empty() {
            String::from("/")
        } else if dir.starts_with('/') {
            dir
        } else {
            format!("/{dir}")
        };
        self.scheme = SessionScheme::Dfs { host };
        self.remote_dir = dir;
    }

    /// Printable working directory: a plain path for local sessions, the
    /// full `dfs://host/dir` form for remote ones.
    pub fn pwd(&self) -> String {
        match &self.scheme {
            SessionScheme::Local => self.local_dir.display().to_string(),
            SessionScheme::Dfs { host } => format!("dfs://{host}{}", self.remote_dir),
        }
    }

    /// Resolve a bare name against the remote working directory, producing a
    /// full scheme-prefixed location. Absolute inputs keep only the host.
    pub(crate) fn resolve_remote(&self, name: &str) -> String {
        match &self.scheme {
            SessionScheme::Local => name.to_string(),
            SessionScheme::Dfs { host } => {
                if name.starts_with('/') {
                    format!("dfs://{host}{name}")
                } else if self.remote_dir.ends_with('/') {
                    format!("dfs://{host}{}{name}", self.remote_dir)
                } else {
                    format!("dfs://{host}{}/{name}", self.remote_dir)
                }
            }
        }
    }
}
