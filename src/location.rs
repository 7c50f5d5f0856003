//! Location classification: turning an untyped location string into a
//! scheme plus normalized path, without performing I/O beyond one local
//! existence probe used as a tie-breaker.
//!
//! The decision order is load-bearing: inputs can match several patterns
//! and callers depend on which one wins:
//! 1. recognized scheme prefix (`dfs`/`ftp`/`http`/`https`)
//! 2. `file://` prefix -> local, prefix stripped
//! 3. local parent-directory probe -> local (beats a remote session)
//! 4. remote session -> resolve against the session working directory
//! 5. default local, even for paths that do not exist yet

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::session::Session;

/// The backend that owns a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Local,
    Dfs,
    Ftp,
    Http,
    Https,
}

impl Scheme {
    pub fn is_remote(&self) -> bool {
        !matches!(self, Scheme::Local)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scheme::Local => "local",
            Scheme::Dfs => "dfs",
            Scheme::Ftp => "ftp",
            Scheme::Http => "http",
            Scheme::Https => "https",
        };
        f.write_str(s)
    }
}

/// A classified location: owning scheme, the caller's original string, and
/// the path to hand to the backend (full URL form for remote schemes, a
/// normalized filesystem path for local ones).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub scheme: Scheme,
    pub raw: String,
    pub path: String,
}

impl Location {
    fn local(raw: &str, path: PathBuf) -> Self {
        Self {
            scheme: Scheme::Local,
            raw: raw.to_string(),
            path: path.to_string_lossy().into_owned(),
        }
    }

    fn remote(scheme: Scheme, raw: &str, path: String) -> Self {
        Self {
            scheme,
            raw: raw.to_string(),
            path,
        }
    }
}

/// Split off a leading `token://` scheme prefix. Only a prefix counts: a
/// `://` later in the string (say, inside a filename) never triggers scheme
/// dispatch. The token must be word-like, mirroring the `^\w+://` shape.
pub(crate) fn scheme_prefix(s: &str) -> Option<(&str, &str)> {
    let idx = s.find("://")?;
    let token = &s[..idx];
    if token.is_empty() {
        return None;
    }
    if !token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    Some((token, &s[idx + 3..]))
}

/// Expand a leading `~` to the user's home directory.
pub(crate) fn expand_tilde(s: &str) -> PathBuf {
    if let Some(rest) = s.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if s == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(s)
}

/// Normalize a local path string: tilde expansion, then resolution of
/// relative paths against the session's local working directory.
fn local_candidate(s: &str, session: &Session) -> PathBuf {
    let expanded = expand_tilde(s);
    if expanded.is_absolute() {
        expanded
    } else {
        session.local_dir().join(expanded)
    }
}

/// Classify a location string. Never fails; the fallback is an opaque local
/// path to be attempted against the local backend.
pub fn classify(input: &str, session: &Session) -> Location {
    // 1. Recognized scheme token at the very start of the string.
    if let Some((token, rest)) = scheme_prefix(input) {
        match token {
            "dfs" => return Location::remote(Scheme::Dfs, input, input.to_string()),
            "ftp" => return Location::remote(Scheme::Ftp, input, input.to_string()),
            "http" => return Location::remote(Scheme::Http, input, input.to_string()),
            "https" => return Location::remote(Scheme::Https, input, input.to_string()),
            // 2. file:// is local with the prefix stripped.
            "file" => {
                let loc = Location::local(input, local_candidate(rest, session));
                trace!(raw = input, path = %loc.path, "classified file:// as local");
                return loc;
            }
            // Unrecognized token: treat the whole string as an opaque path.
            _ => {}
        }
    }

    // 3. Existing local parent directory wins over any session default, so
    //    bare relative names keep working locally after a remote chdir.
    let candidate = local_candidate(input, session);
    if candidate
        .parent()
        .map(Path::exists)
        .unwrap_or(true)
    {
        trace!(raw = input, path = %candidate.display(), "local parent exists");
        return Location::local(input, candidate);
    }

    // 4. Remote session: resolve against its working directory.
    if session.is_remote() {
        let resolved = session.resolve_remote(input);
        trace!(raw = input, path = %resolved, "resolved against remote session");
        return Location::remote(Scheme::Dfs, input, resolved);
    }

    // 5. Default local; write/touch/mkdir may create the path later.
    Location::local(input, candidate)
}
