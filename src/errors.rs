//! Typed error definitions for filex.
//! Classification-level failures are raised before any backend call; backend
//! failures pass through unchanged apart from the two HTTP status mappings.

use thiserror::Error;

use crate::backend::Op;
use crate::location::Scheme;

pub type Result<T, E = FilexError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FilexError {
    /// Empty/absent location or an argument that cannot be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP 404 or a backend-reported missing resource.
    #[error("{0} not found")]
    NotFound(String),

    /// HTTP 401.
    #[error("{0} unauthorized access")]
    Unauthorized(String),

    /// The resolved backend does not implement the requested capability.
    /// Raised by the dispatcher before the backend is invoked.
    #[error("the {backend} backend does not support {op}")]
    Unsupported { backend: &'static str, op: Op },

    /// An operation resolved to a remote scheme with no registered client.
    #[error("no backend registered for scheme {0}")]
    BackendUnavailable(Scheme),

    /// Local filesystem pass-through.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// HTTP transport failure (DNS, connect, TLS, body read).
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Opaque failure reported by a remote collaborator.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl FilexError {
    /// True when the underlying cause is a missing file or resource.
    pub fn is_not_found(&self) -> bool {
        match self {
            FilexError::NotFound(_) => true,
            FilexError::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}
