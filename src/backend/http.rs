//! HTTP(S) backend: read-only.
//!
//! A GET against the location, with optional basic-auth credentials. The
//! two status codes the caller must distinguish are translated into typed
//! errors (404 -> NotFound, 401 -> Unauthorized); every other non-success
//! status surfaces as an opaque backend failure.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use super::{Backend, Op};
use crate::errors::{FilexError, Result};

/// Credentials forwarded to a basic-auth GET.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// Read-only HTTP capability provider.
pub struct HttpFetch {
    client: Client,
}

impl Default for HttpFetch {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetch {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// GET `url`, optionally authenticated, returning the body text.
    pub fn fetch(&self, url: &str, creds: Option<&Credentials>) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(c) = creds {
            request = request.basic_auth(&c.username, c.password.as_deref());
        }

        let response = request.send()?;
        let status = response.status();
        debug!(url, %status, "http get");

        match status {
            StatusCode::NOT_FOUND => Err(FilexError::NotFound(url.to_string())),
            StatusCode::UNAUTHORIZED => Err(FilexError::Unauthorized(url.to_string())),
            s if s.is_success() => Ok(response.text()?),
            s => Err(FilexError::Backend(format!("GET {url} returned {s}"))),
        }
    }
}

impl Backend for HttpFetch {
    fn name(&self) -> &'static str {
        "http"
    }

    fn supports(&self, op: Op) -> bool {
        matches!(op, Op::Read)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.fetch(path, None)?.into_bytes())
    }
}
