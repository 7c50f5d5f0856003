//! Content sniffing for `read`.
//!
//! The argument to `read` may be inline XML, a URL, a path on any backend,
//! or literal text, with no type metadata attached. The primary gate is
//! single-line vs multi-line: a single-line string is presumed to be a
//! *reference* (URL or path) until every interpretation is exhausted, while
//! multi-line input is always literal content. Within the single-line
//! branch the order of checks is fixed and behavior-defining:
//! XML declaration/tag, HTTP(S) URL, DFS, FTP, local file, whitespace
//! (literal text), last-chance DFS probe, verbatim fallback.

use std::path::Path;

use tracing::debug;

use crate::backend::Op;
use crate::backend::http::Credentials;
use crate::errors::{FilexError, Result};
use crate::hub::FileHub;
use crate::location::Scheme;

/// Where the content of a `read` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// The input itself was an XML document.
    InlineXml,
    /// The input was an already-parsed document, serialized back to text.
    InlineDoc,
    /// Fetched over HTTP(S).
    Url,
    /// Fetched from the distributed filesystem.
    Dfs,
    /// Fetched over FTP.
    Ftp,
    /// Read from local disk.
    LocalFile,
    /// Literal text (contains whitespace, cannot be a path).
    PlainText,
    /// Returned verbatim; no interpretation matched.
    Unknown,
}

/// Outcome of a `read`: the content plus how the input was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadResult {
    pub content: String,
    pub source: SourceType,
}

impl ReadResult {
    fn new(content: impl Into<String>, source: SourceType) -> Self {
        Self {
            content: content.into(),
            source,
        }
    }
}

/// Options for `read`; credentials apply to HTTP(S) fetches only.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ReadOptions {
    fn credentials(&self) -> Option<Credentials> {
        self.username.as_ref().map(|u| Credentials {
            username: u.clone(),
            password: self.password.clone(),
        })
    }
}

/// An already-parsed document that can serialize itself back to XML text.
/// Passing one to `read` short-circuits sniffing entirely.
pub trait XmlSource {
    fn to_xml(&self) -> String;
}

/// The raw argument to `read`: either untyped text to sniff, or a parsed
/// document handle.
pub enum ReadInput<'a> {
    Text(&'a str),
    Document(&'a dyn XmlSource),
}

impl<'a> From<&'a str> for ReadInput<'a> {
    fn from(s: &'a str) -> Self {
        ReadInput::Text(s)
    }
}

impl<'a> From<&'a String> for ReadInput<'a> {
    fn from(s: &'a String) -> Self {
        ReadInput::Text(s)
    }
}

impl<'a> From<&'a dyn XmlSource> for ReadInput<'a> {
    fn from(doc: &'a dyn XmlSource) -> Self {
        ReadInput::Document(doc)
    }
}

/// True when the trimmed input opens like an XML document: a declaration
/// (`<?xml`) or any opening tag. A leading `<?` that is not `<?xml` does
/// not count.
fn looks_like_xml(s: &str) -> bool {
    let Some(rest) = s.trim_start().strip_prefix('<') else {
        return false;
    };
    rest.starts_with("?xml") || rest.chars().next().is_some_and(|c| c != '?')
}

impl FileHub {
    /// Read content from wherever the input points, or from the input
    /// itself when it *is* the content.
    pub fn read<'a>(&self, input: impl Into<ReadInput<'a>>, opts: &ReadOptions) -> Result<ReadResult> {
        match input.into() {
            ReadInput::Document(doc) => {
                Ok(ReadResult::new(doc.to_xml(), SourceType::InlineDoc))
            }
            ReadInput::Text(x) => self.read_text(x, opts),
        }
    }

    fn read_text(&self, x: &str, opts: &ReadOptions) -> Result<ReadResult> {
        if x.is_empty() {
            return Err(FilexError::InvalidInput(
                "empty string, expected a location or content".into(),
            ));
        }

        // Inline XML is returned as-is; no fetch is ever attempted.
        if looks_like_xml(x) {
            return Ok(ReadResult::new(x, SourceType::InlineXml));
        }

        // Multi-line input is literal content, never a reference.
        if x.lines().count() > 1 {
            return Ok(ReadResult::new(x, SourceType::Unknown));
        }

        let loc = self.classify(x);
        debug!(input = x, scheme = %loc.scheme, "sniffing single-line input");
        match loc.scheme {
            Scheme::Http | Scheme::Https => {
                let body = self.http().fetch(x, opts.credentials().as_ref())?;
                Ok(ReadResult::new(body, SourceType::Url))
            }
            Scheme::Dfs => {
                let bytes = self.dispatch(Scheme::Dfs, Op::Read)?.read(&loc.path)?;
                Ok(ReadResult::new(decode_utf8(bytes), SourceType::Dfs))
            }
            Scheme::Ftp => {
                let bytes = self.dispatch(Scheme::Ftp, Op::Read)?.read(&loc.path)?;
                Ok(ReadResult::new(decode_utf8(bytes), SourceType::Ftp))
            }
            Scheme::Local => self.read_opaque(x, &loc.path),
        }
    }

    /// A single-line string with no recognized scheme: local file, literal
    /// text, last-chance DFS probe, then verbatim.
    fn read_opaque(&self, raw: &str, local_path: &str) -> Result<ReadResult> {
        if raw.starts_with("file://") || Path::new(local_path).exists() {
            let bytes = self.dispatch(Scheme::Local, Op::Read)?.read(local_path)?;
            return Ok(ReadResult::new(decode_utf8(bytes), SourceType::LocalFile));
        }

        // Whitespace rules out a path; the input is its own content.
        if raw.chars().any(char::is_whitespace) {
            return Ok(ReadResult::new(raw, SourceType::PlainText));
        }

        // Last chance: the bare name may exist on the DFS backend.
        if let Ok(dfs) = self.dispatch(Scheme::Dfs, Op::Read) {
            if dfs.exists(raw) {
                let bytes = dfs.read(raw)?;
                return Ok(ReadResult::new(decode_utf8(bytes), SourceType::Dfs));
            }
        }

        Ok(ReadResult::new(raw, SourceType::Unknown))
    }
}

/// Force UTF-8 the lossy way: invalid sequences become replacement
/// characters rather than failing the read.
fn decode_utf8(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}
