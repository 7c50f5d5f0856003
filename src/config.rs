//! XML configuration for the CLI binary.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a template on first run (unless FILEX_CONFIG points elsewhere).
//!
//! Only presentation-level settings live here: log level, optional log
//! file, and an optional starting working directory. Backend collaborators
//! are wired in code, not configured.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use tracing::debug;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for the binary.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Optional starting working directory for the session
    pub working_dir: Option<PathBuf>,
}

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    working_dir: Option<String>,
}

/// Outcome of ensuring a config exists.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file was found and parsed.
    Loaded(Config),
    /// No config existed; a template was written at this path.
    CreatedTemplate(PathBuf),
    /// No config and no writable default location; defaults in effect.
    Defaults,
}

/// Config file path: FILEX_CONFIG if set, else the OS config dir.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(p) = env::var("FILEX_CONFIG") {
        return Some(PathBuf::from(p));
    }
    dirs::config_dir().map(|d| d.join("filex").join("config.xml"))
}

const TEMPLATE: &str = "<config>\n  <log_level>normal</log_level>\n</config>\n";

/// Load the config file if present; write a template when missing and the
/// default location is in use.
pub fn load_or_init() -> Result<LoadResult> {
    let Some(path) = config_path() else {
        return Ok(LoadResult::Defaults);
    };

    if !path.exists() {
        // Only create a template at the default location; an explicit
        // FILEX_CONFIG that does not exist is the user's problem to fix.
        if env::var("FILEX_CONFIG").is_ok() {
            anyhow::bail!("FILEX_CONFIG points to a missing file: {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        fs::write(&path, TEMPLATE)
            .with_context(|| format!("write template config {}", path.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&path, fs::Permissions::from_mode(0o600));
        }
        return Ok(LoadResult::CreatedTemplate(path));
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("read config {}", path.display()))?;
    let xml: XmlConfig = from_xml_str(&content)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");

    Ok(LoadResult::Loaded(Config {
        log_level: xml
            .log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or_default(),
        log_file: xml.log_file.map(PathBuf::from),
        working_dir: xml.working_dir.map(PathBuf::from),
    }))
}
