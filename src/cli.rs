//! CLI definition and parsing.
//! One subcommand per hub operation; global flags control logging.

use clap::{Parser, Subcommand, ValueHint};

use crate::config::LogLevel;

/// Unified file operations across local, dfs://, ftp:// and http(s)://
/// locations.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Unified file operations across local and remote locations")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location used by filex and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read a location (inline XML, URL, path or literal text) and print it.
    Read {
        #[arg(value_hint = ValueHint::AnyPath)]
        source: String,
        /// Basic-auth username for http(s) sources.
        #[arg(long)]
        username: Option<String>,
        /// Basic-auth password for http(s) sources.
        #[arg(long)]
        password: Option<String>,
    },
    /// Write data (or stdin when omitted) to a location.
    Write {
        #[arg(value_hint = ValueHint::AnyPath)]
        location: String,
        data: Option<String>,
    },
    /// Copy a file; operands may name different backends, one side wins.
    Cp {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: String,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: String,
    },
    /// Move a file.
    Mv {
        #[arg(value_hint = ValueHint::AnyPath)]
        src: String,
        #[arg(value_hint = ValueHint::AnyPath)]
        dest: String,
    },
    /// Remove a path; a trailing wildcard expands into a tolerant batch.
    Rm {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,
        /// Remove directories recursively.
        #[arg(short = 'r', long)]
        recursive: bool,
        /// Ignore failures during recursive removal.
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// List entries matching a glob pattern or directory.
    Ls {
        #[arg(default_value = "*", value_hint = ValueHint::AnyPath)]
        pattern: String,
    },
    /// Create a directory.
    Mkdir {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,
        /// Create missing parents too.
        #[arg(short = 'p', long)]
        parents: bool,
    },
    /// Create a file or update its modification time.
    Touch {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,
    },
    /// Change permission bits (octal mode).
    Chmod {
        mode: String,
        #[arg(value_hint = ValueHint::AnyPath)]
        path: String,
    },
    /// Print the most recently updated entry under a directory.
    Recent {
        #[arg(default_value = ".", value_hint = ValueHint::DirPath)]
        path: String,
        /// Descend into subdirectories.
        #[arg(short = 'r', long)]
        recursive: bool,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn debug_flag_wins_over_log_level() {
        let args = Args::parse_from(["filex", "-d", "--log-level", "quiet", "ls"]);
        assert_eq!(args.effective_log_level(), Some(LogLevel::Debug));
    }

    #[test]
    fn rm_flags_parse() {
        let args = Args::parse_from(["filex", "rm", "-rf", "/tmp/x"]);
        match args.command {
            Some(Command::Rm {
                recursive, force, ..
            }) => {
                assert!(recursive);
                assert!(force);
            }
            _ => panic!("expected rm"),
        }
    }
}
