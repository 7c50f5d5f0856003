//! Application orchestrator.
//! Loads config, initializes logging, builds a hub and executes the
//! requested subcommand, reporting through the output helpers.

use std::io::Read as _;

use anyhow::{Context, Result, bail};
use tracing::debug;

use filex::cli::{Args, Command};
use filex::config::{self, Config, LoadResult};
use filex::output as out;
use filex::{FileHub, ReadOptions};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // --print-config is handled before logging init.
    if args.print_config {
        match config::config_path() {
            Some(p) => {
                out::print_info(&format!("filex config path:\n  {}", p.display()));
                if p.exists() {
                    out::print_info("A config file exists at that location.");
                } else {
                    out::print_info("No config file exists there yet; one is created on first run.");
                }
            }
            None => out::print_error("Could not determine a config path on this system."),
        }
        return Ok(());
    }

    let mut cfg = match config::load_or_init()? {
        LoadResult::Loaded(cfg) => cfg,
        LoadResult::CreatedTemplate(path) => {
            out::print_success(&format!(
                "A template filex config was written to: {}",
                path.display()
            ));
            Config::default()
        }
        LoadResult::Defaults => Config::default(),
    };

    // CLI flags win over config values.
    if let Some(level) = args.effective_log_level() {
        cfg.log_level = level;
    }

    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)?;
    debug!(?cfg, "effective configuration");

    let mut builder = FileHub::builder();
    if let Some(dir) = &cfg.working_dir {
        builder = builder.working_dir(dir);
    }
    let hub = builder.build();

    let Some(command) = args.command else {
        bail!("no command given; see --help");
    };
    execute(&hub, command)
}

fn execute(hub: &FileHub, command: Command) -> Result<()> {
    match command {
        Command::Read {
            source,
            username,
            password,
        } => {
            let opts = ReadOptions { username, password };
            let result = hub.read(source.as_str(), &opts)?;
            debug!(source_type = ?result.source, "read complete");
            out::print_user(&result.content);
        }
        Command::Write { location, data } => {
            let payload = match data {
                Some(d) => d.into_bytes(),
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin()
                        .read_to_end(&mut buf)
                        .context("read data from stdin")?;
                    buf
                }
            };
            hub.write(&location, &payload)?;
            out::print_success(&format!("wrote {} bytes to {}", payload.len(), location));
        }
        Command::Cp { src, dest } => {
            hub.copy(&src, &dest)?;
            out::print_success(&format!("copied {} -> {}", src, dest));
        }
        Command::Mv { src, dest } => {
            hub.rename(&src, &dest)?;
            out::print_success(&format!("moved {} -> {}", src, dest));
        }
        Command::Rm {
            path,
            recursive,
            force,
        } => {
            let outcome = if recursive {
                hub.remove_all(&path, force)?
            } else {
                hub.remove(&path)?
            };
            for removed in &outcome.removed {
                out::print_user(removed);
            }
            for failure in &outcome.failures {
                out::print_warn(&format!("{}: {}", failure.path, failure.error));
            }
            if !outcome.is_clean() {
                out::print_warn(&format!(
                    "{} of {} entries failed",
                    outcome.failures.len(),
                    outcome.failures.len() + outcome.removed.len()
                ));
            }
        }
        Command::Ls { pattern } => {
            for entry in hub.list(&pattern)? {
                out::print_user(&entry);
            }
        }
        Command::Mkdir { path, parents } => {
            if parents {
                hub.mkdir_all(&path)?;
            } else {
                hub.mkdir(&path)?;
            }
            out::print_success(&format!("created {}", path));
        }
        Command::Touch { path } => {
            hub.touch(&path, None)?;
        }
        Command::Chmod { mode, path } => {
            let bits = u32::from_str_radix(&mode, 8)
                .with_context(|| format!("invalid octal mode '{mode}'"))?;
            hub.chmod(bits, &path)?;
        }
        Command::Recent { path, recursive } => {
            let latest = if recursive {
                hub.recently_updated_recursive(&path)?
            } else {
                hub.recently_updated(&path)?
            };
            match latest {
                Some(entry) => out::print_user(&entry),
                None => out::print_info("no entries found"),
            }
        }
    }
    Ok(())
}
