mod app;
mod terminal;

use crate::app::{App, Command, Flow};
use crate::terminal::TerminalSurface;
use anyhow::Context;
use clap::Parser;
use relay_kernel::AppContext;
use relay_kernel::config::{ENV_PREFIX, load_config};
use relay_kernel::domain::config::AppConfig;
use relay_logger::{LevelFilter, Logger};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Two screens, one notification channel: send from "View2", watch the list update.
#[derive(Debug, Parser)]
#[command(name = "relay", version, about)]
struct Cli {
    /// Configuration file (toml, json, yaml, ...). Defaults plus `RELAY__*` env when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the configured channel name.
    #[arg(long)]
    channel: Option<String>,

    /// Overrides the configured log level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loaded before the logger exists, so the source is reported once logging is up.
    let mut cfg: AppConfig =
        load_config(cli.config.as_ref()).context("Critical: Configuration is malformed")?;
    if let Some(channel) = cli.channel {
        cfg.channel = channel;
    }
    if let Some(level) = cli.log_level {
        cfg.log.level = level;
    }

    let _log = init_logger(&cfg)?;
    info!(source = %config_source(cli.config.as_deref()), channel = %cfg.channel, "Configuration loaded");

    let ctx = AppContext::new(cfg).context("Critical: Configuration is invalid")?;
    let mut app = App::new(ctx, Arc::new(TerminalSurface::stdout()))?;
    info!("Type `help` for commands");

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let flow = match Command::parse(&line) {
            Ok(command) => app.handle(command),
            Err(err) => {
                warn!(error = %err, "Unrecognized input");
                continue;
            },
        };
        if flow == Flow::Exit {
            break;
        }
    }

    app.shutdown();
    Ok(())
}

fn config_source(path: Option<&Path>) -> String {
    path.map_or_else(
        || format!("defaults + {ENV_PREFIX}__* env"),
        |path| format!("{} + {ENV_PREFIX}__* env", path.display()),
    )
}

fn init_logger(cfg: &AppConfig) -> anyhow::Result<Logger> {
    let level: LevelFilter =
        cfg.log.level.parse().with_context(|| format!("Invalid log level '{}'", cfg.log.level))?;

    let mut builder = Logger::builder(env!("CARGO_PKG_NAME")).console(true).level(level);
    if let Some(path) = &cfg.log.path {
        builder = builder.path(path).json(cfg.log.json);
    }
    Ok(builder.init()?)
}
