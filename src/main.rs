//! notebook CLI - Entry point
//!
//! Usage: notebook [--notes-dir <dir>] [--editor <cmd>] [--config <file>]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notebook::cli::Cli;
use notebook::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the REPL screen
    let default_filter = if cli.verbose { "notebook=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    notebook::cli::repl::start(&config)
}
