//! `kbs-seal` — binary entry point.
//!
//! Startup sequence:
//! 1. Parse the command line.
//! 2. Load and validate [`Config`] from `KBS_SEAL_*` environment variables.
//! 3. Initialise structured logging on stderr.
//! 4. Run the requested command.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use sealer::cli::{self, Cli};
use sealer::config::Config;
use sealer::telemetry;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = cli::error_code(&e), "{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env()?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level, cfg.log_format)?;
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "kbs-seal starting");

    // -----------------------------------------------------------------------
    // 3. Command
    // -----------------------------------------------------------------------
    cli::run(cli, &cfg)
}
