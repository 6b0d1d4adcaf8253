//! Software-management configuration sync.
//!
//! Reconciles a desired software-management bundle for one device group
//! against the fleet-management platform in a single run.
//!
//! ```text
//! swm-sync <token> <config_file> <mode> <device_group> <commit_message>
//!
//!   mode: add | replace | if_not_present
//! ```
//!
//! Exit status is 0 on success (including "nothing to change") and 1 on any
//! input, validation, conflict or API failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use swm_sync::config::load_or_default;
use swm_sync::lifecycle::{run, Invocation, Outcome, RunError};
use swm_sync::observability::init_logging;

#[derive(Parser)]
#[command(name = "swm-sync")]
#[command(about = "Reconcile a software management configuration with a device group", long_about = None)]
struct Cli {
    /// API bearer token.
    token: String,

    /// Path to the desired configuration (JSON).
    config_file: PathBuf,

    /// add | replace | if_not_present
    mode: String,

    /// Device group (node) identifier.
    device_group: String,

    /// Message recorded with the commit.
    #[arg(allow_hyphen_values = true)]
    commit_message: String,

    /// Optional TOML settings file.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let invocation = match Invocation::new(
        cli.token,
        cli.config_file,
        &cli.mode,
        cli.device_group,
        cli.commit_message,
    ) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = match load_or_default(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", RunError::from(e));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&settings.observability.log_level) {
        eprintln!("warning: logging not initialized: {}", e);
    }

    tracing::debug!(?invocation, "Starting run");

    match run(&invocation, &settings).await {
        Ok(Outcome::Applied) => ExitCode::SUCCESS,
        Ok(Outcome::Unchanged(reason)) => {
            tracing::info!(%reason, "No configuration upload");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
