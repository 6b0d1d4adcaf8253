//! Single-run orchestration.
//!
//! # Responsibilities
//! - Turn raw invocation arguments into a checked [`Invocation`]
//! - Run validate → fetch → reconcile → apply, strictly in sequence
//! - Collect every failure into one [`RunError`] for the process boundary
//!
//! # Design Decisions
//! - Nothing here exits the process; `main` maps errors to exit codes
//! - Remote state is fetched once and never re-read after applying

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::client::{ClientError, RemoteConfigClient};
use crate::config::{Settings, SettingsError};
use crate::document::{load_desired, DocumentError};
use crate::reconcile::{reconcile, Action, Mode, NoOpReason, ReconcileError, UnknownMode};

/// Checked command-line input for one run.
#[derive(Clone)]
pub struct Invocation {
    pub token: String,
    pub config_path: PathBuf,
    pub mode: Mode,
    pub device_group: String,
    pub commit_message: String,
}

impl Invocation {
    /// Validate raw arguments. Performs no I/O.
    pub fn new(
        token: impl Into<String>,
        config_path: impl Into<PathBuf>,
        mode: &str,
        device_group: impl Into<String>,
        commit_message: impl Into<String>,
    ) -> Result<Self, RunError> {
        Ok(Self {
            token: token.into(),
            config_path: config_path.into(),
            mode: mode.parse()?,
            device_group: device_group.into(),
            commit_message: commit_message.into(),
        })
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("token", &"<redacted>")
            .field("config_path", &self.config_path)
            .field("mode", &self.mode)
            .field("device_group", &self.device_group)
            .field("commit_message", &self.commit_message)
            .finish()
    }
}

/// What a successful run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged(NoOpReason),
    Applied,
}

/// Any failure that ends a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] UnknownMode),

    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("invalid configuration document: {0}")]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Execute one reconciliation run.
pub async fn run(invocation: &Invocation, settings: &Settings) -> Result<Outcome, RunError> {
    let span = tracing::info_span!(
        "run",
        run_id = %Uuid::new_v4(),
        device_group = %invocation.device_group,
        mode = %invocation.mode,
    );
    execute(invocation, settings).instrument(span).await
}

async fn execute(invocation: &Invocation, settings: &Settings) -> Result<Outcome, RunError> {
    let desired = load_desired(&invocation.config_path)?;
    tracing::info!(
        path = %invocation.config_path.display(),
        items = desired.items.len(),
        "Desired configuration loaded"
    );

    let client = RemoteConfigClient::new(&invocation.token, &settings.api)?;
    let remote = client.fetch_current_config(&invocation.device_group).await?;

    match reconcile(&desired, &remote, invocation.mode)? {
        Action::NoOp(reason) => {
            tracing::info!(%reason, "Nothing to change");
            Ok(Outcome::Unchanged(reason))
        }
        Action::Submit(document) => {
            client
                .apply_config(&invocation.device_group, &document, &invocation.commit_message)
                .await?;
            tracing::info!("Configuration applied");
            Ok(Outcome::Applied)
        }
    }
}
