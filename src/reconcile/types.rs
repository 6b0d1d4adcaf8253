//! Reconciliation outcomes and errors.

use thiserror::Error;

use crate::document::SoftwareConfig;

/// Decision for a single run.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Leave the platform untouched.
    NoOp(NoOpReason),
    /// Stage and commit this document.
    Submit(SoftwareConfig),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// `if_not_present` found an existing bundle.
    AlreadyPresent,
    /// `add` found every desired item already configured.
    NothingNew,
}

impl std::fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoOpReason::AlreadyPresent => write!(f, "configuration is already present"),
            NoOpReason::NothingNew => write!(f, "no new software management entries"),
        }
    }
}

/// Errors that stop a reconciliation before anything is submitted.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(
        "mismatch in current and new configuration: 'enabled' is {current} remotely \
         but {desired} in the new configuration; set it the same for both"
    )]
    EnabledMismatch { desired: bool, current: bool },

    #[error(
        "mismatch in current and new configuration: 'version' is '{current}' remotely \
         but '{desired}' in the new configuration; use the same version for both"
    )]
    VersionMismatch { desired: String, current: String },

    /// Bundle is listed as configured but the platform sent no data for it.
    #[error("bundle '{0}' is configured but has no bundle data")]
    MissingBundleData(String),

    #[error("bundle '{bundle}' data is not a valid software management document: {source}")]
    MalformedBundle {
        bundle: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ReconcileError {
    /// Whether the desired and current documents disagree on a bundle scalar.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            ReconcileError::EnabledMismatch { .. } | ReconcileError::VersionMismatch { .. }
        )
    }
}

/// Result type for reconciliation.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
