//! Decision and merge logic.
//!
//! # Responsibilities
//! - Decide between no-op, submit-as-is and merge from mode and presence
//! - Merge desired items into the current bundle for `add`
//!
//! # Design Decisions
//! - Pure functions over borrowed inputs; a merge builds a new document
//! - Merging only appends: existing items keep their content and order
//! - Items are deduplicated by full structural equality, not by package name

use serde::Deserialize;

use crate::client::RemoteState;
use crate::document::{SoftwareConfig, SOFTWARE_MANAGEMENT};
use crate::reconcile::mode::Mode;
use crate::reconcile::types::{Action, NoOpReason, ReconcileError, ReconcileResult};

/// Decide what to do with `desired` given the platform's `remote` state.
pub fn reconcile(desired: &SoftwareConfig, remote: &RemoteState, mode: Mode) -> ReconcileResult<Action> {
    let present = remote.has_bundle(SOFTWARE_MANAGEMENT);
    tracing::debug!(%mode, present, "Reconciling software management bundle");

    match (mode, present) {
        (_, false) => {
            tracing::info!("No configuration present: creating new configuration");
            Ok(Action::Submit(desired.clone()))
        }
        (Mode::IfNotPresent, true) => Ok(Action::NoOp(NoOpReason::AlreadyPresent)),
        (Mode::Replace, true) => {
            tracing::info!("Replacing existing configuration");
            Ok(Action::Submit(desired.clone()))
        }
        (Mode::Add, true) => {
            let current = current_bundle(remote)?;
            merge(&current, desired)
        }
    }
}

/// Append the items of `desired` that `current` does not already hold.
///
/// `enabled` and `version` are bundle-wide and must match exactly.
pub fn merge(current: &SoftwareConfig, desired: &SoftwareConfig) -> ReconcileResult<Action> {
    if desired.enabled != current.enabled {
        return Err(ReconcileError::EnabledMismatch {
            desired: desired.enabled,
            current: current.enabled,
        });
    }
    if desired.version != current.version {
        return Err(ReconcileError::VersionMismatch {
            desired: desired.version.clone(),
            current: current.version.clone(),
        });
    }

    let mut merged = current.clone();
    for item in &desired.items {
        if merged.items.contains(item) {
            tracing::info!(package = ?item.package_name(), "Software management entry already present, skipping");
        } else {
            merged.items.push(item.clone());
        }
    }

    if merged == *current {
        Ok(Action::NoOp(NoOpReason::NothingNew))
    } else {
        tracing::info!(
            added = merged.items.len() - current.items.len(),
            "Merged new entries into existing configuration"
        );
        Ok(Action::Submit(merged))
    }
}

fn current_bundle(remote: &RemoteState) -> ReconcileResult<SoftwareConfig> {
    let data = remote
        .bundle_data
        .get(SOFTWARE_MANAGEMENT)
        .ok_or_else(|| ReconcileError::MissingBundleData(SOFTWARE_MANAGEMENT.to_string()))?;

    SoftwareConfig::deserialize(data).map_err(|source| ReconcileError::MalformedBundle {
        bundle: SOFTWARE_MANAGEMENT.to_string(),
        source,
    })
}
