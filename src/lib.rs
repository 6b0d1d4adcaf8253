//! Software-management configuration sync library.

pub mod client;
pub mod config;
pub mod document;
pub mod lifecycle;
pub mod observability;
pub mod reconcile;

pub use client::RemoteConfigClient;
pub use document::SoftwareConfig;
pub use lifecycle::{run, Invocation, Outcome, RunError};
pub use reconcile::{Action, Mode};
