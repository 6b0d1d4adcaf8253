//! Remote configuration client subsystem.
//!
//! # Data Flow
//! ```text
//! bearer token + ApiSettings
//!     → api.rs (RemoteConfigClient, one reqwest::Client per run)
//!     → GET  config/{node_id}  → RemoteState
//!     → POST change            → pending change
//!     → POST commit            → committed change
//! ```
//!
//! # Failure Model
//! - Any non-2xx response aborts with the response body attached
//! - No retries; a change whose commit failed stays pending on the platform

pub mod api;
pub mod types;

pub use api::RemoteConfigClient;
pub use types::{ClientError, ClientResult, Operation, RemoteState};
