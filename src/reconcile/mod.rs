//! Reconciliation engine.
//!
//! # Decision Table
//! ```text
//! mode            bundle absent      bundle present
//! if_not_present  submit desired     no-op
//! add             submit desired     merge → no-op | submit merged | conflict
//! replace         submit desired     submit desired
//! ```

pub mod engine;
pub mod mode;
pub mod types;

pub use engine::{merge, reconcile};
pub use mode::{Mode, UnknownMode};
pub use types::{Action, NoOpReason, ReconcileError, ReconcileResult};
