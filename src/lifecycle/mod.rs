//! Lifecycle of a single invocation.
//!
//! # Data Flow
//! ```text
//! argv → Invocation (mode checked, no I/O)
//!     → run.rs: load & validate desired document
//!     → fetch remote state
//!     → reconcile
//!     → change + commit (only for Action::Submit)
//!     → Outcome | RunError → exit code in main
//! ```

pub mod run;

pub use run::{run, Invocation, Outcome, RunError};
