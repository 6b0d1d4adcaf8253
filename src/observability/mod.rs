//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields)
//!     → inside the per-run span (run_id, device_group, mode)
//!
//! Consumers:
//!     → logging.rs fmt layer on stderr
//! ```

pub mod logging;

pub use logging::init_logging;
