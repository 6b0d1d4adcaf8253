//! Software-management documents.
//!
//! # Data Flow
//! ```text
//! desired.json
//!     → loader.rs (read & parse JSON)
//!     → validation.rs (structural checks, all violations)
//!     → model.rs (typed SoftwareConfig, immutable for the run)
//! ```
//!
//! Remote bundle data decodes straight into the same model.

pub mod loader;
pub mod model;
pub mod validation;

pub use loader::{load_desired, parse_desired, DocumentError};
pub use model::{ConfigFile, Item, Parameter, SoftwareConfig, SOFTWARE_MANAGEMENT};
pub use validation::{validate_document, SchemaViolation};
