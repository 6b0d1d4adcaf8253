//! Tool settings.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so no settings file is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_or_default, load_settings, SettingsError};
pub use schema::{ApiSettings, BodyEncoding, ObservabilitySettings, Settings};
