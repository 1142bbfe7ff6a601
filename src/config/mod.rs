//! Host configuration subsystem.
//!
//! # Data Flow
//! ```text
//! host file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HostConfig (validated, immutable)
//!     → binding.rs (attributes replayed into the properties loader)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - The loader only sees string attributes, never the schema types

pub mod binding;
pub mod loader;
pub mod schema;
pub mod validation;

pub use binding::{bind_loader, BindReport, PropertyBinding};
pub use loader::{load_config, ConfigError};
pub use schema::{HostConfig, LoaderConfig, LogFormat, LoggingConfig};
