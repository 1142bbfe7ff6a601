//! External properties loading for application startup.
//!
//! Registered `.properties` files are merged into a shared key/value store
//! when the host fires its before-init lifecycle event, or earlier when
//! eager loading is configured.

// Core subsystems
pub mod config;
pub mod error;
pub mod properties;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use error::PropertiesError;
pub use lifecycle::{LifecycleEvent, LifecycleListener, Startup};
pub use properties::{ExternalPropertiesLoader, LoadSummary, MemoryStore, PropertyStore};
