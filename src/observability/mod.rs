//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader, binding, lifecycle:
//!     → logging.rs (structured log events)
//!     → metrics.rs (file and key outcome counters)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (slot, path, key) instead of formatted messages
//! - No recorder installed here: counters are no-ops until the host adds one

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
