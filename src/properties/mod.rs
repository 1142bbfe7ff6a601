//! External properties loading subsystem.
//!
//! # Data Flow
//! ```text
//! binding (file.N = path, flags)
//!     → registry.rs (slot prefix, capacity, merge order)
//!     → listener.rs (load once, per-file loader)
//!     → parser.rs (key=value grammar)
//!     → store.rs (overwrite policy applied per key)
//!     → substitution.rs (optional ${name} pass)
//!     → summary.rs (what applied, what was skipped)
//! ```
//!
//! # Design Decisions
//! - The target store is injected, never reached through a global
//! - Every per-file failure degrades to "this file contributes nothing"

pub mod listener;
pub mod parser;
pub mod registry;
pub mod store;
pub mod substitution;
pub mod summary;

pub use listener::ExternalPropertiesLoader;
pub use registry::{slot_order, PathRegistry, MAX_SLOTS, SLOT_PREFIX};
pub use store::{system_properties, MemoryStore, PropertyStore};
pub use summary::{LoadSummary, SkipKind};
