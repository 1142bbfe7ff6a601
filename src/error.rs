//! Error definitions for the external properties loader.
//!
//! None of these escape the loader's public entry points. They are logged,
//! recorded in the [`LoadSummary`](crate::properties::LoadSummary), and the
//! loader moves on to the next source.

use thiserror::Error;

/// Errors that can occur while registering or loading external properties.
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// The file could not be opened (missing, unreadable, a directory).
    #[error("Cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but reading it failed.
    #[error("Failed reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file content does not follow the properties grammar.
    #[error("Malformed properties in {path} at line {line}: {reason}")]
    Malformed {
        path: String,
        line: usize,
        reason: String,
    },

    /// The path registry is full.
    #[error("Too many external properties files defined (limit {limit})")]
    CapacityExceeded { limit: usize },

    /// The slot name does not carry the recognized prefix.
    #[error("Unrecognized slot name: {0}")]
    UnrecognizedSlot(String),

    /// A boolean attribute received a value that is not a boolean.
    #[error("Invalid value '{value}' for flag '{name}'")]
    InvalidFlag { name: String, value: String },
}

/// Result type for properties operations.
pub type PropertiesResult<T> = Result<T, PropertiesError>;
