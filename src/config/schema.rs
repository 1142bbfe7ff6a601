//! Host configuration schema.
//!
//! All types derive Serde traits for deserialization from the TOML host
//! file. Every field has a default so an empty file is a valid config.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for the host binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Logging settings.
    pub logging: LoggingConfig,

    /// External properties loader settings.
    pub loader: LoaderConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// External properties loader configuration.
///
/// ```toml
/// [loader]
/// overwrite = false
/// load_first = true
///
/// [loader.files]
/// "file.1" = "/etc/app/base.properties"
/// "file.2" = "/etc/app/override.properties"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Replace existing non-empty values.
    pub overwrite: bool,

    /// Load as soon as binding completes instead of at before-init.
    pub load_first: bool,

    /// Run the `${name}` replacement pass after loading.
    pub replace_properties: bool,

    /// Slot name to file path.
    pub files: BTreeMap<String, String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            load_first: false,
            replace_properties: false,
            files: BTreeMap::new(),
        }
    }
}
