//! Structured report of one load pass.

use serde::Serialize;

use crate::error::PropertiesError;

/// Why a registered file contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    /// The file could not be opened.
    Open,
    /// The file was opened but reading failed.
    Read,
    /// The content does not follow the properties grammar.
    Malformed,
}

/// A file that was read and applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFile {
    pub slot: String,
    pub path: String,
    /// Number of distinct keys parsed from the file.
    pub keys: usize,
}

/// A file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub slot: String,
    pub path: String,
    pub kind: SkipKind,
    pub reason: String,
}

impl SkippedFile {
    pub(crate) fn from_error(slot: &str, path: &str, err: &PropertiesError) -> Self {
        let kind = match err {
            PropertiesError::Open { .. } => SkipKind::Open,
            PropertiesError::Malformed { .. } => SkipKind::Malformed,
            _ => SkipKind::Read,
        };
        Self {
            slot: slot.to_string(),
            path: path.to_string(),
            kind,
            reason: err.to_string(),
        }
    }
}

/// A key kept at its existing value because overwrite is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefusedKey {
    pub key: String,
    pub existing: String,
    pub discarded: String,
    pub path: String,
}

/// Outcome of [`ExternalPropertiesLoader::load`](crate::properties::ExternalPropertiesLoader::load).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    /// The pass was a no-op because properties were already loaded.
    pub already_loaded: bool,
    pub applied: Vec<AppliedFile>,
    pub skipped: Vec<SkippedFile>,
    /// Slots registered with an empty path.
    pub empty_slots: Vec<String>,
    /// Keys written because they were absent or empty in the store.
    pub keys_set: usize,
    /// Keys that replaced an existing non-empty value.
    pub keys_overwritten: usize,
    pub refused: Vec<RefusedKey>,
    /// Entries changed by the reference replacement pass, if it ran.
    pub substituted: Option<usize>,
}

impl LoadSummary {
    pub(crate) fn already_loaded() -> Self {
        Self {
            already_loaded: true,
            ..Self::default()
        }
    }

    /// True if every registered file applied and no key was refused.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.refused.is_empty()
    }

    /// Paths in the order they were applied.
    pub fn applied_paths(&self) -> Vec<&str> {
        self.applied.iter().map(|f| f.path.as_str()).collect()
    }
}
