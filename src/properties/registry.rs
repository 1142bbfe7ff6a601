//! Registry of external properties file slots.
//!
//! # Responsibilities
//! - Accept `file.*` slots only
//! - Bound the number of registered slots
//! - Produce the merge order of registered paths
//!
//! # Merge Order
//! ```text
//! slots sorted with slot_order (case-insensitive, then exact)
//!     → mapped to their paths
//!     → empty paths kept as gaps
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::{PropertiesError, PropertiesResult};

/// Prefix every slot name must carry.
pub const SLOT_PREFIX: &str = "file.";

/// Maximum number of slots the registry holds.
pub const MAX_SLOTS: usize = 99;

/// Compare two slot names in merge order.
///
/// Each char is folded to upper case and then to lower case before comparing,
/// so `file.a` sorts before `file.B`. Names that differ only by case fall back
/// to plain ordering, which keeps the merge order total.
pub fn slot_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(fold_case)
        .cmp(b.chars().map(fold_case))
        .then_with(|| a.cmp(b))
}

fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    let u = match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    };
    let mut lower = u.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => u,
    }
}

/// Mapping from slot name to file path.
#[derive(Debug, Clone, Default)]
pub struct PathRegistry {
    slots: HashMap<String, String>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` under `slot`.
    ///
    /// A new slot is refused once the registry holds [`MAX_SLOTS`] entries and
    /// nothing is stored. Replacing the path of an existing slot is always
    /// allowed.
    pub fn insert(&mut self, slot: &str, path: &str) -> PropertiesResult<()> {
        if !slot.starts_with(SLOT_PREFIX) {
            return Err(PropertiesError::UnrecognizedSlot(slot.to_string()));
        }
        if !self.slots.contains_key(slot) && self.slots.len() >= MAX_SLOTS {
            return Err(PropertiesError::CapacityExceeded { limit: MAX_SLOTS });
        }
        self.slots.insert(slot.to_string(), path.to_string());
        Ok(())
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots paired with their paths, in merge order.
    pub fn ordered(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .slots
            .iter()
            .map(|(slot, path)| (slot.as_str(), path.as_str()))
            .collect();
        entries.sort_by(|a, b| slot_order(a.0, b.0));
        entries
    }
}
