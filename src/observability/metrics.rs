//! Metrics collection.
//!
//! # Metrics
//! - `external_properties_files_total` (counter): files by outcome (applied, skipped)
//! - `external_properties_keys_total` (counter): keys by outcome (set, overwritten, refused)
//! - `external_properties_registry_slots` (gauge): registered file slots

/// Record the outcome of one registered file.
pub fn record_file(outcome: &'static str) {
    metrics::counter!("external_properties_files_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of one parsed key.
pub fn record_key(outcome: &'static str) {
    metrics::counter!("external_properties_keys_total", "outcome" => outcome).increment(1);
}

/// Record the current registry size.
pub fn record_registry_size(slots: usize) {
    metrics::gauge!("external_properties_registry_slots").set(slots as f64);
}
