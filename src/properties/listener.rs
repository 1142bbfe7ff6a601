//! Lifecycle-driven loader for external properties files.
//!
//! # Responsibilities
//! - Collect `file.*` slots from the configuration binding
//! - Load every registered file once, in merge order
//! - Apply each pair to the target store under the overwrite policy
//! - Run the optional reference replacement pass
//!
//! # Triggers
//! ```text
//! binding complete + load_first  → load()
//! LifecycleEvent::BeforeInit     → load()
//! reload(true)                   → reset loaded flag → load()
//! ```
//!
//! # Design Decisions
//! - The loaded flag is checked and set under one lock: at most one load per cycle
//! - A failing file never stops the sequence, and nothing escapes load()
//! - Pairs applied by earlier files are visible to the overwrite check of later files

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::binding::PropertyBinding;
use crate::error::{PropertiesError, PropertiesResult};
use crate::lifecycle::{LifecycleEvent, LifecycleListener};
use crate::observability::metrics;
use crate::properties::parser::{self, Properties};
use crate::properties::registry::PathRegistry;
use crate::properties::store::{self, PropertyStore};
use crate::properties::substitution;
use crate::properties::summary::{AppliedFile, LoadSummary, RefusedKey, SkippedFile};

#[derive(Debug)]
struct LoaderState {
    registry: PathRegistry,
    loaded: bool,
    overwrite: bool,
    load_first: bool,
    replace_properties: bool,
    last_summary: Option<LoadSummary>,
}

impl Default for LoaderState {
    fn default() -> Self {
        Self {
            registry: PathRegistry::new(),
            loaded: false,
            overwrite: true,
            load_first: false,
            replace_properties: false,
            last_summary: None,
        }
    }
}

/// Loads registered properties files into a [`PropertyStore`].
pub struct ExternalPropertiesLoader {
    store: Arc<dyn PropertyStore>,
    state: Mutex<LoaderState>,
}

impl ExternalPropertiesLoader {
    /// Create a loader writing into `store`.
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self {
            store,
            state: Mutex::new(LoaderState::default()),
        }
    }

    /// Create a loader writing into the process-wide store.
    pub fn with_system_properties() -> Self {
        Self::new(Arc::new(store::system_properties().clone()))
    }

    fn state(&self) -> MutexGuard<'_, LoaderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &Arc<dyn PropertyStore> {
        &self.store
    }

    pub fn overwrite(&self) -> bool {
        self.state().overwrite
    }

    pub fn set_overwrite(&self, overwrite: bool) {
        self.state().overwrite = overwrite;
    }

    pub fn load_first(&self) -> bool {
        self.state().load_first
    }

    pub fn set_load_first(&self, load_first: bool) {
        self.state().load_first = load_first;
    }

    pub fn replace_properties(&self) -> bool {
        self.state().replace_properties
    }

    pub fn set_replace_properties(&self, replace: bool) {
        self.state().replace_properties = replace;
    }

    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.state().loaded = loaded;
    }

    /// Path registered under `slot`.
    pub fn path(&self, slot: &str) -> Option<String> {
        self.state().registry.get(slot).map(str::to_string)
    }

    pub fn registered_count(&self) -> usize {
        self.state().registry.len()
    }

    /// Summary of the most recent load pass that did any work.
    pub fn last_summary(&self) -> Option<LoadSummary> {
        self.state().last_summary.clone()
    }

    /// Register `path` under `slot`.
    ///
    /// Returns false for slots without the `file.` prefix and for new slots
    /// once the registry is full. Nothing is stored in either case.
    pub fn register_path(&self, slot: &str, path: &str) -> bool {
        let mut state = self.state();
        match state.registry.insert(slot, path) {
            Ok(()) => {
                metrics::record_registry_size(state.registry.len());
                true
            }
            Err(err @ PropertiesError::CapacityExceeded { .. }) => {
                tracing::warn!(slot = %slot, path = %path, error = %err, "Rejecting external properties file");
                false
            }
            Err(err) => {
                tracing::debug!(slot = %slot, error = %err, "Ignoring attribute");
                false
            }
        }
    }

    /// String/string setter used by the configuration binding.
    ///
    /// Flag names are parsed as booleans; anything else is treated as a slot.
    pub fn set_attribute(&self, name: &str, value: &str) -> bool {
        if !matches!(
            name,
            "overwrite" | "load_first" | "loadFirst" | "replace_properties" | "replaceProperties"
        ) {
            return self.register_path(name, value);
        }

        let flag = match parse_flag(name, value) {
            Ok(flag) => flag,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring attribute");
                return false;
            }
        };

        let mut state = self.state();
        match name {
            "overwrite" => state.overwrite = flag,
            "load_first" | "loadFirst" => state.load_first = flag,
            _ => state.replace_properties = flag,
        }
        true
    }

    /// Called once the binding has delivered every attribute.
    ///
    /// Loads right away when `load_first` is set.
    pub fn on_registration_complete(&self) -> Option<LoadSummary> {
        let eager = self.state().load_first;
        eager.then(|| self.load())
    }

    /// Called when the host fires its before-init event.
    pub fn on_before_init(&self) -> LoadSummary {
        self.load()
    }

    /// Load again, clearing the loaded flag first when `force` is set.
    pub fn reload(&self, force: bool) -> LoadSummary {
        {
            let mut state = self.state();
            if force && state.loaded {
                tracing::warn!("Forcing properties to be set again");
                state.loaded = false;
            }
        }
        self.load()
    }

    /// Apply every registered file to the store, once.
    pub fn load(&self) -> LoadSummary {
        let mut state = self.state();
        if state.loaded {
            return LoadSummary::already_loaded();
        }

        let mut summary = LoadSummary::default();
        let overwrite = state.overwrite;
        for (slot, path) in state.registry.ordered() {
            self.load_property_file(slot, path, overwrite, &mut summary);
        }

        if state.replace_properties || substitution::replace_flag_set(self.store.as_ref()) {
            summary.substituted = Some(substitution::substitute(self.store.as_ref()));
        }

        tracing::info!(
            applied = summary.applied.len(),
            skipped = summary.skipped.len(),
            keys_set = summary.keys_set,
            keys_overwritten = summary.keys_overwritten,
            refused = summary.refused.len(),
            "External properties loaded"
        );

        state.loaded = true;
        state.last_summary = Some(summary.clone());
        summary
    }

    fn load_property_file(&self, slot: &str, path: &str, overwrite: bool, summary: &mut LoadSummary) {
        // Sparse numbering (file.1, file.3) leaves empty slots behind.
        if path.is_empty() {
            summary.empty_slots.push(slot.to_string());
            return;
        }

        let props = match read_properties(path) {
            Ok(props) => props,
            Err(err) => {
                if let PropertiesError::Open { .. } = err {
                    tracing::warn!(slot = %slot, error = %err, "Skipping external properties file");
                } else {
                    tracing::error!(slot = %slot, error = %err, "Failed to load external properties file");
                }
                metrics::record_file("skipped");
                summary.skipped.push(SkippedFile::from_error(slot, path, &err));
                return;
            }
        };

        tracing::debug!(slot = %slot, path = %path, keys = props.len(), "Loading properties");
        self.apply(path, &props, overwrite, summary);
        metrics::record_file("applied");
        summary.applied.push(AppliedFile {
            slot: slot.to_string(),
            path: path.to_string(),
            keys: props.len(),
        });
    }

    fn apply(&self, path: &str, props: &Properties, overwrite: bool, summary: &mut LoadSummary) {
        for (key, value) in props.iter() {
            if !self.store.has_non_empty(key) {
                self.store.set(key, value);
                summary.keys_set += 1;
                metrics::record_key("set");
            } else if overwrite {
                tracing::debug!(key = %key, value = %value, "Property is being overwritten");
                self.store.set(key, value);
                summary.keys_overwritten += 1;
                metrics::record_key("overwritten");
            } else {
                let existing = self.store.get(key).unwrap_or_default();
                tracing::warn!(
                    key = %key,
                    existing = %existing,
                    discarded = %value,
                    "Overwrite is false and property already exists, keeping existing value"
                );
                summary.refused.push(RefusedKey {
                    key: key.to_string(),
                    existing,
                    discarded: value.to_string(),
                    path: path.to_string(),
                });
                metrics::record_key("refused");
            }
        }
    }
}

impl std::fmt::Debug for ExternalPropertiesLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalPropertiesLoader")
            .field("state", &*self.state())
            .finish_non_exhaustive()
    }
}

impl LifecycleListener for ExternalPropertiesLoader {
    fn lifecycle_event(&self, event: LifecycleEvent) {
        if event == LifecycleEvent::BeforeInit {
            self.on_before_init();
        }
    }
}

impl PropertyBinding for ExternalPropertiesLoader {
    fn set_attribute(&self, name: &str, value: &str) -> bool {
        ExternalPropertiesLoader::set_attribute(self, name, value)
    }

    fn end_set_attributes(&self) {
        self.on_registration_complete();
    }
}

/// Read and parse one properties file. The handle is closed before parsing.
fn read_properties(path: &str) -> PropertiesResult<Properties> {
    if Path::new(path).is_dir() {
        return Err(PropertiesError::Open {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "Is a directory"),
        });
    }

    let mut file = File::open(path).map_err(|source| PropertiesError::Open {
        path: path.to_string(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|source| PropertiesError::Read {
        path: path.to_string(),
        source,
    })?;
    drop(file);

    parser::parse_bytes(&bytes).map_err(|e| PropertiesError::Malformed {
        path: path.to_string(),
        line: e.line,
        reason: e.reason,
    })
}

fn parse_flag(name: &str, value: &str) -> PropertiesResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(PropertiesError::InvalidFlag {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
