//! Shared fixtures for integration tests.

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use external_properties::{ExternalPropertiesLoader, MemoryStore};

/// A temp directory for properties files plus a loader over a fresh store.
pub struct Fixture {
    pub dir: TempDir,
    pub store: MemoryStore,
    pub loader: Arc<ExternalPropertiesLoader>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let loader = Arc::new(ExternalPropertiesLoader::new(Arc::new(store.clone())));
        Self {
            dir: TempDir::new().unwrap(),
            store,
            loader,
        }
    }

    /// Write a properties file and return its path.
    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Path inside the fixture directory that does not exist.
    #[allow(dead_code)]
    pub fn missing(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }
}
