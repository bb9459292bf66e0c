//! Where snapshots go between process runs.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::StorageError;

/// Durable key-value facility used by the gamification store.
pub trait SnapshotStore {
    /// Read the serialized snapshot under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `snapshot` under `key`, replacing any previous value.
    fn save(&self, key: &str, snapshot: &str) -> Result<(), StorageError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), StorageError> {
        (**self).save(key, snapshot)
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, e.g. to simulate a snapshot left by an older build.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<(), StorageError> {
        self.insert(key, snapshot);
        Ok(())
    }
}
