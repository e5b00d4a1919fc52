//! Roster persistence over an opaque key-value byte store.
//!
//! The roster is stored as one JSON array under [`STORAGE_KEY`]. Reading a
//! value that does not decode is reported as [`PersistenceError::Decode`];
//! callers keep their in-memory roster in that case.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::models::Entry;

/// Key the roster lives under.
pub const STORAGE_KEY: &str = "simp-thing-entries";

/// A synchronous byte store addressed by string keys.
pub trait KeyValueStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error>;
    /// Returns whether a value was present.
    fn remove(&self, key: &str) -> Result<bool, Self::Error>;
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage backend failed: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to encode roster: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("persisted roster is malformed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("persisted roster repeats entry id {0:?}")]
    DuplicateId(String),
}

impl PersistenceError {
    fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Store(Box::new(e))
    }

    /// Whether the stored bytes themselves were bad, as opposed to the store failing.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::DuplicateId(_))
    }
}

/// Serialize a roster to its persisted byte form.
pub fn encode_roster(entries: &[Entry]) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec(entries).map_err(PersistenceError::Encode)
}

/// Parse persisted bytes back into a roster, preserving order.
pub fn decode_roster(bytes: &[u8]) -> Result<Vec<Entry>, PersistenceError> {
    let entries: Vec<Entry> = serde_json::from_slice(bytes).map_err(PersistenceError::Decode)?;

    for (i, entry) in entries.iter().enumerate() {
        if entries[..i].iter().any(|e| e.id == entry.id) {
            return Err(PersistenceError::DuplicateId(entry.id.clone()));
        }
    }

    Ok(entries)
}

/// Reads and writes the roster through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct RosterPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RosterPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the persisted roster with `entries`.
    pub fn save(&self, entries: &[Entry]) -> Result<(), PersistenceError> {
        let bytes = encode_roster(entries)?;
        self.store
            .put(&self.key, &bytes)
            .map_err(PersistenceError::store)?;
        tracing::debug!(count = entries.len(), key = %self.key, "Roster saved");
        Ok(())
    }

    /// Raw persisted bytes, if any.
    pub fn load_bytes(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        self.store.get(&self.key).map_err(PersistenceError::store)
    }

    /// The persisted roster, or `None` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Vec<Entry>>, PersistenceError> {
        match self.load_bytes()? {
            Some(bytes) => decode_roster(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Drop the persisted roster.
    pub fn clear(&self) -> Result<bool, PersistenceError> {
        self.store.remove(&self.key).map_err(PersistenceError::store)
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let values = self.values.lock().expect("memory store lock poisoned");
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), Self::Error> {
        let mut values = self.values.lock().expect("memory store lock poisoned");
        values.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, Self::Error> {
        let mut values = self.values.lock().expect("memory store lock poisoned");
        Ok(values.remove(key).is_some())
    }
}
