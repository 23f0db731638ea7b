//! Persisted theme preference.
//!
//! [`KeyValueStore`] is the injectable backend (browser `localStorage` under
//! `hydrate`, [`MemoryStore`] elsewhere). [`PreferenceStore`] narrows it to the
//! single key holding the user's last explicit color mode.
//!
//! TRADE-OFFS
//! ==========
//! Storage is best effort. A failed read is logged and treated as "no stored
//! preference" so the system color scheme still applies; write failures are
//! returned for the caller to log.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::theme::ThemeMode;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// String key/value backend.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and hosts without persistent storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// What the preference slot held when read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoredPreference {
    Absent,
    Mode(ThemeMode),
    /// A value other than `"dark"`/`"light"`. Counts as present.
    Unrecognized(String),
}

/// The single persisted theme key.
#[derive(Debug)]
pub struct PreferenceStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self { backend, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn get(&self) -> StoredPreference {
        match self.backend.get(&self.key) {
            Ok(None) => StoredPreference::Absent,
            Ok(Some(raw)) => match ThemeMode::parse(&raw) {
                Some(mode) => StoredPreference::Mode(mode),
                None => StoredPreference::Unrecognized(raw),
            },
            Err(e) => {
                log::warn!("theme preference read failed, using system preference: {e}");
                StoredPreference::Absent
            }
        }
    }

    /// Overwrite the slot with `mode`.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`StorageError`].
    pub fn set(&self, mode: ThemeMode) -> Result<(), StorageError> {
        self.backend.set(&self.key, mode.as_str())
    }
}
