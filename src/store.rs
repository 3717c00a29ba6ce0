//! State containers whose value survives reloads through a pluggable
//! storage port.

mod draft;

use std::{collections::HashMap, fmt::Debug};

pub use draft::{Draft, DraftError, Section};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage failed: {0}")]
    Storage(String),

    #[error("Failed to (de)serialize stored state for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value storage the state is persisted to, such as the browser's
/// local storage.
pub trait StoragePort {
    /// # Errors
    ///
    /// If the storage can't be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// If the storage can't be written.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// If the storage can't be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Storage that lives as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> { self.entries.get(key).map(String::as_str) }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> { Ok(self.entries.get(key).cloned()) }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Holds a value of `T`, starting from `T::default()` or whatever was
/// previously saved under `key`, and writes it back as JSON after every
/// change.
#[derive(Debug)]
pub struct PersistedStore<T, S> {
    key: String,
    state: T,
    storage: S,
}

impl<T, S> PersistedStore<T, S>
where
    T: Serialize + DeserializeOwned + Default + Debug,
    S: StoragePort,
{
    /// # Errors
    ///
    /// If the storage can't be read or holds something that isn't a `T`.
    pub fn open(storage: S, key: impl Into<String>) -> Result<Self, StoreError> {
        let key = key.into();
        let state = match storage.load(&key)? {
            Some(json) => serde_json::from_str(&json).map_err(|source| {
                StoreError::Serialization {
                    key: key.clone(),
                    source,
                }
            })?,
            None => {
                debug!("Nothing stored under '{key}', starting from the initial state");
                T::default()
            }
        };

        Ok(Self {
            key,
            state,
            storage,
        })
    }

    #[must_use]
    pub fn state(&self) -> &T { &self.state }

    #[must_use]
    pub fn storage(&self) -> &S { &self.storage }

    /// Applies `change` and persists the result. The in-memory state is
    /// updated even if persisting fails.
    ///
    /// # Errors
    ///
    /// If the new state can't be serialized or saved.
    pub fn update<F, R>(&mut self, change: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut T) -> R,
    {
        let result = change(&mut self.state);
        self.persist()?;
        Ok(result)
    }

    /// Replaces the state with the initial value and forgets the stored
    /// copy.
    ///
    /// # Errors
    ///
    /// If the stored copy can't be removed.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state = T::default();
        self.storage.remove(&self.key)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.state).map_err(|source| StoreError::Serialization {
            key: self.key.clone(),
            source,
        })?;
        self.storage.save(&self.key, &json)
    }
}
