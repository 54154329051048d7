//! In-memory session store used by tests and simulations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::errors::domain::DomainError;
use crate::infra::store::SessionStore;

#[derive(Debug, Clone)]
enum Entry {
    Mapping(HashMap<String, String>),
    List(Vec<String>),
}

/// Process-local store with the same contract as the Redis implementation.
///
/// Mapping and list entries are typed; using a key with the wrong operation
/// surfaces `CorruptState`, mirroring a type clash on a real store.
#[derive(Default)]
pub struct InMemorySessionStore {
    entries: Mutex<HashMap<String, Entry>>,
    unavailable: AtomicBool,
    ops_until_fail: Mutex<Option<u64>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every operation fails with `StoreUnavailable`; lets tests
    /// drive the engine's halt path.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Let `n` more operations succeed, then fail every one after that.
    pub fn set_unavailable_after(&self, n: u64) {
        *self.ops_until_fail.lock() = Some(n);
    }

    /// Snapshot of a stored list (empty if the key is absent).
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.entries.lock().get(key) {
            Some(Entry::List(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("in-memory store switched off"));
        }
        if let Some(remaining) = self.ops_until_fail.lock().as_mut() {
            if *remaining == 0 {
                return Err(DomainError::store_unavailable("in-memory store switched off"));
            }
            *remaining -= 1;
        }
        Ok(())
    }
}

fn wrong_type(key: &str) -> DomainError {
    DomainError::corrupt_state(format!("key '{key}' holds a value of the wrong type"))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, DomainError> {
        self.check_available()?;
        match self.entries.lock().get(key) {
            None => Ok(None),
            Some(Entry::Mapping(map)) => Ok(map.get(field).cloned()),
            Some(Entry::List(_)) => Err(wrong_type(key)),
        }
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<(), DomainError> {
        self.check_available()?;
        let mut entries = self.entries.lock();
        match entries
            .entry(key.to_owned())
            .or_insert_with(|| Entry::Mapping(HashMap::new()))
        {
            Entry::Mapping(map) => {
                map.insert(field.to_owned(), value.to_owned());
                Ok(())
            }
            Entry::List(_) => Err(wrong_type(key)),
        }
    }

    async fn set_field_if_absent(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut entries = self.entries.lock();
        match entries
            .entry(key.to_owned())
            .or_insert_with(|| Entry::Mapping(HashMap::new()))
        {
            Entry::Mapping(map) => {
                if map.contains_key(field) {
                    Ok(false)
                } else {
                    map.insert(field.to_owned(), value.to_owned());
                    Ok(true)
                }
            }
            Entry::List(_) => Err(wrong_type(key)),
        }
    }

    async fn append_to_list(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.check_available()?;
        let mut entries = self.entries.lock();
        match entries
            .entry(key.to_owned())
            .or_insert_with(|| Entry::List(Vec::new()))
        {
            Entry::List(items) => {
                items.push(value.to_owned());
                Ok(())
            }
            Entry::Mapping(_) => Err(wrong_type(key)),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        Ok(self.entries.lock().contains_key(key))
    }
}
