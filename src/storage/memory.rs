//! `MemoryStore` - HashMap-backed durable store for tests and throwaway sessions.

use super::DurableStore;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

#[derive(Debug, Default)]
struct Inner {
    data: HashMap<String, String>,
    writes: Vec<(String, String)>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
}

/// In-memory durable store backed by a `HashMap` behind a `RwLock`.
///
/// Keeps a log of every successful `set` and can be told to fail reads or
/// writes for specific keys.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`. Seeding is not logged as writes.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: RwLock::new(Inner {
                data,
                ..Inner::default()
            }),
        }
    }

    /// Make every subsequent `get` of `key` fail.
    pub fn fail_reads_for(&self, key: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_reads.insert(key.to_owned());
        }
    }

    /// Make every subsequent `set` of `key` fail.
    pub fn fail_writes_for(&self, key: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failing_writes.insert(key.to_owned());
        }
    }

    /// Every successful `set`, in completion order.
    #[must_use]
    pub fn writes(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .map(|inner| inner.writes.clone())
            .unwrap_or_default()
    }

    /// Successful writes of a single key, in completion order.
    #[must_use]
    pub fn writes_for(&self, key: &str) -> Vec<String> {
        self.writes()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner
            .read()
            .map(|inner| inner.data.clone())
            .unwrap_or_default()
    }
}

fn poisoned<T>(e: &std::sync::PoisonError<T>) -> Error {
    Error::Storage(e.to_string())
}

#[async_trait]
impl DurableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.read().map_err(|e| poisoned(&e))?;
        if inner.failing_reads.contains(key) {
            return Err(Error::Storage(format!("read of '{key}' failed")));
        }
        Ok(inner.data.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.write().map_err(|e| poisoned(&e))?;
        if inner.failing_writes.contains(key) {
            return Err(Error::Storage(format!("write of '{key}' failed")));
        }
        inner.data.insert(key.to_owned(), value.to_owned());
        inner.writes.push((key.to_owned(), value.to_owned()));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write().map_err(|e| poisoned(&e))?;
        inner.data.remove(key);
        Ok(())
    }
}
