//! Explicit memoization cache keyed on call parameters.
//!
//! Entries live until they are invalidated; there is no time-based expiry.
//! A computation that fails is never stored and never disturbs an entry that
//! is already present.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct MemoCache<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> MemoCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `value` under `key`, returning the entry it replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.entries.entry(key).or_insert_with(compute).clone()
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for a fallible computation.
    ///
    /// On error nothing is stored and the error is returned as-is.
    pub fn get_or_try_compute<F, E>(&mut self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(v) = self.entries.get(&key) {
            return Ok(v.clone());
        }
        let value = compute()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Async variant of [`get_or_try_compute`](Self::get_or_try_compute).
    ///
    /// The caller holds `&mut self` across the await, so concurrent misses on
    /// a shared cache are serialized by whatever lock guards it.
    pub async fn get_or_try_compute_async<F, Fut, E>(&mut self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(v) = self.entries.get(&key) {
            return Ok(v.clone());
        }
        let value = compute().await?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Drop the entry for `key`. Returns whether one was present.
    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
