use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use super::clock::{Clock, SystemClock};

#[derive(Clone, Debug)]
pub struct CacheEntry<V> {
    pub payload: V,
    pub fetched_at: DateTime<Utc>,
}

/// Keyed store of the last good payload per key.
///
/// Entries are replaced in place and never evicted; the key space is the small
/// fixed set of data kinds and parameterizations the gateway serves.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Returns the payload only while it is younger than `ttl`.
    pub async fn get_if_fresh(&self, key: &str, ttl: Duration) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;

        // A clock that stepped backwards makes the entry look brand new.
        let age = (self.clock.now() - entry.fetched_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        if age < ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Returns whatever is stored for `key`, however old.
    pub async fn get_stale(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.payload.clone())
    }

    pub async fn put(&self, key: impl Into<String>, payload: V) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        let key = key.into();
        // fetched_at never moves backwards for a key
        let fetched_at = match entries.get(&key) {
            Some(previous) if previous.fetched_at > now => previous.fetched_at,
            _ => now,
        };

        entries.insert(key, CacheEntry { payload, fetched_at });
    }

    pub async fn fetched_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let entries = self.entries.read().await;
        entries.get(key).map(|entry| entry.fetched_at)
    }

    pub async fn size(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
