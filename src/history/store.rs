//! Bounded, write-through crawl history

use crate::history::traits::{KeyValueStore, StorageResult};
use crate::history::{HistoryEntry, HISTORY_LIMIT};

/// Newest-first log of recent successful crawls
///
/// Every mutation rewrites the whole log under `namespace`. The persisted
/// value matches `entries()` after each call, whether the write succeeded
/// or not.
pub struct HistoryStore<K> {
    store: K,
    namespace: String,
    entries: Vec<HistoryEntry>,
}

impl<K: KeyValueStore> HistoryStore<K> {
    /// Wraps `store` and loads whatever log is already persisted
    pub fn open(store: K, namespace: impl Into<String>) -> Self {
        let mut history = Self {
            store,
            namespace: namespace.into(),
            entries: Vec::new(),
        };
        history.load();
        history
    }

    /// Re-reads the persisted log
    ///
    /// Never fails: a missing key, a storage error or undecodable JSON all
    /// yield an empty log.
    pub fn load(&mut self) -> &[HistoryEntry] {
        self.entries = match self.store.load(&self.namespace) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_LIMIT);
                    entries
                }
                Err(e) => {
                    tracing::warn!(
                        "Discarding unreadable history under '{}': {}",
                        self.namespace,
                        e
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read history '{}': {}", self.namespace, e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} history entries", self.entries.len());
        &self.entries
    }

    /// Prepends `entry`, keeps the newest ten and persists the result
    ///
    /// The in-memory log only changes once the store accepted the write.
    pub fn record(&mut self, entry: HistoryEntry) -> StorageResult<()> {
        let mut entries = Vec::with_capacity(HISTORY_LIMIT);
        entries.push(entry);
        entries.extend(self.entries.iter().take(HISTORY_LIMIT - 1).cloned());

        let encoded = serde_json::to_string(&entries)?;
        self.store.save(&self.namespace, &encoded)?;
        tracing::debug!("Persisted {} history entries", entries.len());

        self.entries = entries;
        Ok(())
    }

    /// Removes the persisted value, then empties the log
    pub fn clear(&mut self) -> StorageResult<()> {
        self.store.clear(&self.namespace)?;
        self.entries.clear();
        tracing::info!("History cleared");
        Ok(())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
