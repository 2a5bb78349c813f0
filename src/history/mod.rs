//! History module for persisting recent crawls
//!
//! This module handles:
//! - The `KeyValueStore` seam with SQLite and in-memory backends
//! - The bounded, newest-first `HistoryStore`
//! - The `HistoryEntry` record and its JSON encoding

mod memory;
mod schema;
mod sqlite;
mod store;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::HistoryStore;
pub use traits::{KeyValueStore, StorageError, StorageResult};

use chrono::{DateTime, Local, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the history log
pub const HISTORY_LIMIT: usize = 10;

/// Key the history log is stored under unless configured otherwise
pub const DEFAULT_NAMESPACE: &str = "crawlHistory";

/// A past successful crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    #[serde(with = "iso8601")]
    pub timestamp: DateTime<Utc>,
    pub count: usize,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time
    ///
    /// The timestamp is truncated to milliseconds, the precision it is
    /// stored with.
    pub fn new(url: impl Into<String>, count: usize) -> Self {
        Self {
            url: url.into(),
            timestamp: Utc::now().trunc_subsecs(3),
            count,
        }
    }

    /// ISO-8601 form, e.g. `2024-05-01T12:30:00.123Z`
    pub fn timestamp_string(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Timestamp in the local time zone, for display
    pub fn local_time(&self) -> String {
        self.timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
