//! Per-session progress log

use chrono::{DateTime, Utc};
use std::fmt;

/// A timestamped, human-readable line in the progress log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl ProgressLogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ProgressLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Append-only log, reset when a new session starts
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    entries: Vec<ProgressLogEntry>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let entry = ProgressLogEntry::new(message);
        tracing::debug!("progress: {}", entry.message);
        self.entries.push(entry);
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ProgressLogEntry] {
        &self.entries
    }

    /// Messages without timestamps, in order
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
