//! Crawl-Console: a client-side controller for a remote crawl service
//!
//! This crate submits crawl jobs to an external crawl service, tracks the
//! lifecycle of each request, keeps a bounded history of recent crawls and
//! exports results as CSV or JSON. The crawling itself happens on the
//! service side; nothing here fetches or parses pages.

pub mod config;
pub mod controller;
pub mod history;
pub mod output;
pub mod service;
pub mod session;

use thiserror::Error;

/// Main error type for Crawl-Console operations
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] history::StorageError),

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors that end (or refuse) a crawl session
///
/// The display strings double as the user-visible messages that land in
/// the progress log, so they are kept short.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please enter a URL")]
    Validation,

    #[error("A crawl is already in progress")]
    InFlight,

    #[error("No crawl is in progress")]
    NotSubmitting,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Service(String),

    #[error("Crawl was abandoned before the service responded")]
    Abandoned,
}

/// Failures talking to the crawl service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid response body: {0}")]
    Body(String),
}

/// Result type alias for Crawl-Console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for session operations
pub type SessionResult<T> = std::result::Result<T, SessionError>;

// Re-export commonly used types
pub use config::Config;
pub use controller::SessionController;
pub use history::{HistoryEntry, HistoryStore, KeyValueStore, MemoryStore, SqliteStore};
pub use service::{CrawlService, HttpCrawlService};
pub use session::{CrawlRequest, CrawlResultItem, CrawlSession, ProgressLogEntry, SessionState};
