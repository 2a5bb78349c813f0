//! Session module for tracking one crawl request at a time
//!
//! # Components
//!
//! - `CrawlSession`: the state machine (submit, resolve, progress log)
//! - `SessionState`: `Idle | Submitting | Succeeded | Failed`
//! - `ProgressLog`: timestamped messages for the current session
//! - `CrawlRequest` / `CrawlResultItem`: payloads exchanged with the service

mod crawl_session;
mod progress;
mod state;
mod types;

pub use crawl_session::{CrawlSession, Resolution};
pub use progress::{ProgressLog, ProgressLogEntry};
pub use state::SessionState;
pub use types::{CrawlRequest, CrawlResultItem};
