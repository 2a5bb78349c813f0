//! The crawl session state machine
//!
//! `CrawlSession` owns the state, the progress log and the notice shown for
//! rejected submissions. It performs no I/O: the caller sends the request
//! between `begin` and `resolve`.

use crate::session::progress::{ProgressLog, ProgressLogEntry};
use crate::session::state::SessionState;
use crate::session::types::{CrawlRequest, CrawlResultItem};
use crate::{SessionError, SessionResult};

/// How a submitted request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Succeeded { request: CrawlRequest, count: usize },
    Failed {
        request: CrawlRequest,
        reason: SessionError,
    },
}

/// State machine for one crawl request at a time
#[derive(Debug, Default)]
pub struct CrawlSession {
    state: SessionState,
    progress: ProgressLog,
    notice: Option<SessionError>,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn progress_log(&self) -> &[ProgressLogEntry] {
        self.progress.entries()
    }

    pub fn progress_messages(&self) -> Vec<&str> {
        self.progress.messages()
    }

    pub fn results(&self) -> &[CrawlResultItem] {
        self.state.results()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state.is_in_flight()
    }

    /// Message for the user: a rejected submission takes precedence over
    /// the failure of the last request until that request resolves
    pub fn error(&self) -> Option<&SessionError> {
        self.notice.as_ref().or_else(|| self.state.failure())
    }

    /// Moves into `Submitting`
    ///
    /// An empty URL is refused with `SessionError::Validation` and leaves
    /// the state and the progress log untouched. On success the previous
    /// result set is dropped and the log restarts with one entry naming the
    /// request.
    pub fn begin(&mut self, request: CrawlRequest) -> SessionResult<()> {
        if request.url.is_empty() {
            self.notice = Some(SessionError::Validation);
            return Err(SessionError::Validation);
        }

        if !self.state.accepts_submission() {
            return Err(SessionError::InFlight);
        }

        self.notice = None;
        self.progress.reset();
        self.progress.push(format!(
            "Starting crawl: {} at depth {}",
            request.url, request.depth
        ));

        tracing::info!(url = %request.url, depth = request.depth, "Crawl submitted");
        self.state = SessionState::Submitting { request };

        Ok(())
    }

    /// Moves out of `Submitting` with the service's answer
    ///
    /// Returns `SessionError::NotSubmitting` without touching anything when
    /// no request is outstanding.
    pub fn resolve(
        &mut self,
        outcome: SessionResult<Vec<CrawlResultItem>>,
    ) -> SessionResult<Resolution> {
        let request = match &self.state {
            SessionState::Submitting { request } => request.clone(),
            _ => return Err(SessionError::NotSubmitting),
        };
        self.notice = None;

        let resolution = match outcome {
            Ok(results) => {
                let count = results.len();
                self.progress
                    .push(format!("Crawl complete: {} pages found", count));
                tracing::info!(url = %request.url, count, "Crawl complete");

                self.state = SessionState::Succeeded {
                    request: request.clone(),
                    results,
                };
                Resolution::Succeeded { request, count }
            }
            Err(reason) => {
                self.progress.push(format!("Error: {}", reason));
                tracing::warn!(url = %request.url, "Crawl failed: {}", reason);

                self.state = SessionState::Failed {
                    request: request.clone(),
                    reason: reason.clone(),
                };
                Resolution::Failed { request, reason }
            }
        };

        Ok(resolution)
    }
}
