//! Session state definitions
//!
//! A session moves `Idle -> Submitting -> Succeeded | Failed`. The two
//! outcome states keep the last result around for display but accept the
//! next submission exactly like `Idle` does.

use crate::session::types::{CrawlRequest, CrawlResultItem};
use crate::SessionError;
use std::fmt;

/// Represents the current state of a crawl session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing submitted yet
    #[default]
    Idle,

    /// A request has been sent and the service has not answered
    Submitting { request: CrawlRequest },

    /// The service answered with a result set
    Succeeded {
        request: CrawlRequest,
        results: Vec<CrawlResultItem>,
    },

    /// The request failed; no results are kept
    Failed {
        request: CrawlRequest,
        reason: SessionError,
    },
}

impl SessionState {
    /// Returns true while a request is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    /// Returns true if a new submission may start from here
    pub fn accepts_submission(&self) -> bool {
        !self.is_in_flight()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Result set of the last successful request, empty otherwise
    pub fn results(&self) -> &[CrawlResultItem] {
        match self {
            Self::Succeeded { results, .. } => results.as_slice(),
            _ => &[],
        }
    }

    /// Request currently or most recently handled
    pub fn request(&self) -> Option<&CrawlRequest> {
        match self {
            Self::Idle => None,
            Self::Submitting { request }
            | Self::Succeeded { request, .. }
            | Self::Failed { request, .. } => Some(request),
        }
    }

    pub fn failure(&self) -> Option<&SessionError> {
        match self {
            Self::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting { .. } => "submitting",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CrawlRequest {
        CrawlRequest::new("https://example.com", 2)
    }

    #[test]
    fn test_accepts_submission() {
        assert!(SessionState::Idle.accepts_submission());
        assert!(SessionState::Succeeded {
            request: request(),
            results: vec![],
        }
        .accepts_submission());
        assert!(SessionState::Failed {
            request: request(),
            reason: SessionError::Service("boom".to_string()),
        }
        .accepts_submission());

        assert!(!SessionState::Submitting { request: request() }.accepts_submission());
    }

    #[test]
    fn test_is_success() {
        assert!(!SessionState::Idle.is_success());
        assert!(!SessionState::Submitting { request: request() }.is_success());
        assert!(SessionState::Succeeded {
            request: request(),
            results: vec![],
        }
        .is_success());
    }

    #[test]
    fn test_results_only_when_succeeded() {
        let items = vec![CrawlResultItem::new("https://example.com", 0)];
        let succeeded = SessionState::Succeeded {
            request: request(),
            results: items.clone(),
        };
        assert_eq!(succeeded.results(), items.as_slice());

        assert!(SessionState::Idle.results().is_empty());
        assert!(SessionState::Submitting { request: request() }
            .results()
            .is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(
            SessionState::Submitting { request: request() }.to_string(),
            "submitting"
        );
    }
}
