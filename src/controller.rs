//! Session controller - orchestrates user actions
//!
//! The controller owns the crawl session, the history store and the form
//! values (URL and depth), and enforces the single-flight rule: while a
//! request is outstanding every further submission is refused before it
//! reaches the session or the network.
//!
//! State lives behind one mutex that is never held across an `.await`, so
//! submissions can be driven from concurrent tasks and the refusal is real.

use crate::config::Config;
use crate::history::{HistoryEntry, HistoryStore, KeyValueStore, StorageResult};
use crate::output::{to_csv, to_json, ExportResult};
use crate::service::{CrawlService, HttpCrawlService};
use crate::session::{
    CrawlRequest, CrawlResultItem, CrawlSession, ProgressLogEntry, Resolution, SessionState,
};
use crate::{ConsoleError, SessionError, SessionResult};
use std::sync::{Mutex, MutexGuard, PoisonError};

struct Inner<K> {
    session: CrawlSession,
    history: HistoryStore<K>,
    url: String,
    depth: u8,
}

fn lock<K>(inner: &Mutex<Inner<K>>) -> MutexGuard<'_, Inner<K>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Resolves the session as abandoned if a submission future is dropped
/// before the service answers
struct FlightGuard<'a, K> {
    inner: &'a Mutex<Inner<K>>,
    armed: bool,
}

impl<K> FlightGuard<'_, K> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<K> Drop for FlightGuard<'_, K> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("Submission dropped while in flight");
            let _ = lock(self.inner).session.resolve(Err(SessionError::Abandoned));
        }
    }
}

/// Drives crawl sessions in response to user actions
pub struct SessionController<S, K> {
    service: S,
    inner: Mutex<Inner<K>>,
}

impl<K: KeyValueStore> SessionController<HttpCrawlService, K> {
    /// Builds a controller talking HTTP to the configured service, with
    /// history kept in `store`
    pub fn from_config(config: &Config, store: K) -> Result<Self, ConsoleError> {
        let service = HttpCrawlService::from_config(&config.service)?;
        let history = HistoryStore::open(store, config.history.namespace.as_str());
        Ok(Self::new(service, history, config.session.default_depth))
    }
}

impl<S: CrawlService, K: KeyValueStore> SessionController<S, K> {
    pub fn new(service: S, history: HistoryStore<K>, depth: u8) -> Self {
        Self {
            service,
            inner: Mutex::new(Inner {
                session: CrawlSession::new(),
                history,
                url: String::new(),
                depth,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<K>> {
        lock(&self.inner)
    }

    /// Sets the form values and submits them
    ///
    /// Returns the number of pages found, or the reason the request was
    /// refused or failed.
    pub async fn submit(&self, url: &str, depth: u8) -> SessionResult<usize> {
        {
            let mut inner = self.lock();
            inner.url = url.to_string();
            inner.depth = depth;
        }
        self.submit_current().await
    }

    /// Re-runs a past crawl with the current depth
    pub async fn replay(&self, url: &str) -> SessionResult<usize> {
        self.set_url(url);
        self.submit_current().await
    }

    /// Submits whatever URL and depth the form currently holds
    pub async fn submit_current(&self) -> SessionResult<usize> {
        let request = {
            let mut inner = self.lock();
            let request = CrawlRequest::new(inner.url.clone(), inner.depth);

            // empty URL: the session records the notice, nothing is sent
            if request.url.is_empty() {
                return inner.session.begin(request).map(|_| 0);
            }
            if inner.session.is_in_flight() {
                tracing::debug!("Refusing {}: a crawl is already in flight", request.url);
                return Err(SessionError::InFlight);
            }

            inner.session.begin(request.clone())?;
            request
        };

        let guard = FlightGuard {
            inner: &self.inner,
            armed: true,
        };
        let outcome = self.service.crawl(&request).await;
        guard.disarm();

        let mut inner = self.lock();
        match inner.session.resolve(outcome)? {
            Resolution::Succeeded { request, count } => {
                let entry = HistoryEntry::new(request.url, count);
                if let Err(e) = inner.history.record(entry) {
                    tracing::warn!("Failed to persist crawl history: {}", e);
                }
                Ok(count)
            }
            Resolution::Failed { reason, .. } => Err(reason),
        }
    }

    pub fn clear_history(&self) -> StorageResult<()> {
        self.lock().history.clear()
    }

    pub fn results(&self) -> Vec<CrawlResultItem> {
        self.lock().session.results().to_vec()
    }

    pub fn progress_log(&self) -> Vec<ProgressLogEntry> {
        self.lock().session.progress_log().to_vec()
    }

    pub fn progress_messages(&self) -> Vec<String> {
        self.lock()
            .session
            .progress_log()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn error(&self) -> Option<SessionError> {
        self.lock().session.error().cloned()
    }

    pub fn state(&self) -> SessionState {
        self.lock().session.state().clone()
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.entries().to_vec()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().session.is_in_flight()
    }

    pub fn url(&self) -> String {
        self.lock().url.clone()
    }

    pub fn set_url(&self, url: &str) {
        self.lock().url = url.to_string();
    }

    pub fn depth(&self) -> u8 {
        self.lock().depth
    }

    pub fn set_depth(&self, depth: u8) {
        self.lock().depth = depth;
    }

    /// CSV export of the current result set
    pub fn export_csv(&self) -> String {
        to_csv(self.lock().session.results())
    }

    /// JSON export of the current result set
    pub fn export_json(&self) -> ExportResult<String> {
        to_json(self.lock().session.results())
    }
}
