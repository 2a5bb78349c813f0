//! HTTP client for the crawl service
//!
//! One `POST` per crawl, JSON in and out. The client deliberately carries no
//! timeout and no retry policy: the request resolves when the service
//! answers or the connection fails.

use crate::config::ServiceConfig;
use crate::service::CrawlService;
use crate::session::{CrawlRequest, CrawlResultItem};
use crate::{ConsoleError, SessionError, SessionResult, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Path of the crawl endpoint, relative to the service base URL
pub const CRAWL_PATH: &str = "api/crawl";

/// Builds an HTTP client for talking to the crawl service
///
/// # Example
///
/// ```no_run
/// use crawl_console::config::ServiceConfig;
/// use crawl_console::service::build_http_client;
///
/// let config = ServiceConfig {
///     base_url: "http://localhost:9000".to_string(),
///     user_agent: "crawl-console/0.1".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &ServiceConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .brotli(true)
        .build()
}

/// `CrawlService` backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpCrawlService {
    client: Client,
    endpoint: Url,
}

impl HttpCrawlService {
    /// Creates a service client posting to `{base_url}/api/crawl`
    ///
    /// A path on `base_url` is kept, so `http://host/crawler` posts to
    /// `http://host/crawler/api/crawl`.
    pub fn new(client: Client, base_url: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base.join(CRAWL_PATH)?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConsoleError> {
        let client = build_http_client(config)?;
        Ok(Self::new(client, &config.base_url)?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl CrawlService for HttpCrawlService {
    async fn crawl(&self, request: &CrawlRequest) -> SessionResult<Vec<CrawlResultItem>> {
        tracing::debug!("POST {} ({} at depth {})", self.endpoint, request.url, request.depth);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()).into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        decode_response(&body)
    }
}

/// Interprets the body of a 2xx response
///
/// A JSON array is the result set. An object carrying a non-empty `error`
/// field is a service-reported failure. Anything else is an invalid body.
pub fn decode_response(body: &str) -> SessionResult<Vec<CrawlResultItem>> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| TransportError::Body(e.to_string()))?;

    if let Some(reason) = service_error(&value) {
        return Err(SessionError::Service(reason));
    }

    serde_json::from_value(value).map_err(|e| TransportError::Body(e.to_string()).into())
}

fn service_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
