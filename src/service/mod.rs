//! Service module: the outbound seam to the crawl service
//!
//! `CrawlService` is what the controller calls; `HttpCrawlService` is the
//! real implementation speaking `POST /api/crawl`.

mod http;

pub use http::{build_http_client, decode_response, HttpCrawlService, CRAWL_PATH};

use crate::session::{CrawlRequest, CrawlResultItem};
use crate::SessionResult;
use async_trait::async_trait;

/// A backend that runs one crawl and reports its pages
///
/// Implementations resolve exactly once per call and never retry.
#[async_trait]
pub trait CrawlService: Send + Sync {
    async fn crawl(&self, request: &CrawlRequest) -> SessionResult<Vec<CrawlResultItem>>;
}

#[async_trait]
impl<T: CrawlService + ?Sized> CrawlService for std::sync::Arc<T> {
    async fn crawl(&self, request: &CrawlRequest) -> SessionResult<Vec<CrawlResultItem>> {
        (**self).crawl(request).await
    }
}
