//! Request and result payloads exchanged with the crawl service

use serde::{Deserialize, Serialize};

/// One crawl job as submitted to the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub url: String,
    pub depth: u8,
}

impl CrawlRequest {
    pub fn new(url: impl Into<String>, depth: u8) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

/// A single page reported by the crawl service
///
/// Everything except `url` and `depth` is optional; the service omits
/// fields it could not extract, and an explicit `null` reads as absent.
/// Absent fields stay absent when the item is serialized again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResultItem {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    pub depth: u32,
}

impl CrawlResultItem {
    /// Creates an item with only the required fields set
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            keywords: None,
            depth,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Title, or `None` when the service sent nothing usable
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Keywords as a slice, empty when absent
    pub fn keyword_list(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or(&[])
    }
}
