//! Plain-text rendering of a session for the terminal
//!
//! Formatting functions return strings so they can be tested; the `print_*`
//! wrappers write them to stdout.

use crate::history::HistoryEntry;
use crate::output::UNTITLED;
use crate::session::{CrawlResultItem, ProgressLogEntry};
use crate::SessionError;

/// Shown for items without a description
pub const NO_DESCRIPTION: &str = "Page has been successfully crawled";

/// Formats the progress log, one line per entry
pub fn format_progress(log: &[ProgressLogEntry]) -> String {
    let mut out = String::new();
    if log.is_empty() {
        return out;
    }

    out.push_str("Crawl Progress\n");
    for entry in log {
        out.push_str(&format!(
            "  [{}] {}\n",
            entry.timestamp.format("%H:%M:%S"),
            entry.message
        ));
    }
    out
}

/// Formats the current error, if any
pub fn format_error(error: Option<&SessionError>) -> String {
    match error {
        Some(e) => format!("Error: {}\n", e),
        None => String::new(),
    }
}

/// Formats the result set as cards, or the empty-state hint
///
/// `url` is the URL currently entered; it only decides which hint is shown
/// when there are no results.
pub fn format_results(results: &[CrawlResultItem], url: &str) -> String {
    let mut out = String::new();

    if results.is_empty() {
        if url.is_empty() {
            out.push_str("Enter a website URL to begin crawling.\n");
        } else {
            out.push_str("No results found. Try a different URL.\n");
        }
        return out;
    }

    out.push_str(&format!("Results ({} pages found)\n\n", results.len()));
    for item in results {
        out.push_str(&format!("{} (Depth: {})\n", item.url, item.depth));
        out.push_str(&format!(
            "  {}\n",
            item.display_title().unwrap_or(UNTITLED)
        ));
        let description = item
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(NO_DESCRIPTION);
        out.push_str(&format!("  {}\n", description));

        let keywords = item.keyword_list();
        if !keywords.is_empty() {
            out.push_str(&format!("  Keywords: {}\n", keywords.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Formats the recent-crawl list, numbered from 1
pub fn format_history(history: &[HistoryEntry]) -> String {
    let mut out = String::new();
    if history.is_empty() {
        out.push_str("No recent crawls.\n");
        return out;
    }

    out.push_str("Recent Crawls\n");
    for (i, entry) in history.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", i + 1, entry.url));
        out.push_str(&format!(
            "      {} ({} pages)\n",
            entry.local_time(),
            entry.count
        ));
    }
    out
}

pub fn print_progress(log: &[ProgressLogEntry]) {
    print!("{}", format_progress(log));
}

pub fn print_error(error: Option<&SessionError>) {
    print!("{}", format_error(error));
}

pub fn print_results(results: &[CrawlResultItem], url: &str) {
    print!("{}", format_results(results, url));
}

pub fn print_history(history: &[HistoryEntry]) {
    print!("{}", format_history(history));
}
