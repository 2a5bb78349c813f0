//! CSV export
//!
//! Header row unquoted, every data field quoted with embedded quotes
//! doubled, records separated by `\n` with no trailing newline.

use crate::session::CrawlResultItem;

/// Header row of the CSV export
pub const CSV_HEADER: &str = "URL,Title,Description,Keywords,Depth";

/// Title written when the service sent none
pub const UNTITLED: &str = "Untitled Page";

/// Renders a result set as CSV text
pub fn to_csv(results: &[CrawlResultItem]) -> String {
    let mut rows = Vec::with_capacity(results.len() + 1);
    rows.push(CSV_HEADER.to_string());
    rows.extend(results.iter().map(format_row));
    rows.join("\n")
}

fn format_row(item: &CrawlResultItem) -> String {
    let fields = [
        item.url.clone(),
        item.display_title().unwrap_or(UNTITLED).to_string(),
        item.description.clone().unwrap_or_default(),
        item.keyword_list().join(";"),
        item.depth.to_string(),
    ];

    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
