//! JSON export

use crate::output::ExportResult;
use crate::session::CrawlResultItem;

/// Renders a result set as indented JSON, fields exactly as stored
pub fn to_json(results: &[CrawlResultItem]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
