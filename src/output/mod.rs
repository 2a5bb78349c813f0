//! Output module for exports and terminal reports
//!
//! This module handles:
//! - Converting a result set to CSV and JSON
//! - Writing the export files
//! - Formatting progress, results and history for the terminal

mod csv;
mod json;
pub mod report;

pub use self::csv::{to_csv, CSV_HEADER, UNTITLED};
pub use self::json::to_json;

use crate::session::CrawlResultItem;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the CSV export
pub const CSV_FILE_NAME: &str = "crawl_results.csv";

/// File name of the JSON export
pub const JSON_FILE_NAME: &str = "crawl_results.json";

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Writes `crawl_results.csv` into `dir`, returning the file path
pub fn write_csv(results: &[CrawlResultItem], dir: &Path) -> ExportResult<PathBuf> {
    let path = dir.join(CSV_FILE_NAME);
    fs::create_dir_all(dir)?;
    fs::write(&path, to_csv(results))?;
    tracing::info!("Wrote {} rows to {}", results.len(), path.display());
    Ok(path)
}

/// Writes `crawl_results.json` into `dir`, returning the file path
pub fn write_json(results: &[CrawlResultItem], dir: &Path) -> ExportResult<PathBuf> {
    let path = dir.join(JSON_FILE_NAME);
    fs::create_dir_all(dir)?;
    fs::write(&path, to_json(results)?)?;
    tracing::info!("Wrote {} items to {}", results.len(), path.display());
    Ok(path)
}
