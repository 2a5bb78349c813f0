//! Configuration module for Crawl-Console
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use crawl_console::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl-console.toml")).unwrap();
//! println!("Default depth: {}", config.session.default_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ExportConfig, HistoryConfig, ServiceConfig, SessionConfig};

pub use parser::{load_config, parse_config};
pub use validation::{MAX_DEPTH, MIN_DEPTH};
