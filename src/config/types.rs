use serde::Deserialize;

/// Main configuration structure for Crawl-Console
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub history: HistoryConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Crawl service connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the crawl service, e.g. `http://localhost:9000`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User agent sent with every crawl request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Defaults applied to new crawl sessions
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Traversal depth used when none is given on the command line
    #[serde(rename = "default-depth", default = "default_depth")]
    pub default_depth: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
        }
    }
}

/// Crawl history persistence
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Path to the SQLite database holding the history key
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Key the history log is stored under
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

/// Export destination
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory that receives `crawl_results.csv` and `crawl_results.json`
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_user_agent() -> String {
    format!("crawl-console/{}", env!("CARGO_PKG_VERSION"))
}

fn default_depth() -> u8 {
    2
}

fn default_namespace() -> String {
    crate::history::DEFAULT_NAMESPACE.to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}
