use crate::config::types::{Config, ExportConfig, HistoryConfig, ServiceConfig, SessionConfig};
use crate::ConfigError;
use url::Url;

/// Smallest depth offered to users
pub const MIN_DEPTH: u8 = 1;

/// Largest depth offered to users
pub const MAX_DEPTH: u8 = 6;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_service_config(&config.service)?;
    validate_session_config(&config.session)?;
    validate_history_config(&config.history)?;
    validate_export_config(&config.export)?;
    Ok(())
}

/// Validates crawl service settings
fn validate_service_config(config: &ServiceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates session defaults
///
/// The depth range is a presentation concern; the session itself accepts any
/// depth and leaves interpretation to the crawl service.
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if !(MIN_DEPTH..=MAX_DEPTH).contains(&config.default_depth) {
        return Err(ConfigError::Validation(format!(
            "default-depth must be between {} and {}, got {}",
            MIN_DEPTH, MAX_DEPTH, config.default_depth
        )));
    }

    Ok(())
}

/// Validates history persistence settings
fn validate_history_config(config: &HistoryConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.namespace.is_empty() {
        return Err(ConfigError::Validation(
            "namespace cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_export_config(config: &ExportConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base_url: &str) -> ServiceConfig {
        ServiceConfig {
            base_url: base_url.to_string(),
            user_agent: "crawl-console/test".to_string(),
        }
    }

    #[test]
    fn test_validate_service_config() {
        assert!(validate_service_config(&service("http://localhost:9000")).is_ok());
        assert!(validate_service_config(&service("https://crawl.example.com/")).is_ok());

        assert!(matches!(
            validate_service_config(&service("not a url")),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_service_config(&service("ftp://example.com")),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let mut config = service("http://localhost:9000");
        config.user_agent = "  ".to_string();
        assert!(validate_service_config(&config).is_err());
    }

    #[test]
    fn test_validate_depth_bounds() {
        for depth in MIN_DEPTH..=MAX_DEPTH {
            assert!(validate_session_config(&SessionConfig {
                default_depth: depth
            })
            .is_ok());
        }

        assert!(validate_session_config(&SessionConfig { default_depth: 0 }).is_err());
        assert!(validate_session_config(&SessionConfig { default_depth: 7 }).is_err());
    }

    #[test]
    fn test_validate_history_config() {
        let ok = HistoryConfig {
            database_path: "./history.db".to_string(),
            namespace: "crawlHistory".to_string(),
        };
        assert!(validate_history_config(&ok).is_ok());

        let no_path = HistoryConfig {
            database_path: String::new(),
            ..ok.clone()
        };
        assert!(validate_history_config(&no_path).is_err());

        let no_namespace = HistoryConfig {
            namespace: String::new(),
            ..ok
        };
        assert!(validate_history_config(&no_namespace).is_err());
    }
}
