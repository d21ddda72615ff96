//! Configuration validation for foodcheck.

use super::defaults::THEME_NAMES;
use super::types::{AppConfig, EndpointsConfig, HttpConfig, RatingsConfig, TuiConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.endpoints.validate());
        errors.extend(self.http.validate());
        errors.extend(self.ratings.validate());
        errors.extend(self.tui.validate());

        if let Some(0) = self.history.limit {
            errors.push(ConfigError::new(
                "history.limit",
                "Limit must be greater than 0",
            ));
        }
        if self.scan.product_name.trim().is_empty() {
            errors.push(ConfigError::new(
                "scan.product_name",
                "Product name must not be empty",
            ));
        }

        errors
    }
}

impl Validatable for EndpointsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.entries()
            .into_iter()
            .filter(|(_, url)| !is_http_url(url))
            .map(|(field, url)| {
                ConfigError::new(field, format!("Expected an http(s) URL, got '{url}'"))
            })
            .collect()
    }
}

impl Validatable for HttpConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "http.timeout_secs",
                "Timeout must be greater than 0",
            ));
        }
        errors
    }
}

impl Validatable for RatingsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(1..=100).contains(&self.limit) {
            errors.push(ConfigError::new(
                "ratings.limit",
                format!("Limit must be between 1 and 100, got {}", self.limit),
            ));
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !THEME_NAMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    THEME_NAMES.join(", ")
                ),
            ));
        }
        if self.tick_rate_ms == 0 {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                "Tick rate must be greater than 0",
            ));
        }
        errors
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_invalid_endpoint_url() {
        let mut config = AppConfig::default();
        config.endpoints.products = "ftp://example.test/products".to_string();
        config.endpoints.ocr_analyze = "https://".to_string();
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.field == "endpoints.products"));
        assert!(errors.iter().any(|e| e.field == "endpoints.ocr_analyze"));
    }

    #[test]
    fn test_limits_and_timeouts() {
        let mut config = AppConfig::default();
        config.http.timeout_secs = 0;
        config.ratings.limit = 0;
        config.history.limit = Some(0);
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["http.timeout_secs", "ratings.limit", "history.limit"]
        );
    }

    #[test]
    fn test_unknown_theme() {
        let mut config = AppConfig::default();
        config.tui.theme = "solarized".to_string();
        config.tui.tick_rate_ms = 0;
        let errors = config.tui.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().starts_with("tui.theme: Invalid theme"));
    }
}
