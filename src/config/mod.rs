//! Configuration module for foodcheck.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.foodcheck.yaml` file in the working directory or
//! `~/.config/foodcheck/`:
//!
//! ```yaml
//! endpoints:
//!   ocr_analyze: https://functions.example.test/ocr-analyze
//! http:
//!   timeout_secs: 15
//! tui:
//!   theme: high-contrast
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{DEFAULT_TICK_RATE_MS, DEFAULT_TIMEOUT_SECS, DEFAULT_TOAST_SECS, THEME_NAMES};
pub use types::{
    AppConfig, ConfigOverrides, EndpointsConfig, HistoryConfig, HttpConfig, RatingsConfig,
    ScanConfig, TuiConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    default_config_path, discover_config_file, generate_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.foodcheck.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
