//! Configuration types for foodcheck.

use crate::api::HttpBackendConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Application configuration, loaded from a YAML file and overridden by CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Backend endpoint URLs
    pub endpoints: EndpointsConfig,
    /// HTTP transport settings
    pub http: HttpConfig,
    /// Ingredient leaderboards
    pub ratings: RatingsConfig,
    /// Scan history listing
    pub history: HistoryConfig,
    /// Scan workflow
    pub scan: ScanConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport configuration for [`crate::api::HttpBackend`].
    #[must_use]
    pub fn backend_config(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            ocr_analyze: self.endpoints.ocr_analyze.clone(),
            analyze_ingredients: self.endpoints.analyze_ingredients.clone(),
            products: self.endpoints.products.clone(),
            ingredients_rating: self.endpoints.ingredients_rating.clone(),
            timeout: Duration::from_secs(self.http.timeout_secs),
        }
    }
}

// ============================================================================
// Command-line overrides
// ============================================================================

/// Values given on the command line. Each present value wins over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Point all four endpoints at `<base>/<function>`
    pub api_base: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ConfigOverrides {
    /// Write every present override into `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base) = &self.api_base {
            config.endpoints = EndpointsConfig::from_base(base);
        }
        if let Some(secs) = self.timeout_secs {
            config.http.timeout_secs = secs;
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Full URLs of the four backend functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EndpointsConfig {
    /// OCR endpoint (`POST { image }`)
    pub ocr_analyze: String,
    /// Ingredient scoring endpoint (`POST { ingredients }`)
    pub analyze_ingredients: String,
    /// Product history endpoint (`GET` list, `POST` create)
    pub products: String,
    /// Ingredient leaderboard endpoint (`GET ?type=&limit=`)
    pub ingredients_rating: String,
}

impl EndpointsConfig {
    /// Derive all endpoints from a common base URL.
    #[must_use]
    pub fn from_base(base: &str) -> Self {
        let http = HttpBackendConfig::from_base(base);
        Self {
            ocr_analyze: http.ocr_analyze,
            analyze_ingredients: http.analyze_ingredients,
            products: http.products,
            ingredients_rating: http.ingredients_rating,
        }
    }

    /// All endpoints with their config keys.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("endpoints.ocr_analyze", &self.ocr_analyze),
            ("endpoints.analyze_ingredients", &self.analyze_ingredients),
            ("endpoints.products", &self.products),
            ("endpoints.ingredients_rating", &self.ingredients_rating),
        ]
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[schemars(range(min = 1))]
    pub timeout_secs: u64,
}

/// Ingredient leaderboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RatingsConfig {
    /// Entries per leaderboard
    #[schemars(range(min = 1, max = 100))]
    pub limit: u32,
}

/// Scan history settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HistoryConfig {
    /// Server-side limit on the number of products fetched (backend default: 20)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Scan workflow settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanConfig {
    /// Name given to newly scanned products
    pub product_name: String,
}

/// TUI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Event poll interval in milliseconds
    #[schemars(range(min = 1))]
    pub tick_rate_ms: u64,
    /// How long notifications stay in the status bar, in seconds
    pub toast_secs: u64,
}
