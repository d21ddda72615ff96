//! Default values for foodcheck configuration.

use super::types::{EndpointsConfig, HttpConfig, RatingsConfig, ScanConfig, TuiConfig};
use crate::api::DEFAULT_API_BASE;
use crate::model::DEFAULT_PRODUCT_NAME;
use crate::store::DEFAULT_RATING_LIMIT;

/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default TUI event poll interval.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Default lifetime of a status-bar notification.
pub const DEFAULT_TOAST_SECS: u64 = 4;

/// Theme names accepted by `tui.theme`.
pub const THEME_NAMES: &[&str] = &["dark", "light", "high-contrast"];

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for RatingsConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RATING_LIMIT,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            toast_secs: DEFAULT_TOAST_SECS,
        }
    }
}
