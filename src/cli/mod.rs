//! CLI command handlers.
//!
//! Handlers are invoked by main.rs and take the backend as a trait object,
//! so tests can run them against a scripted backend.

mod history;
mod interactive;
mod rating;
mod scan;

pub use history::{run_history, HistoryCommand};
pub use interactive::run_interactive;
pub use rating::{run_rating, RatingCommand};
pub use scan::{run_scan, ScanCommand};

use crate::api::{FoodBackend, HttpBackend};
use crate::config::AppConfig;
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Exit codes of the `foodcheck` binary
pub mod exit_codes {
    /// Command succeeded
    pub const SUCCESS: i32 = 0;
    /// The scan ended in a failure state
    pub const SCAN_FAILED: i32 = 1;
    /// An error occurred before a result was produced
    pub const ERROR: i32 = 3;
}

/// Where and how a command prints its result.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub format: ReportFormat,
    /// Write to this file instead of stdout
    pub file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

impl OutputOptions {
    /// Colors apply to terminal text only and honor `NO_COLOR`.
    #[must_use]
    pub fn use_color(&self) -> bool {
        self.file.is_none() && should_use_color(self.no_color)
    }

    /// Print `content` to stdout or write it to the output file.
    pub fn write(&self, content: &str) -> Result<()> {
        match &self.file {
            None => {
                print!("{content}");
                Ok(())
            }
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write output to {}", path.display()))?;
                if !self.quiet {
                    tracing::info!("Report written to {}", path.display());
                }
                Ok(())
            }
        }
    }
}

/// Check whether colored output should be used
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Build the HTTP backend from the effective configuration.
pub fn build_backend(config: &AppConfig) -> Result<Arc<dyn FoodBackend>> {
    let backend = HttpBackend::new(config.backend_config()).context("failed to build HTTP client")?;
    Ok(Arc::new(backend))
}
