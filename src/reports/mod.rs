//! Rendering of products, history and leaderboards for CLI output.
//!
//! - Text: aligned terminal output, optionally colored by health tier
//! - JSON: structured data for scripting

mod json;
mod text;

pub use json::JsonReporter;
pub use text::TextReporter;

use crate::model::{Ingredient, Product};
use crate::workflow::ScanReport;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

/// Output format of CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// One titled ingredient leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct RatingSection<'a> {
    pub title: &'static str,
    pub ingredients: &'a [Ingredient],
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Result of a single scan.
    fn scan_report(&self, report: &ScanReport) -> Result<String, ReportError>;

    /// A single product with its ingredient breakdown.
    fn product_report(&self, product: &Product) -> Result<String, ReportError>;

    /// Scan history listing.
    fn history_report(&self, products: &[&Product]) -> Result<String, ReportError>;

    /// One or more ingredient leaderboards.
    fn rating_report(&self, sections: &[RatingSection<'_>]) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Reporter for `format`. `colored` only affects text output.
#[must_use]
pub fn create_reporter(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Text if colored => Box::new(TextReporter::new()),
        ReportFormat::Text => Box::new(TextReporter::new().no_color()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
