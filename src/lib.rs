//! **Scan a food label, learn how healthy the product is.**
//!
//! `foodcheck` is a client for a food-label analysis backend. A photo of an
//! ingredient list is sent to an OCR function, the recognized ingredient names
//! are scored, and the resulting product is stored in a scan history. The
//! library exposes every step so the bundled CLI and terminal UI, or your own
//! front end, can drive them.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: [`Ingredient`], [`Product`] and the request/response records
//!   exchanged with the backend.
//! - **[`score`]**: the score classifier. Maps a 0-100 score to a
//!   [`HealthTier`] with its labels and presentation tokens.
//! - **[`api`]**: the [`FoodBackend`] trait and its blocking HTTP
//!   implementation, [`HttpBackend`].
//! - **[`workflow`]**: the scan state machine, [`ScanWorkflow`], and the
//!   single-flight [`ScanGate`].
//! - **[`store`]**: [`HistoryStore`] and [`RatingsCache`].
//! - **[`session`]**: the headless view controller, [`Session`].
//! - **[`reports`]**: text and JSON rendering for CLI output.
//! - **[`tui`]**: the interactive terminal UI.
//!
//! ## Getting Started: Scanning a Label
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use foodcheck::{CapturedImage, HttpBackend, HttpBackendConfig, ScanWorkflow, StderrNotifier};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(HttpBackendConfig::from_base("https://api.example.test"))?;
//!     let workflow = ScanWorkflow::new(Arc::new(backend), Arc::new(StderrNotifier::new(false)));
//!
//!     let image = CapturedImage::from_path(Path::new("label.jpg"))?;
//!     let report = workflow.run(Some(image), &mut |state| println!("{}", state.label()));
//!
//!     if let Some(product) = report.product {
//!         println!("{}: {}/100", product.name, product.score);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Browsing History
//!
//! ```no_run
//! use foodcheck::{HistoryQuery, HistoryStore, HttpBackend, HttpBackendConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = HttpBackend::new(HttpBackendConfig::default())?;
//!     let mut history = HistoryStore::new();
//!     history.refresh(&backend, &HistoryQuery::all())?;
//!
//!     for product in history.filter("йогурт") {
//!         println!("{} {}", product.scan_date_label(), product.name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! This documentation is for the `foodcheck` library crate. The binary of the
//! same name offers `scan`, `history`, `rating` and an interactive `tui`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // Score and layout math casts between u8/u16/usize/f64 on bounded values
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod reports;
pub mod score;
pub mod session;
pub mod store;
pub mod tui;
pub mod workflow;

// Re-export main types for convenience
pub use api::{FoodBackend, HistoryQuery, HttpBackend, HttpBackendConfig, RatingKind};
pub use config::{AppConfig, ConfigError, ConfigOverrides, Validatable};
pub use error::{ApiErrorKind, ErrorContext, FoodCheckError, OptionContext, Result};
pub use model::{CapturedImage, Category, Identifier, Ingredient, NewProduct, Product, ProductId};
pub use notify::{ChannelNotifier, Notification, NotificationKind, Notifier, StderrNotifier};
pub use reports::{ReportFormat, ReportGenerator};
pub use score::{classify, HealthTier, ScoreClass};
pub use session::{Session, TabKind};
pub use store::{HistoryStore, RatingsCache, RatingsFetch, RatingsUpdate};
pub use workflow::{ScanFailure, ScanGate, ScanOutcome, ScanPermit, ScanReport, ScanState, ScanWorkflow};
