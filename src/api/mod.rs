//! Client side of the analysis backend.
//!
//! The backend is four independent HTTP functions: OCR, ingredient scoring,
//! product persistence and ingredient ratings. This module holds their wire
//! types, the [`FoodBackend`] trait the rest of the crate is written
//! against, and the blocking `reqwest` implementation.
//!
//! # Example
//!
//! ```no_run
//! use foodcheck::api::{FoodBackend, HistoryQuery, HttpBackend, HttpBackendConfig};
//!
//! let backend = HttpBackend::new(HttpBackendConfig::from_base("https://food.example.test")).unwrap();
//! let products = backend.list_products(&HistoryQuery::all()).unwrap();
//! println!("{} products scanned", products.len());
//! ```

mod client;
pub mod response;
mod traits;

pub use client::{functions, HttpBackend, HttpBackendConfig, DEFAULT_API_BASE};
pub use traits::{FoodBackend, HistoryQuery, RatingKind, ScoredIngredients};
