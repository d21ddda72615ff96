//! The backend seam.
//!
//! Everything the client knows about OCR, scoring, persistence and ranking
//! goes through [`FoodBackend`]. The HTTP implementation lives in
//! [`super::HttpBackend`]; tests substitute scripted fakes.

use crate::error::Result;
use crate::model::{CapturedImage, Identifier, Ingredient, NewProduct, Product};
use serde::{Deserialize, Serialize};

/// Which leaderboard to fetch from the ratings endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RatingKind {
    /// Lowest-scored harmful ingredients
    Harmful,
    /// Highest-scored healthy ingredients
    Healthy,
    /// All ingredients, best first
    All,
}

impl RatingKind {
    /// Value of the `type` query parameter.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Harmful => "harmful",
            Self::Healthy => "healthy",
            Self::All => "all",
        }
    }
}

/// Optional server-side filtering of the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Case-insensitive name search done by the backend
    pub search: Option<String>,
    /// Maximum number of products; the backend defaults to 20
    pub limit: Option<u32>,
}

impl HistoryQuery {
    /// Query that fetches the whole (server-limited) list.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }
}

/// Result of scoring a list of ingredient names.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredIngredients {
    /// Product score (average of ingredient scores)
    pub total_score: u8,
    /// Per-ingredient breakdown, in request order
    pub ingredients: Vec<Ingredient>,
}

/// The four external services the client talks to.
///
/// Implementations block the calling thread for the duration of a request.
pub trait FoodBackend: Send + Sync {
    /// Extract ingredient names from a label photo.
    fn recognize(&self, image: &CapturedImage) -> Result<Vec<String>>;

    /// Score a list of ingredient names.
    fn score(&self, names: &[String]) -> Result<ScoredIngredients>;

    /// Persist a scanned product, returning its server id.
    fn save_product(&self, product: &NewProduct) -> Result<Identifier>;

    /// Fetch scanned products, most recent first.
    fn list_products(&self, query: &HistoryQuery) -> Result<Vec<Product>>;

    /// Fetch an ingredient leaderboard.
    fn ingredient_rating(&self, kind: RatingKind, limit: u32) -> Result<Vec<Ingredient>>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
