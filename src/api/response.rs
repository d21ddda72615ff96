//! Wire types for the four backend endpoints.

use crate::model::{deserialize_score, Identifier, Ingredient, Product};
use serde::{Deserialize, Serialize};

/// `POST {ocr_analyze}` body.
#[derive(Debug, Clone, Serialize)]
pub struct OcrRequest {
    /// Base64-encoded image bytes
    pub image: String,
}

/// `POST {ocr_analyze}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub ingredients: Vec<OcrIngredient>,
}

/// A name extracted from the label.
#[derive(Debug, Clone, Deserialize)]
pub struct OcrIngredient {
    #[serde(default)]
    pub name: String,
}

impl OcrResponse {
    /// Non-blank ingredient names, trimmed, in label order.
    #[must_use]
    pub fn names(self) -> Vec<String> {
        self.ingredients
            .into_iter()
            .map(|i| i.name.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// `POST {analyze_ingredients}` body.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRequest<'a> {
    pub ingredients: &'a [String],
}

/// `POST {analyze_ingredients}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreResponse {
    #[serde(deserialize_with = "deserialize_score")]
    pub total_score: u8,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// `GET {products}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// `POST {products}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    pub id: Identifier,
}

/// `GET {ingredients_rating}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingResponse {
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Error body every endpoint returns on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
