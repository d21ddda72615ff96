//! Blocking HTTP implementation of [`FoodBackend`].

use super::response::{
    CreatedProduct, ErrorBody, OcrRequest, OcrResponse, ProductsResponse, RatingResponse,
    ScoreRequest, ScoreResponse,
};
use super::traits::{FoodBackend, HistoryQuery, RatingKind, ScoredIngredients};
use crate::error::{ApiErrorKind, ErrorContext, FoodCheckError, Result};
use crate::model::{CapturedImage, Identifier, Ingredient, NewProduct, Product};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default root under which the four backend functions are deployed.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Path segment of each backend function below the API base.
pub mod functions {
    pub const OCR_ANALYZE: &str = "ocr-analyze";
    pub const ANALYZE_INGREDIENTS: &str = "analyze-ingredients";
    pub const PRODUCTS: &str = "products";
    pub const INGREDIENTS_RATING: &str = "ingredients-rating";
}

/// Endpoint URLs and transport settings.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    pub ocr_analyze: String,
    pub analyze_ingredients: String,
    pub products: String,
    pub ingredients_rating: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl HttpBackendConfig {
    /// Derive all four endpoint URLs from one base URL.
    #[must_use]
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            ocr_analyze: format!("{base}/{}", functions::OCR_ANALYZE),
            analyze_ingredients: format!("{base}/{}", functions::ANALYZE_INGREDIENTS),
            products: format!("{base}/{}", functions::PRODUCTS),
            ingredients_rating: format!("{base}/{}", functions::INGREDIENTS_RATING),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE)
    }
}

/// HTTP client for the analysis backend.
pub struct HttpBackend {
    client: Client,
    config: HttpBackendConfig,
}

/// Helper to convert reqwest errors to backend errors
fn network_error(context: &str, err: reqwest::Error) -> FoodCheckError {
    FoodCheckError::api(context, ApiErrorKind::NetworkError(err.to_string()))
}

impl HttpBackend {
    /// Create a new client.
    pub fn new(config: HttpBackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| FoodCheckError::config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Endpoint configuration in use.
    #[must_use]
    pub const fn config(&self) -> &HttpBackendConfig {
        &self.config
    }

    /// Send a request and decode a JSON body, mapping non-2xx statuses to errors.
    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, context: &str) -> Result<T> {
        let response = request.send().map_err(|e| network_error(context, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            tracing::debug!(status = status.as_u16(), %message, "{context} failed");
            return Err(FoodCheckError::status(context, status.as_u16(), message));
        }

        let body = response.text().map_err(|e| network_error(context, e))?;
        serde_json::from_str::<T>(&body).context(context)
    }
}

impl FoodBackend for HttpBackend {
    fn recognize(&self, image: &CapturedImage) -> Result<Vec<String>> {
        tracing::debug!(
            file = %image.file_name,
            bytes = image.bytes.len(),
            url = %self.config.ocr_analyze,
            "submitting image for recognition"
        );
        let body = OcrRequest {
            image: image.to_base64(),
        };
        let response: OcrResponse = self.send_json(
            self.client.post(&self.config.ocr_analyze).json(&body),
            "recognizing ingredients",
        )?;
        Ok(response.names())
    }

    fn score(&self, names: &[String]) -> Result<ScoredIngredients> {
        tracing::debug!(count = names.len(), "scoring ingredients");
        let response: ScoreResponse = self.send_json(
            self.client
                .post(&self.config.analyze_ingredients)
                .json(&ScoreRequest { ingredients: names }),
            "scoring ingredients",
        )?;
        if let Some(count) = response.count {
            if count != response.ingredients.len() {
                tracing::debug!(
                    count,
                    received = response.ingredients.len(),
                    "scoring count mismatch"
                );
            }
        }
        Ok(ScoredIngredients {
            total_score: response.total_score,
            ingredients: response.ingredients,
        })
    }

    fn save_product(&self, product: &NewProduct) -> Result<Identifier> {
        tracing::debug!(
            name = %product.name,
            ingredient_ids = product.ingredient_ids.len(),
            "persisting product"
        );
        let created: CreatedProduct = self.send_json(
            self.client.post(&self.config.products).json(product),
            "saving product",
        )?;
        Ok(created.id)
    }

    fn list_products(&self, query: &HistoryQuery) -> Result<Vec<Product>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(ref search) = query.search {
            params.push(("search", search.clone()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        let response: ProductsResponse = self.send_json(
            self.client.get(&self.config.products).query(&params),
            "loading history",
        )?;
        tracing::debug!(count = response.products.len(), reported = ?response.count, "history loaded");
        Ok(response.products)
    }

    fn ingredient_rating(&self, kind: RatingKind, limit: u32) -> Result<Vec<Ingredient>> {
        let limit = limit.to_string();
        let response: RatingResponse = self.send_json(
            self.client
                .get(&self.config.ingredients_rating)
                .query(&[("type", kind.as_query()), ("limit", limit.as_str())]),
            "loading ingredient rating",
        )?;
        tracing::debug!(
            kind = kind.as_query(),
            echoed = ?response.kind,
            count = response.ingredients.len(),
            "rating loaded"
        );
        Ok(response.ingredients)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_base() {
        let config = HttpBackendConfig::from_base("https://api.example.test/");
        assert_eq!(config.ocr_analyze, "https://api.example.test/ocr-analyze");
        assert_eq!(
            config.analyze_ingredients,
            "https://api.example.test/analyze-ingredients"
        );
        assert_eq!(config.products, "https://api.example.test/products");
        assert_eq!(
            config.ingredients_rating,
            "https://api.example.test/ingredients-rating"
        );
    }

    #[test]
    fn test_default_config() {
        let config = HttpBackendConfig::default();
        assert!(config.products.starts_with(DEFAULT_API_BASE));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_unreachable_backend_is_network_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let mut config = HttpBackendConfig::from_base("http://127.0.0.1:9");
        config.timeout = Duration::from_secs(2);
        let backend = HttpBackend::new(config).unwrap();
        let err = backend.list_products(&HistoryQuery::all()).unwrap_err();
        match err {
            FoodCheckError::Api { source, .. } => assert!(source.is_transport()),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }
}
