//! Scanned products and the payload used to persist them.

use super::ingredient::deserialize_score;
use super::{Identifier, Ingredient, ProductId};
use crate::error::{FoodCheckError, Result};
use base64ct::{Base64, Encoding};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Name given to a freshly scanned product.
pub const DEFAULT_PRODUCT_NAME: &str = "Новый продукт";

/// A scanned product with its per-ingredient breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    /// Ordered as returned by the backend
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// `None` when the backend sent a null or unparseable date
    #[serde(default, deserialize_with = "deserialize_scan_date")]
    pub scan_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Build a product that has not been persisted yet.
    pub fn local(
        name: impl Into<String>,
        score: u8,
        ingredients: Vec<Ingredient>,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ProductId::local(scanned_at),
            name: name.into(),
            score: score.min(100),
            ingredients,
            scan_date: Some(scanned_at),
            image_url: None,
        }
    }

    /// Ids of ingredients the scoring service matched, in order.
    #[must_use]
    pub fn ingredient_ids(&self) -> Vec<Identifier> {
        self.ingredients
            .iter()
            .filter_map(|ing| ing.id.clone())
            .collect()
    }

    /// Case-insensitive substring match on the product name.
    #[must_use]
    pub fn name_matches(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Scan date as `dd.mm.yyyy`, or a dash when unknown.
    #[must_use]
    pub fn scan_date_label(&self) -> String {
        self.scan_date
            .map_or_else(|| "—".to_string(), |d| d.format("%d.%m.%Y").to_string())
    }
}

/// Body of `POST {products}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub score: u8,
    pub ingredient_ids: Vec<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Persistence payload for a locally built product.
    ///
    /// Only ingredients the scoring step identified are referenced.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            score: product.score,
            ingredient_ids: product.ingredient_ids(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Image bytes picked by the user, before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CapturedImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an image from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| FoodCheckError::io(path, e))?;
        if bytes.is_empty() {
            return Err(FoodCheckError::validation(format!(
                "image file is empty: {}",
                path.display()
            )));
        }
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self { file_name, bytes })
    }

    /// Standard base64 transport encoding of the image bytes.
    #[must_use]
    pub fn to_base64(&self) -> String {
        Base64::encode_string(&self.bytes)
    }
}

fn deserialize_scan_date<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_scan_date))
}

/// Parse the date formats the persistence endpoint emits.
///
/// Accepts RFC 3339, naive ISO timestamps (taken as UTC) and bare dates.
#[must_use]
pub fn parse_scan_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
    }
    tracing::debug!(raw, "unparseable scan date");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_history_entry() {
        let json = r#"{
            "id": 3,
            "name": "Йогурт натуральный",
            "score": 87,
            "scanDate": "2024-01-15T10:30:00.123456",
            "imageUrl": null,
            "ingredients": [
                {"id": 1, "name": "Молоко", "e_number": null, "score": 80,
                 "category": "healthy", "description": "Источник белка"}
            ]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.id.is_persisted());
        assert_eq!(product.score, 87);
        assert_eq!(product.ingredients.len(), 1);
        assert_eq!(product.scan_date_label(), "15.01.2024");
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_null_scan_date_is_unknown() {
        let json = r#"{"id": 1, "name": "x", "score": 10, "scanDate": null}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.scan_date.is_none());
        assert_eq!(product.scan_date_label(), "—");
    }

    #[test]
    fn test_parse_scan_date_variants() {
        assert!(parse_scan_date("2024-01-15T10:30:00+03:00").is_some());
        assert!(parse_scan_date("2024-01-15T10:30:00").is_some());
        assert!(parse_scan_date("2024-01-15").is_some());
        assert!(parse_scan_date("yesterday").is_none());
    }

    #[test]
    fn test_new_product_skips_unidentified_ingredients() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let product = Product::local(
            DEFAULT_PRODUCT_NAME,
            64,
            vec![
                Ingredient::new("Сахар", 45, Category::Neutral).with_id(4),
                Ingredient::new("Неизвестное", 50, Category::Neutral),
                Ingredient::new("Витамин B12", 95, Category::Healthy).with_id(9),
            ],
            now,
        );

        let payload = NewProduct::from_product(&product);
        assert_eq!(payload.ingredient_ids, vec![Identifier::Number(4), Identifier::Number(9)]);
        assert_eq!(product.ingredients.len(), 3);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["name"], "Новый продукт");
        assert_eq!(json["ingredient_ids"], serde_json::json!([4, 9]));
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let now = Utc::now();
        let product = Product::local("Колбаса Варёная", 42, vec![], now);
        assert!(product.name_matches(""));
        assert!(product.name_matches("колбаса"));
        assert!(product.name_matches("ВАРЁН"));
        assert!(!product.name_matches("сыр"));
    }

    #[test]
    fn test_captured_image_base64() {
        let image = CapturedImage::new("label.jpg", b"hello".to_vec());
        assert_eq!(image.to_base64(), "aGVsbG8=");
    }

    #[test]
    fn test_captured_image_from_missing_path() {
        let err = CapturedImage::from_path(Path::new("/nonexistent/label.jpg")).unwrap_err();
        assert!(matches!(err, FoodCheckError::Io { .. }));
    }
}
