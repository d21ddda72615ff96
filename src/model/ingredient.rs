//! Ingredient records as returned by the scoring and ratings endpoints.

use super::Identifier;
use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned health category of an ingredient.
///
/// Presentational metadata only: the client never derives it from the score.
/// Unknown or missing values fall back to `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Healthy,
    Harmful,
    #[default]
    #[serde(other)]
    Neutral,
}

impl Category {
    /// Badge caption shown next to the ingredient.
    #[must_use]
    pub const fn badge_label(self) -> &'static str {
        match self {
            Self::Healthy => "Полезно",
            Self::Neutral => "Нейтрально",
            Self::Harmful => "Вредно",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Neutral => "neutral",
            Self::Harmful => "harmful",
        }
    }
}

/// A single scored ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Database id; absent when the scoring service had no match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Identifier>,
    pub name: String,
    /// E-number code such as "E621"
    #[serde(default)]
    pub e_number: Option<String>,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_neutral")]
    pub category: Category,
}

impl Ingredient {
    /// Create an ingredient without a database id.
    pub fn new(name: impl Into<String>, score: u8, category: Category) -> Self {
        Self {
            id: None,
            name: name.into(),
            e_number: None,
            score: score.min(100),
            description: String::new(),
            category,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<Identifier>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Display name including the E-number when the name lacks it.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.e_number.as_deref() {
            Some(code) if !code.is_empty() && !self.name.contains(code) => {
                format!("{} ({code})", self.name)
            }
            _ => self.name.clone(),
        }
    }
}

/// Deserialize a score as a number and clamp it into `[0, 100]`.
pub(crate) fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_score(raw))
}

/// Clamp an arbitrary number into the score range.
#[must_use]
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        tracing::warn!("score is NaN, treating as 0");
        return 0;
    }
    let rounded = raw.round();
    if !(0.0..=100.0).contains(&rounded) {
        tracing::warn!(score = raw, "score out of range, clamping");
    }
    rounded.clamp(0.0, 100.0) as u8
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_neutral<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Category>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scoring_entry() {
        let json = r#"{
            "id": 12,
            "name": "Глутамат натрия",
            "e_number": "E621",
            "score": 25,
            "category": "harmful",
            "description": "Усилитель вкуса"
        }"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ing.id, Some(Identifier::Number(12)));
        assert_eq!(ing.score, 25);
        assert_eq!(ing.category, Category::Harmful);
        assert_eq!(ing.display_name(), "Глутамат натрия (E621)");
    }

    #[test]
    fn test_unmatched_entry_has_no_id() {
        let json = r#"{"id": null, "name": "Соль", "e_number": null, "score": 50,
                       "category": "neutral", "description": "Информация об ингредиенте отсутствует в базе"}"#;
        let ing: Ingredient = serde_json::from_str(json).unwrap();
        assert!(ing.id.is_none());
        assert_eq!(ing.display_name(), "Соль");
    }

    #[test]
    fn test_unknown_or_null_category_is_neutral() {
        let unknown: Ingredient =
            serde_json::from_str(r#"{"name": "x", "score": 10, "category": "weird"}"#).unwrap();
        let null: Ingredient =
            serde_json::from_str(r#"{"name": "x", "score": 10, "category": null}"#).unwrap();
        let missing: Ingredient = serde_json::from_str(r#"{"name": "x", "score": 10}"#).unwrap();
        assert_eq!(unknown.category, Category::Neutral);
        assert_eq!(null.category, Category::Neutral);
        assert_eq!(missing.category, Category::Neutral);
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Harmful).unwrap(), r#""harmful""#);
        let healthy: Category = serde_json::from_str(r#""healthy""#).unwrap();
        assert_eq!(healthy, Category::Healthy);
    }

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(clamp_score(-5.0), 0);
        assert_eq!(clamp_score(140.0), 100);
        assert_eq!(clamp_score(69.6), 70);
        assert_eq!(clamp_score(f64::NAN), 0);
    }

    #[test]
    fn test_badge_labels() {
        assert_eq!(Category::Healthy.badge_label(), "Полезно");
        assert_eq!(Category::Neutral.badge_label(), "Нейтрально");
        assert_eq!(Category::Harmful.badge_label(), "Вредно");
    }
}
