//! Shared fixtures: a scripted backend and a recording notifier.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use foodcheck::{
    api::ScoredIngredients, CapturedImage, Category, FoodBackend, FoodCheckError, HistoryQuery,
    Identifier, Ingredient, NewProduct, Notification, Notifier, Product, RatingKind, Result,
};
use std::sync::Mutex;

/// Backend whose every endpoint answers from a script. `None` means the
/// endpoint fails with a 500.
#[derive(Default)]
pub struct ScriptedBackend {
    pub names: Option<Vec<String>>,
    pub scored: Option<(u8, Vec<Ingredient>)>,
    pub saved_id: Option<Identifier>,
    pub products: Option<Vec<Product>>,
    pub harmful: Option<Vec<Ingredient>>,
    pub healthy: Option<Vec<Ingredient>>,
    calls: Mutex<Vec<&'static str>>,
    saved: Mutex<Vec<NewProduct>>,
}

fn server_error(context: &str) -> FoodCheckError {
    FoodCheckError::status(context, 500, "Internal Server Error")
}

impl ScriptedBackend {
    /// A backend where every step succeeds.
    pub fn happy() -> Self {
        Self {
            names: Some(vec!["Сахар".into(), "Витамин B12".into(), "Е250".into()]),
            scored: Some((
                75,
                vec![
                    Ingredient::new("Сахар", 45, Category::Neutral).with_id(4),
                    Ingredient::new("Витамин B12", 95, Category::Healthy).with_id(9),
                    Ingredient::new("Е250", 15, Category::Harmful),
                ],
            )),
            saved_id: Some(Identifier::from(101)),
            products: Some(sample_history()),
            harmful: Some(vec![Ingredient::new("Е250 (Нитрит натрия)", 15, Category::Harmful)]),
            healthy: Some(vec![Ingredient::new("Витамин B12", 95, Category::Healthy)]),
            ..Self::default()
        }
    }

    pub fn with_names(mut self, names: Option<Vec<String>>) -> Self {
        self.names = names;
        self
    }

    pub fn with_scored(mut self, scored: Option<(u8, Vec<Ingredient>)>) -> Self {
        self.scored = scored;
        self
    }

    pub fn with_saved_id(mut self, id: Option<Identifier>) -> Self {
        self.saved_id = id;
        self
    }

    pub fn with_products(mut self, products: Option<Vec<Product>>) -> Self {
        self.products = products;
        self
    }

    pub fn with_ratings(
        mut self,
        harmful: Option<Vec<Ingredient>>,
        healthy: Option<Vec<Ingredient>>,
    ) -> Self {
        self.harmful = harmful;
        self.healthy = healthy;
        self
    }

    /// Endpoints called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies sent to the save endpoint.
    pub fn saved(&self) -> Vec<NewProduct> {
        self.saved.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl FoodBackend for ScriptedBackend {
    fn recognize(&self, _image: &CapturedImage) -> Result<Vec<String>> {
        self.record("recognize");
        self.names.clone().ok_or_else(|| server_error("recognizing ingredients"))
    }

    fn score(&self, _names: &[String]) -> Result<ScoredIngredients> {
        self.record("score");
        self.scored
            .clone()
            .map(|(total_score, ingredients)| ScoredIngredients {
                total_score,
                ingredients,
            })
            .ok_or_else(|| server_error("scoring ingredients"))
    }

    fn save_product(&self, product: &NewProduct) -> Result<Identifier> {
        self.record("save_product");
        self.saved.lock().unwrap().push(product.clone());
        self.saved_id.clone().ok_or_else(|| server_error("saving product"))
    }

    fn list_products(&self, _query: &HistoryQuery) -> Result<Vec<Product>> {
        self.record("list_products");
        self.products.clone().ok_or_else(|| server_error("listing products"))
    }

    fn ingredient_rating(&self, kind: RatingKind, limit: u32) -> Result<Vec<Ingredient>> {
        self.record("ingredient_rating");
        let list = match kind {
            RatingKind::Harmful => self.harmful.clone(),
            RatingKind::Healthy => self.healthy.clone(),
            RatingKind::All => self
                .harmful
                .clone()
                .zip(self.healthy.clone())
                .map(|(mut a, b)| {
                    a.extend(b);
                    a
                }),
        };
        list.map(|l| l.into_iter().take(limit as usize).collect())
            .ok_or_else(|| server_error("loading rating"))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Notifier that keeps every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

pub fn sample_history() -> Vec<Product> {
    vec![
        Product::local(
            "Йогурт натуральный",
            87,
            vec![Ingredient::new("Молоко", 80, Category::Healthy).with_id(1)],
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        ),
        Product::local(
            "Колбаса варёная",
            23,
            vec![Ingredient::new("Е250 (Нитрит натрия)", 15, Category::Harmful).with_id(7)],
            Utc.with_ymd_and_hms(2024, 1, 14, 15, 45, 0).unwrap(),
        ),
    ]
}

pub fn label_image() -> CapturedImage {
    CapturedImage::new("label.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}
