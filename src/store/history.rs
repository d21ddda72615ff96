//! Scan history as last fetched from the persistence endpoint.

use crate::api::{FoodBackend, HistoryQuery};
use crate::error::{ErrorContext, Result};
use crate::model::Product;

/// Previously scanned products, most recent first.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    products: Vec<Product>,
    loaded: bool,
}

impl HistoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the product list and replace the local one.
    ///
    /// On error the current list is left untouched.
    pub fn refresh(&mut self, backend: &dyn FoodBackend, query: &HistoryQuery) -> Result<usize> {
        let products = backend
            .list_products(query)
            .context("refreshing history")?;
        let count = products.len();
        self.replace(products);
        tracing::debug!(count, "history refreshed");
        Ok(count)
    }

    /// Replace the list wholesale; the backend order is kept.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
        self.loaded = true;
    }

    /// Products whose name contains `query`, ignoring case.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.name_matches(query))
            .collect()
    }

    /// The `index`-th entry of the filtered list.
    #[must_use]
    pub fn select(&self, query: &str, index: usize) -> Option<&Product> {
        self.filter(query).into_iter().nth(index)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Whether a refresh has succeeded at least once.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn store() -> HistoryStore {
        let now = Utc::now();
        let mut store = HistoryStore::new();
        store.replace(vec![
            Product::local("Йогурт натуральный", 87, vec![], now),
            Product::local("Колбаса варёная", 23, vec![], now),
            Product::local("Хлеб цельнозерновой", 72, vec![], now),
        ]);
        store
    }

    #[test]
    fn test_empty_query_returns_all() {
        let store = store();
        assert_eq!(store.filter("").len(), 3);
    }

    #[test]
    fn test_whitespace_is_part_of_the_query() {
        let store = store();
        assert!(store.filter("  ").is_empty());
        assert!(store.filter(" йог").is_empty());
        assert_eq!(store.filter(" НАТУР").len(), 1);
    }

    #[test]
    fn test_filter_case_insensitive() {
        let store = store();
        let hits = store.filter("КОЛБАСА");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 23);
        assert!(store.filter("сыр").is_empty());
    }

    #[test]
    fn test_select_indexes_filtered_list() {
        let store = store();
        assert_eq!(store.select("хлеб", 0).map(|p| p.score), Some(72));
        assert!(store.select("хлеб", 1).is_none());
        assert_eq!(store.select("", 1).map(|p| p.score), Some(23));
    }

    #[test]
    fn test_replace_keeps_order() {
        let store = store();
        let names: Vec<_> = store.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[0], "Йогурт натуральный");
        assert!(store.is_loaded());
    }
}
