//! Top-N harmful and healthy ingredient leaderboards.

use crate::api::{FoodBackend, RatingKind};
use crate::error::Result;
use crate::model::Ingredient;

/// Number of entries shown per leaderboard.
pub const DEFAULT_RATING_LIMIT: u32 = 5;

/// Results of the two leaderboard requests, not yet applied.
#[derive(Debug)]
pub struct RatingsFetch {
    pub harmful: Result<Vec<Ingredient>>,
    pub healthy: Result<Vec<Ingredient>>,
}

impl RatingsFetch {
    /// Issue both requests in parallel and wait for both.
    pub fn run(backend: &dyn FoodBackend, limit: u32) -> Self {
        let (harmful, healthy) = rayon::join(
            || backend.ingredient_rating(RatingKind::Harmful, limit),
            || backend.ingredient_rating(RatingKind::Healthy, limit),
        );
        Self { harmful, healthy }
    }
}

/// Which slots an [`RatingsCache::apply`] call changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingsUpdate {
    pub harmful: bool,
    pub healthy: bool,
}

/// Cached leaderboards. Each slot is updated independently.
#[derive(Debug, Clone, Default)]
pub struct RatingsCache {
    top_harmful: Vec<Ingredient>,
    top_healthy: Vec<Ingredient>,
}

impl RatingsCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch both leaderboards and apply whatever succeeded.
    pub fn refresh(&mut self, backend: &dyn FoodBackend, limit: u32) -> RatingsUpdate {
        let fetch = RatingsFetch::run(backend, limit);
        self.apply(fetch)
    }

    /// Apply fetched results; a failed fetch keeps the previous slot value.
    pub fn apply(&mut self, fetch: RatingsFetch) -> RatingsUpdate {
        let mut update = RatingsUpdate::default();
        match fetch.harmful {
            Ok(list) => {
                self.top_harmful = list;
                update.harmful = true;
            }
            Err(e) => tracing::warn!(error = %e, "failed to load harmful ingredient rating"),
        }
        match fetch.healthy {
            Ok(list) => {
                self.top_healthy = list;
                update.healthy = true;
            }
            Err(e) => tracing::warn!(error = %e, "failed to load healthy ingredient rating"),
        }
        update
    }

    #[must_use]
    pub fn top_harmful(&self) -> &[Ingredient] {
        &self.top_harmful
    }

    #[must_use]
    pub fn top_healthy(&self) -> &[Ingredient] {
        &self.top_healthy
    }
}
