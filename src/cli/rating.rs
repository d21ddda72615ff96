//! Rating command handler.

use super::{exit_codes, OutputOptions};
use crate::api::{FoodBackend, RatingKind};
use crate::config::AppConfig;
use crate::reports::{create_reporter, RatingSection};
use crate::store::RatingsCache;
use anyhow::{bail, Result};

/// Arguments of `foodcheck rating`.
#[derive(Debug, Clone, Default)]
pub struct RatingCommand {
    /// Single leaderboard; both harmful and healthy when absent
    pub kind: Option<RatingKind>,
    /// Overrides `ratings.limit`
    pub limit: Option<u32>,
    pub output: OutputOptions,
}

const fn section_title(kind: RatingKind) -> &'static str {
    match kind {
        RatingKind::Harmful => "Самые вредные ингредиенты",
        RatingKind::Healthy => "Самые полезные ингредиенты",
        RatingKind::All => "Все ингредиенты",
    }
}

/// Print ingredient leaderboards.
pub fn run_rating(
    backend: &dyn FoodBackend,
    config: &AppConfig,
    command: &RatingCommand,
) -> Result<i32> {
    let limit = command.limit.unwrap_or(config.ratings.limit);
    let reporter = create_reporter(command.output.format, command.output.use_color());

    let rendered = if let Some(kind) = command.kind {
        let ingredients = backend.ingredient_rating(kind, limit)?;
        reporter.rating_report(&[RatingSection {
            title: section_title(kind),
            ingredients: &ingredients,
        }])?
    } else {
        let mut cache = RatingsCache::new();
        let update = cache.refresh(backend, limit);
        if !update.harmful && !update.healthy {
            bail!("failed to load ingredient ratings");
        }
        reporter.rating_report(&[
            RatingSection {
                title: section_title(RatingKind::Harmful),
                ingredients: cache.top_harmful(),
            },
            RatingSection {
                title: section_title(RatingKind::Healthy),
                ingredients: cache.top_healthy(),
            },
        ])?
    };

    command.output.write(&rendered)?;
    Ok(exit_codes::SUCCESS)
}
