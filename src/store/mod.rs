//! Client-side caches of backend data.

mod history;
mod ratings;

pub use history::HistoryStore;
pub use ratings::{RatingsCache, RatingsFetch, RatingsUpdate, DEFAULT_RATING_LIMIT};
