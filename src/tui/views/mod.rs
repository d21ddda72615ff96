//! Per-tab render functions.

mod details;
mod history;
mod rating;
mod scanner;

pub use details::render_details;
pub use history::render_history;
pub use rating::render_rating;
pub use scanner::render_scanner;
