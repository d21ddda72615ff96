//! History command handler.

use super::{exit_codes, OutputOptions};
use crate::api::{FoodBackend, HistoryQuery};
use crate::config::AppConfig;
use crate::reports::create_reporter;
use crate::store::HistoryStore;
use anyhow::Result;

/// Arguments of `foodcheck history`.
#[derive(Debug, Clone, Default)]
pub struct HistoryCommand {
    /// Case-insensitive filter applied locally
    pub search: Option<String>,
    /// Filter passed to the products endpoint
    pub remote_search: Option<String>,
    /// Overrides `history.limit`
    pub limit: Option<u32>,
    pub output: OutputOptions,
}

/// List scanned products.
pub fn run_history(
    backend: &dyn FoodBackend,
    config: &AppConfig,
    command: &HistoryCommand,
) -> Result<i32> {
    let query = HistoryQuery::all()
        .with_limit(command.limit.or(config.history.limit))
        .with_search(command.remote_search.clone());

    let mut store = HistoryStore::new();
    store.refresh(backend, &query)?;

    let filter = command.search.as_deref().unwrap_or_default();
    let products = store.filter(filter);
    tracing::debug!(total = store.len(), shown = products.len(), "history listed");

    let reporter = create_reporter(command.output.format, command.output.use_color());
    command.output.write(&reporter.history_report(&products)?)?;
    Ok(exit_codes::SUCCESS)
}
