//! TUI command handler.

use super::exit_codes;
use crate::api::FoodBackend;
use crate::config::AppConfig;
use crate::tui::{run_tui, TuiOptions};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Run the interactive UI, optionally with an image path prefilled.
pub fn run_interactive(
    backend: Arc<dyn FoodBackend>,
    config: &AppConfig,
    image: Option<PathBuf>,
) -> Result<i32> {
    let options = TuiOptions::from_config(config).with_image(image);
    run_tui(backend, &options).context("terminal UI failed")?;
    Ok(exit_codes::SUCCESS)
}
