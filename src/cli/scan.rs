//! Scan command handler.
//!
//! Runs the scan workflow once, headlessly, and prints the resulting product.

use super::{exit_codes, OutputOptions};
use crate::api::FoodBackend;
use crate::config::AppConfig;
use crate::model::CapturedImage;
use crate::notify::StderrNotifier;
use crate::reports::create_reporter;
use crate::workflow::{ScanOutcome, ScanWorkflow};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments of `foodcheck scan`.
#[derive(Debug, Clone)]
pub struct ScanCommand {
    pub image: PathBuf,
    pub output: OutputOptions,
}

/// Run the scan command; returns the process exit code.
pub fn run_scan(
    backend: Arc<dyn FoodBackend>,
    config: &AppConfig,
    command: &ScanCommand,
) -> Result<i32> {
    let image = CapturedImage::from_path(&command.image)
        .with_context(|| format!("cannot read image {}", command.image.display()))?;

    let quiet = command.output.quiet;
    let notifier = Arc::new(StderrNotifier::new(quiet));
    let workflow =
        ScanWorkflow::new(backend, notifier).with_product_name(config.scan.product_name.clone());

    let report = workflow.run(Some(image), &mut |state| {
        if !quiet && state.is_busy() {
            eprintln!("{}", state.label());
        }
    });

    let reporter = create_reporter(command.output.format, command.output.use_color());
    command.output.write(&reporter.scan_report(&report)?)?;

    Ok(match report.outcome {
        ScanOutcome::Completed { .. } => exit_codes::SUCCESS,
        ScanOutcome::Failed { .. } | ScanOutcome::Skipped => exit_codes::SCAN_FAILED,
    })
}
