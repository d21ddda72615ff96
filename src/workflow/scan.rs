//! The scan state machine: image → OCR → scoring → persistence.

use crate::api::FoodBackend;
use crate::model::{CapturedImage, NewProduct, Product, ProductId, DEFAULT_PRODUCT_NAME};
use crate::notify::{Notification, Notifier};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Why a scan was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanFailure {
    /// OCR request failed
    Recognition,
    /// OCR returned no ingredient names
    NoIngredients,
    /// Scoring request failed
    Scoring,
}

impl ScanFailure {
    /// Toast shown for this failure.
    #[must_use]
    pub fn notification(self) -> Notification {
        match self {
            Self::Recognition => Notification::recognition_failed(),
            Self::NoIngredients => Notification::no_ingredients(),
            Self::Scoring => Notification::scoring_failed(),
        }
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recognition => write!(f, "recognition error"),
            Self::NoIngredients => write!(f, "no ingredients found"),
            Self::Scoring => write!(f, "scoring error"),
        }
    }
}

/// States of one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanState {
    #[default]
    Idle,
    Capturing,
    Recognizing,
    Scoring,
    Persisting,
    Completed,
    Failed(ScanFailure),
}

impl ScanState {
    /// Short progress label for the UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Готово к сканированию",
            Self::Capturing => "Загрузка изображения…",
            Self::Recognizing => "Распознавание состава…",
            Self::Scoring => "Анализ ингредиентов…",
            Self::Persisting => "Сохранение…",
            Self::Completed => "Анализ завершён",
            Self::Failed(_) => "Ошибка",
        }
    }

    /// Whether a request is in flight in this state.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(
            self,
            Self::Capturing | Self::Recognizing | Self::Scoring | Self::Persisting
        )
    }
}

/// How a scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "status")]
pub enum ScanOutcome {
    /// No image was supplied; nothing happened
    Skipped,
    /// A product was produced; `persisted` is false when saving failed
    Completed { persisted: bool },
    Failed { reason: ScanFailure },
}

/// Everything a finished scan produced.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Every state entered, in order
    pub transitions: Vec<ScanState>,
    pub outcome: ScanOutcome,
    /// Present only when the outcome is `Completed`
    pub product: Option<Product>,
}

impl ScanReport {
    fn skipped() -> Self {
        Self {
            transitions: Vec::new(),
            outcome: ScanOutcome::Skipped,
            product: None,
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Completed { .. })
    }

    /// Last state entered, `Idle` for a skipped scan.
    #[must_use]
    pub fn final_state(&self) -> ScanState {
        self.transitions.last().copied().unwrap_or(ScanState::Idle)
    }
}

/// Runs scans against a backend, reporting outcomes to a notifier.
#[derive(Clone)]
pub struct ScanWorkflow {
    backend: Arc<dyn FoodBackend>,
    notifier: Arc<dyn Notifier>,
    product_name: String,
}

impl ScanWorkflow {
    pub fn new(backend: Arc<dyn FoodBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
        }
    }

    /// Name given to scanned products.
    #[must_use]
    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    #[must_use]
    pub fn backend(&self) -> &Arc<dyn FoodBackend> {
        &self.backend
    }

    /// Run one scan to completion, timestamped now.
    pub fn run(
        &self,
        image: Option<CapturedImage>,
        progress: &mut dyn FnMut(ScanState),
    ) -> ScanReport {
        self.run_at(image, Utc::now(), progress)
    }

    /// Run one scan; `now` becomes the scan date and local id.
    pub fn run_at(
        &self,
        image: Option<CapturedImage>,
        now: DateTime<Utc>,
        progress: &mut dyn FnMut(ScanState),
    ) -> ScanReport {
        let Some(image) = image else {
            tracing::debug!("scan requested without an image");
            return ScanReport::skipped();
        };

        let mut run = Run {
            transitions: Vec::new(),
            progress,
        };

        run.enter(ScanState::Capturing);
        tracing::info!(file = %image.file_name, bytes = image.bytes.len(), backend = self.backend.name(), "scan started");

        run.enter(ScanState::Recognizing);
        let names = match self.backend.recognize(&image) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, status = ?e.http_status(), "recognition failed");
                return self.fail(run, ScanFailure::Recognition);
            }
        };
        if names.is_empty() {
            return self.fail(run, ScanFailure::NoIngredients);
        }
        let recognized = names.len();

        run.enter(ScanState::Scoring);
        let scored = match self.backend.score(&names) {
            Ok(scored) => scored,
            Err(e) => {
                tracing::warn!(error = %e, status = ?e.http_status(), "scoring failed");
                return self.fail(run, ScanFailure::Scoring);
            }
        };

        let mut product = Product::local(
            self.product_name.clone(),
            scored.total_score,
            scored.ingredients,
            now,
        );

        run.enter(ScanState::Persisting);
        let persisted = match self.backend.save_product(&NewProduct::from_product(&product)) {
            Ok(id) if !id.is_empty() => {
                product.id = ProductId::Persisted(id);
                true
            }
            Ok(_) => {
                tracing::warn!(local_id = %product.id, "backend returned an empty product id; keeping local id");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, status = ?e.http_status(), local_id = %product.id, "failed to save product; keeping local id");
                false
            }
        };

        run.enter(ScanState::Completed);
        tracing::info!(
            id = %product.id,
            score = product.score,
            ingredients = product.ingredients.len(),
            persisted,
            "scan completed"
        );
        self.notifier
            .notify(Notification::analysis_complete(recognized));

        ScanReport {
            transitions: run.transitions,
            outcome: ScanOutcome::Completed { persisted },
            product: Some(product),
        }
    }

    fn fail(&self, mut run: Run<'_>, reason: ScanFailure) -> ScanReport {
        run.enter(ScanState::Failed(reason));
        self.notifier.notify(reason.notification());
        run.enter(ScanState::Idle);
        ScanReport {
            transitions: run.transitions,
            outcome: ScanOutcome::Failed { reason },
            product: None,
        }
    }
}

struct Run<'a> {
    transitions: Vec<ScanState>,
    progress: &'a mut dyn FnMut(ScanState),
}

impl Run<'_> {
    fn enter(&mut self, state: ScanState) {
        tracing::debug!(?state, "scan state");
        self.transitions.push(state);
        (self.progress)(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_states() {
        assert!(!ScanState::Idle.is_busy());
        assert!(ScanState::Recognizing.is_busy());
        assert!(ScanState::Persisting.is_busy());
        assert!(!ScanState::Completed.is_busy());
        assert!(!ScanState::Failed(ScanFailure::Scoring).is_busy());
    }

    #[test]
    fn test_failure_notifications() {
        assert_eq!(
            ScanFailure::NoIngredients.notification(),
            Notification::no_ingredients()
        );
        assert_eq!(
            ScanFailure::Recognition.notification().description,
            "Не удалось распознать состав"
        );
    }

    #[test]
    fn test_skipped_report() {
        let report = ScanReport::skipped();
        assert_eq!(report.final_state(), ScanState::Idle);
        assert!(!report.is_completed());
    }
}
