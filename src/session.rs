//! Headless view controller.
//!
//! [`Session`] owns what the screen shows: the selected product, the active
//! tab, the scanning flag, the history search query and the two stores.
//! The TUI renders from it; tests drive it directly.

use crate::api::{FoodBackend, HistoryQuery};
use crate::error::Result;
use crate::model::{CapturedImage, Product};
use crate::store::{HistoryStore, RatingsCache, RatingsFetch, RatingsUpdate};
use crate::workflow::{ScanGate, ScanPermit, ScanReport, ScanState, ScanWorkflow};
use serde::{Deserialize, Serialize};

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    #[default]
    Scanner,
    Details,
    Rating,
    History,
}

impl TabKind {
    pub const ALL: [Self; 4] = [Self::Scanner, Self::Details, Self::Rating, Self::History];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Scanner => "Сканер",
            Self::Details => "Детали",
            Self::Rating => "Рейтинг",
            Self::History => "История",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Scanner => 0,
            Self::Details => 1,
            Self::Rating => 2,
            Self::History => 3,
        }
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Scanner),
            1 => Some(Self::Details),
            2 => Some(Self::Rating),
            3 => Some(Self::History),
            _ => None,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Scanner => Self::Details,
            Self::Details => Self::Rating,
            Self::Rating => Self::History,
            Self::History => Self::Scanner,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Scanner => Self::History,
            Self::Details => Self::Scanner,
            Self::Rating => Self::Details,
            Self::History => Self::Rating,
        }
    }
}

/// UI state shared by all tabs.
#[derive(Debug, Default)]
pub struct Session {
    selected: Option<Product>,
    active_tab: TabKind,
    gate: ScanGate,
    scan_state: ScanState,
    search: String,
    history: HistoryStore,
    ratings: RatingsCache,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn active_tab(&self) -> TabKind {
        self.active_tab
    }

    #[must_use]
    pub fn is_scanning(&self) -> bool {
        self.gate.is_scanning()
    }

    /// Handle to the scanning flag, for workers that outlive a borrow.
    #[must_use]
    pub const fn gate(&self) -> &ScanGate {
        &self.gate
    }

    #[must_use]
    pub const fn scan_state(&self) -> ScanState {
        self.scan_state
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryStore {
        &self.history
    }

    #[must_use]
    pub const fn ratings(&self) -> &RatingsCache {
        &self.ratings
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn set_tab(&mut self, tab: TabKind) {
        self.active_tab = tab;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// History entries matching the current search query.
    #[must_use]
    pub fn filtered_history(&self) -> Vec<&Product> {
        self.history.filter(&self.search)
    }

    /// Select the `index`-th filtered history entry and show its details.
    ///
    /// Returns `false` when the index is out of range.
    pub fn select_history(&mut self, index: usize) -> bool {
        match self.history.select(&self.search, index) {
            Some(product) => {
                self.selected = Some(product.clone());
                self.active_tab = TabKind::Details;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// Take the scan permit, or `None` while another scan is running.
    #[must_use]
    pub fn begin_scan(&self) -> Option<ScanPermit> {
        let permit = self.gate.try_acquire();
        if permit.is_none() {
            tracing::debug!("scan already in progress; ignoring request");
        }
        permit
    }

    /// Record a progress state reported by a running scan.
    pub fn set_scan_state(&mut self, state: ScanState) {
        self.scan_state = state;
    }

    /// Apply a finished scan. A completed scan becomes the selected product.
    ///
    /// Returns whether the history should be refreshed.
    pub fn apply_scan_report(&mut self, report: ScanReport) -> bool {
        self.scan_state = if report.is_completed() {
            ScanState::Completed
        } else {
            ScanState::Idle
        };
        match report.product {
            Some(product) => {
                self.selected = Some(product);
                true
            }
            None => false,
        }
    }

    /// Run a whole scan on the calling thread, then refresh history.
    ///
    /// Returns `None` without doing anything if a scan is already running.
    pub fn scan(
        &mut self,
        workflow: &ScanWorkflow,
        image: Option<CapturedImage>,
        history_query: &HistoryQuery,
    ) -> Option<ScanReport> {
        let permit = self.begin_scan()?;
        let report = workflow.run(image, &mut |state| self.scan_state = state);
        let refresh = self.apply_scan_report(report.clone());
        drop(permit);

        if refresh {
            if let Err(e) = self.refresh_history(workflow.backend().as_ref(), history_query) {
                tracing::warn!(error = %e, "history refresh after scan failed");
            }
        }
        Some(report)
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    pub fn refresh_history(
        &mut self,
        backend: &dyn FoodBackend,
        query: &HistoryQuery,
    ) -> Result<usize> {
        self.history.refresh(backend, query)
    }

    pub fn replace_history(&mut self, products: Vec<Product>) {
        self.history.replace(products);
    }

    pub fn refresh_ratings(&mut self, backend: &dyn FoodBackend, limit: u32) -> RatingsUpdate {
        self.ratings.refresh(backend, limit)
    }

    pub fn apply_ratings(&mut self, fetch: RatingsFetch) -> RatingsUpdate {
        self.ratings.apply(fetch)
    }
}
