//! Application state for the TUI.

use super::events::{AppEvent, Event};
use super::state::{ListNavigation, ListState};
use super::theme::toggle_theme;
use super::viewmodel::{StatusMessage, TextInput};
use crate::api::{FoodBackend, HistoryQuery};
use crate::config::AppConfig;
use crate::model::CapturedImage;
use crate::notify::ChannelNotifier;
use crate::session::{Session, TabKind};
use crate::store::RatingsFetch;
use crate::workflow::{ScanState, ScanWorkflow};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Settings for one TUI run.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub theme: String,
    pub tick_rate: Duration,
    /// How long toasts stay in the footer
    pub toast: Duration,
    pub ratings_limit: u32,
    pub history_query: HistoryQuery,
    pub product_name: String,
    /// Prefilled image path on the scanner tab
    pub image: Option<PathBuf>,
}

impl TuiOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            theme: config.tui.theme.clone(),
            tick_rate: Duration::from_millis(config.tui.tick_rate_ms),
            toast: Duration::from_secs(config.tui.toast_secs),
            ratings_limit: config.ratings.limit,
            history_query: HistoryQuery::all().with_limit(config.history.limit),
            product_name: config.scan.product_name.clone(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<PathBuf>) -> Self {
        self.image = image;
        self
    }
}

/// Main application state
pub struct App {
    pub(crate) session: Session,
    backend: Arc<dyn FoodBackend>,
    workflow: ScanWorkflow,
    ratings_limit: u32,
    history_query: HistoryQuery,
    tx: Sender<Event>,
    /// Footer toast
    pub(crate) status: StatusMessage,
    pub(crate) image_input: TextInput,
    pub(crate) search_input: TextInput,
    pub(crate) history_list: ListState,
    pub(crate) details_scroll: u16,
    pub(crate) history_loading: bool,
    /// Number of the latest history request; older responses are dropped
    history_generation: u64,
    pub(crate) ratings_loading: bool,
    pub(crate) show_help: bool,
    pub(crate) should_quit: bool,
    /// Animation frame counter
    pub(crate) tick: u64,
}

impl App {
    /// Create the app; worker results are delivered through `tx`.
    pub fn new(backend: Arc<dyn FoodBackend>, options: &TuiOptions, tx: Sender<Event>) -> Self {
        let notifier = Arc::new(ChannelNotifier::new(tx.clone()));
        let workflow = ScanWorkflow::new(Arc::clone(&backend), notifier)
            .with_product_name(options.product_name.clone());
        let image_input = options
            .image
            .as_ref()
            .map_or_else(TextInput::new, |p| TextInput::with_value(p.display().to_string()));

        Self {
            session: Session::new(),
            backend,
            workflow,
            ratings_limit: options.ratings_limit,
            history_query: options.history_query.clone(),
            tx,
            status: StatusMessage::with_auto_clear(options.toast),
            image_input,
            search_input: TextInput::new(),
            history_list: ListState::new(),
            details_scroll: 0,
            history_loading: false,
            history_generation: 0,
            ratings_loading: false,
            show_help: false,
            should_quit: false,
            tick: 0,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_tab(&mut self, tab: TabKind) {
        self.session.set_tab(tab);
    }

    pub fn toggle_theme(&mut self) {
        let name = toggle_theme();
        self.status.set(format!("Тема: {name}"));
    }

    /// Load history and ratings in the background.
    pub fn load_initial(&mut self) {
        self.refresh_history();
        self.refresh_ratings();
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// Start a scan of the image at the entered path on a worker thread.
    ///
    /// Ignored while another scan is running.
    pub fn start_scan(&mut self) {
        let path = self.image_input.trimmed().to_string();
        if path.is_empty() {
            self.status.set("Укажите путь к фото состава: [e]");
            return;
        }
        let Some(permit) = self.session.begin_scan() else {
            return;
        };
        let image = match CapturedImage::from_path(Path::new(&path)) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "could not read image");
                self.status.set_error(format!("Не удалось открыть файл: {path}"));
                return;
            }
        };

        self.session.set_scan_state(ScanState::Capturing);
        let workflow = self.workflow.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let progress_tx = tx.clone();
            let report = workflow.run(Some(image), &mut |state| {
                send(&progress_tx, AppEvent::ScanProgress(state));
            });
            send(&tx, AppEvent::ScanFinished { report, permit });
        });
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    /// Fetch history on a worker. Only the newest request's response is applied.
    pub fn refresh_history(&mut self) {
        self.history_loading = true;
        self.history_generation += 1;
        let generation = self.history_generation;
        let backend = Arc::clone(&self.backend);
        let query = self.history_query.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = backend.list_products(&query);
            send(&tx, AppEvent::HistoryLoaded { generation, result });
        });
    }

    pub fn refresh_ratings(&mut self) {
        if self.ratings_loading {
            return;
        }
        self.ratings_loading = true;
        let backend = Arc::clone(&self.backend);
        let limit = self.ratings_limit;
        let tx = self.tx.clone();
        thread::spawn(move || {
            send(&tx, AppEvent::RatingsLoaded(RatingsFetch::run(backend.as_ref(), limit)));
        });
    }

    /// Push the search input into the session and re-clamp the selection.
    pub fn apply_search(&mut self) {
        self.session.set_search(self.search_input.value.clone());
        self.history_list.go_first();
        self.sync_history_list();
    }

    /// Show the highlighted history entry on the Details tab.
    pub fn open_selected_history(&mut self) {
        if self.session.select_history(self.history_list.selected()) {
            self.details_scroll = 0;
        }
    }

    fn sync_history_list(&mut self) {
        let total = self.session.filtered_history().len();
        self.history_list.sync_total(total);
    }

    // ------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------

    /// Apply a result from a worker thread.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ScanProgress(state) => self.session.set_scan_state(state),
            AppEvent::ScanFinished { report, permit } => {
                let refresh = self.session.apply_scan_report(report);
                drop(permit);
                if refresh {
                    self.details_scroll = 0;
                    self.refresh_history();
                }
            }
            AppEvent::Notify(notification) => self.status.notify(&notification),
            AppEvent::HistoryLoaded { generation, result } => {
                if generation != self.history_generation {
                    tracing::debug!(generation, latest = self.history_generation, "dropping stale history response");
                    return;
                }
                self.history_loading = false;
                match result {
                    Ok(products) => {
                        tracing::debug!(count = products.len(), "history loaded");
                        self.session.replace_history(products);
                        self.sync_history_list();
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "history refresh failed");
                        self.status.set_error("Не удалось загрузить историю");
                    }
                }
            }
            AppEvent::RatingsLoaded(fetch) => {
                self.ratings_loading = false;
                self.session.apply_ratings(fetch);
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        self.status.expire();
    }
}

fn send(tx: &Sender<Event>, event: AppEvent) {
    if tx.send(event.into()).is_err() {
        tracing::debug!("event receiver dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RatingKind, ScoredIngredients};
    use crate::error::{FoodCheckError, Result};
    use crate::model::{Category, Identifier, Ingredient, NewProduct, Product};
    use chrono::Utc;
    use std::sync::mpsc;

    struct StaticBackend;

    impl FoodBackend for StaticBackend {
        fn recognize(&self, _image: &CapturedImage) -> Result<Vec<String>> {
            Ok(vec!["Сахар".into()])
        }

        fn score(&self, _names: &[String]) -> Result<ScoredIngredients> {
            Ok(ScoredIngredients {
                total_score: 45,
                ingredients: vec![Ingredient::new("Сахар", 45, Category::Neutral).with_id(1)],
            })
        }

        fn save_product(&self, _product: &NewProduct) -> Result<Identifier> {
            Ok(Identifier::from(10))
        }

        fn list_products(&self, _query: &HistoryQuery) -> Result<Vec<Product>> {
            Ok(vec![
                Product::local("Йогурт натуральный", 87, vec![], Utc::now()),
                Product::local("Колбаса варёная", 23, vec![], Utc::now()),
            ])
        }

        fn ingredient_rating(&self, kind: RatingKind, _limit: u32) -> Result<Vec<Ingredient>> {
            match kind {
                RatingKind::Harmful => Err(FoodCheckError::status("rating", 503, "down")),
                _ => Ok(vec![Ingredient::new("Витамин B12", 95, Category::Healthy)]),
            }
        }

        fn name(&self) -> &'static str {
            "static"
        }
    }

    fn options() -> TuiOptions {
        TuiOptions::from_config(&AppConfig::default())
    }

    fn drain_until(
        app: &mut App,
        rx: &mpsc::Receiver<Event>,
        done: impl Fn(&App) -> bool,
    ) {
        while !done(app) {
            match rx.recv_timeout(Duration::from_secs(5)) {
                Ok(Event::App(event)) => app.handle_app_event(event),
                Ok(_) => {}
                Err(e) => panic!("timed out waiting for worker: {e}"),
            }
        }
    }

    #[test]
    fn test_empty_path_does_not_scan() {
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(Arc::new(StaticBackend), &options(), tx);
        app.start_scan();
        assert!(!app.session.is_scanning());
        assert!(app.status.has_message());
    }

    #[test]
    fn test_missing_file_releases_gate() {
        let (tx, _rx) = mpsc::channel();
        let opts = options().with_image(Some(PathBuf::from("/nonexistent/label.jpg")));
        let mut app = App::new(Arc::new(StaticBackend), &opts, tx);
        app.start_scan();
        assert!(!app.session.is_scanning());
    }

    #[test]
    fn test_scan_round_trip_through_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label.jpg");
        std::fs::write(&path, b"jpeg").unwrap();

        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Arc::new(StaticBackend), &options().with_image(Some(path)), tx);
        app.start_scan();
        assert!(app.session.is_scanning());

        drain_until(&mut app, &rx, |app| !app.session.is_scanning());
        let selected = app.session.selected().expect("scan selects a product");
        assert_eq!(selected.score, 45);
        assert_eq!(app.session.scan_state(), ScanState::Completed);

        drain_until(&mut app, &rx, |app| !app.history_loading);
        assert_eq!(app.history_list.total, 2);
    }

    #[test]
    fn test_search_and_open_history() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Arc::new(StaticBackend), &options(), tx);
        app.refresh_history();
        drain_until(&mut app, &rx, |app| !app.history_loading);

        app.search_input.value = "КОЛБ".into();
        app.apply_search();
        assert_eq!(app.history_list.total, 1);
        app.open_selected_history();
        assert_eq!(app.session.active_tab(), TabKind::Details);
        assert_eq!(app.session.selected().map(|p| p.score), Some(23));
    }

    /// First `list_products` call is slow and returns an older list.
    struct SlowFirstHistory {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl FoodBackend for SlowFirstHistory {
        fn recognize(&self, image: &CapturedImage) -> Result<Vec<String>> {
            StaticBackend.recognize(image)
        }

        fn score(&self, names: &[String]) -> Result<ScoredIngredients> {
            StaticBackend.score(names)
        }

        fn save_product(&self, product: &NewProduct) -> Result<Identifier> {
            StaticBackend.save_product(product)
        }

        fn list_products(&self, _query: &HistoryQuery) -> Result<Vec<Product>> {
            let call = self
                .calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if call == 0 {
                thread::sleep(Duration::from_millis(400));
                Ok(vec![Product::local("Старый", 50, vec![], Utc::now())])
            } else {
                Ok(vec![
                    Product::local("Новый продукт", 45, vec![], Utc::now()),
                    Product::local("Старый", 50, vec![], Utc::now()),
                ])
            }
        }

        fn ingredient_rating(&self, kind: RatingKind, limit: u32) -> Result<Vec<Ingredient>> {
            StaticBackend.ingredient_rating(kind, limit)
        }

        fn name(&self) -> &'static str {
            "slow-first"
        }
    }

    #[test]
    fn test_overlapping_history_refresh_keeps_newest() {
        let (tx, rx) = mpsc::channel();
        let backend = SlowFirstHistory {
            calls: std::sync::atomic::AtomicUsize::new(0),
        };
        let mut app = App::new(Arc::new(backend), &options(), tx);

        app.refresh_history();
        thread::sleep(Duration::from_millis(50));
        app.refresh_history();

        let mut applied = 0;
        while applied < 2 {
            match rx.recv_timeout(Duration::from_secs(5)) {
                Ok(Event::App(event @ AppEvent::HistoryLoaded { .. })) => {
                    app.handle_app_event(event);
                    applied += 1;
                    if applied == 1 {
                        assert!(!app.history_loading);
                    }
                }
                Ok(_) => {}
                Err(e) => panic!("timed out waiting for history: {e}"),
            }
        }

        let names: Vec<&str> = app
            .session
            .history()
            .products()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Новый продукт", "Старый"]);
        assert!(!app.history_loading);
    }

    #[test]
    fn test_ratings_partial_failure() {
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(Arc::new(StaticBackend), &options(), tx);
        app.refresh_ratings();
        drain_until(&mut app, &rx, |app| !app.ratings_loading);
        assert!(app.session.ratings().top_harmful().is_empty());
        assert_eq!(app.session.ratings().top_healthy().len(), 1);
    }
}
