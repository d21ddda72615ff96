//! Integration tests for the scan workflow driven through a [`Session`].
//!
//! Every backend call is answered by `ScriptedBackend`; notifications are
//! captured by `RecordingNotifier`.

mod common;

use common::{label_image, sample_history, RecordingNotifier, ScriptedBackend};
use foodcheck::{
    Category, HistoryQuery, Identifier, Ingredient, NotificationKind, ProductId, RatingsCache,
    ScanFailure, ScanOutcome, ScanState, ScanWorkflow, Session, TabKind,
};
use std::sync::Arc;

fn workflow(backend: &Arc<ScriptedBackend>, notifier: &Arc<RecordingNotifier>) -> ScanWorkflow {
    ScanWorkflow::new(backend.clone(), notifier.clone())
}

// ============================================================================
// Failure paths
// ============================================================================

mod failure_tests {
    use super::*;

    #[test]
    fn test_no_ingredients_returns_to_idle() {
        let backend = Arc::new(ScriptedBackend::happy().with_names(Some(Vec::new())));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = Session::new();
        session.replace_history(sample_history());
        assert!(session.select_history(1));
        let before = session.selected().cloned();

        let report = session
            .scan(&workflow(&backend, &notifier), Some(label_image()), &HistoryQuery::all())
            .expect("scan should run");

        assert_eq!(
            report.transitions,
            vec![
                ScanState::Capturing,
                ScanState::Recognizing,
                ScanState::Failed(ScanFailure::NoIngredients),
                ScanState::Idle,
            ]
        );
        assert_eq!(report.final_state(), ScanState::Idle);
        assert_eq!(session.scan_state(), ScanState::Idle);
        assert!(!session.is_scanning());
        assert_eq!(session.selected().cloned(), before);

        let seen = notifier.all();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Failure);
        assert_eq!(seen[0].title, "Ингредиенты не найдены");

        // Scoring must not be attempted
        assert_eq!(backend.calls(), vec!["recognize"]);
    }

    #[test]
    fn test_recognition_error() {
        let backend = Arc::new(ScriptedBackend::happy().with_names(None));
        let notifier = Arc::new(RecordingNotifier::default());

        let report = workflow(&backend, &notifier).run(Some(label_image()), &mut |_| {});

        assert_eq!(
            report.outcome,
            ScanOutcome::Failed {
                reason: ScanFailure::Recognition
            }
        );
        assert!(report.product.is_none());
        assert_eq!(notifier.all().len(), 1);
        assert_eq!(notifier.all()[0].description, "Не удалось распознать состав");
    }

    #[test]
    fn test_scoring_error_skips_persistence() {
        let backend = Arc::new(ScriptedBackend::happy().with_scored(None));
        let notifier = Arc::new(RecordingNotifier::default());

        let report = workflow(&backend, &notifier).run(Some(label_image()), &mut |_| {});

        assert_eq!(
            report.transitions,
            vec![
                ScanState::Capturing,
                ScanState::Recognizing,
                ScanState::Scoring,
                ScanState::Failed(ScanFailure::Scoring),
                ScanState::Idle,
            ]
        );
        assert_eq!(backend.calls(), vec!["recognize", "score"]);
        assert!(backend.saved().is_empty());
        assert_eq!(notifier.all()[0].description, "Не удалось проанализировать состав");
    }

    #[test]
    fn test_missing_image_is_a_no_op() {
        let backend = Arc::new(ScriptedBackend::happy());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = Session::new();

        let report = session
            .scan(&workflow(&backend, &notifier), None, &HistoryQuery::all())
            .expect("scan should run");

        assert_eq!(report.outcome, ScanOutcome::Skipped);
        assert!(report.transitions.is_empty());
        assert!(backend.calls().is_empty());
        assert!(notifier.all().is_empty());
        assert!(session.selected().is_none());
        assert!(!session.is_scanning());
    }
}

// ============================================================================
// Success paths
// ============================================================================

mod success_tests {
    use super::*;

    #[test]
    fn test_completed_scan_selects_product_and_refreshes_history() {
        let backend = Arc::new(ScriptedBackend::happy());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = Session::new();

        let report = session
            .scan(&workflow(&backend, &notifier), Some(label_image()), &HistoryQuery::all())
            .expect("scan should run");

        assert_eq!(report.outcome, ScanOutcome::Completed { persisted: true });
        assert_eq!(
            report.transitions,
            vec![
                ScanState::Capturing,
                ScanState::Recognizing,
                ScanState::Scoring,
                ScanState::Persisting,
                ScanState::Completed,
            ]
        );

        let selected = session.selected().expect("product selected");
        assert_eq!(selected.score, 75);
        assert_eq!(selected.id, ProductId::Persisted(Identifier::from(101)));
        assert_eq!(selected.ingredients.len(), 3);
        assert_eq!(session.scan_state(), ScanState::Completed);
        assert_eq!(session.active_tab(), TabKind::Scanner);

        assert_eq!(
            backend.calls(),
            vec!["recognize", "score", "save_product", "list_products"]
        );
        assert_eq!(session.history().len(), 2);

        let seen = notifier.all();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Success);
        assert_eq!(seen[0].description, "Распознано ингредиентов: 3");
    }

    #[test]
    fn test_persistence_error_keeps_local_id() {
        let backend = Arc::new(ScriptedBackend::happy().with_saved_id(None));
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = Session::new();

        let report = session
            .scan(&workflow(&backend, &notifier), Some(label_image()), &HistoryQuery::all())
            .expect("scan should run");

        assert_eq!(report.outcome, ScanOutcome::Completed { persisted: false });
        assert_eq!(report.final_state(), ScanState::Completed);

        let selected = session.selected().expect("product selected");
        assert_eq!(selected.score, 75);
        assert!(!selected.id.is_empty());
        assert!(matches!(selected.id, ProductId::Local(_)));

        let seen = notifier.all();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_empty_saved_id_keeps_local_id() {
        let backend = Arc::new(ScriptedBackend::happy().with_saved_id(Some(Identifier::from(""))));
        let notifier = Arc::new(RecordingNotifier::default());

        let report = workflow(&backend, &notifier).run(Some(label_image()), &mut |_| {});

        assert_eq!(report.outcome, ScanOutcome::Completed { persisted: false });
        let product = report.product.expect("product");
        assert!(matches!(product.id, ProductId::Local(_)));
    }

    #[test]
    fn test_saved_body_carries_only_matched_ids() {
        let backend = Arc::new(ScriptedBackend::happy().with_scored(Some((
            41,
            vec![
                Ingredient::new("Соль", 50, Category::Neutral).with_id(3),
                Ingredient::new("Неизвестное", 50, Category::Neutral),
                Ingredient::new("Е621", 20, Category::Harmful).with_id("e621"),
            ],
        ))));
        let notifier = Arc::new(RecordingNotifier::default());

        workflow(&backend, &notifier)
            .with_product_name("Чипсы")
            .run(Some(label_image()), &mut |_| {});

        let saved = backend.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Чипсы");
        assert_eq!(saved[0].score, 41);
        assert_eq!(
            saved[0].ingredient_ids,
            vec![Identifier::from(3), Identifier::from("e621")]
        );
    }
}

// ============================================================================
// Single-flight scanning
// ============================================================================

mod gate_tests {
    use super::*;

    #[test]
    fn test_scan_while_scanning_is_ignored() {
        let backend = Arc::new(ScriptedBackend::happy());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut session = Session::new();

        let permit = session.begin_scan().expect("first permit");
        assert!(session.is_scanning());

        let second = session.scan(
            &workflow(&backend, &notifier),
            Some(label_image()),
            &HistoryQuery::all(),
        );

        assert!(second.is_none());
        assert!(session.is_scanning());
        assert!(backend.calls().is_empty());
        assert!(notifier.all().is_empty());

        drop(permit);
        assert!(!session.is_scanning());
    }

    #[test]
    fn test_gate_released_after_scan() {
        let backend = Arc::new(ScriptedBackend::happy());
        let notifier = Arc::new(RecordingNotifier::default());
        let wf = workflow(&backend, &notifier);
        let mut session = Session::new();

        assert!(session.scan(&wf, Some(label_image()), &HistoryQuery::all()).is_some());
        assert!(!session.is_scanning());
        assert!(session.scan(&wf, Some(label_image()), &HistoryQuery::all()).is_some());
        assert_eq!(notifier.all().len(), 2);
    }
}

// ============================================================================
// Ratings
// ============================================================================

mod ratings_tests {
    use super::*;

    #[test]
    fn test_one_failed_leaderboard_keeps_the_other() {
        let backend = ScriptedBackend::happy().with_ratings(
            None,
            Some(vec![Ingredient::new("Витамин B12", 95, Category::Healthy)]),
        );
        let mut cache = RatingsCache::new();

        let update = cache.refresh(&backend, 5);

        assert!(!update.harmful);
        assert!(update.healthy);
        assert!(cache.top_harmful().is_empty());
        assert_eq!(cache.top_healthy().len(), 1);
        assert_eq!(cache.top_healthy()[0].name, "Витамин B12");
    }

    #[test]
    fn test_failed_refresh_keeps_previous_values() {
        let mut cache = RatingsCache::new();
        cache.refresh(&ScriptedBackend::happy(), 5);
        assert_eq!(cache.top_harmful().len(), 1);

        let update = cache.refresh(&ScriptedBackend::happy().with_ratings(None, None), 5);

        assert!(!update.harmful);
        assert!(!update.healthy);
        assert_eq!(cache.top_harmful().len(), 1);
        assert_eq!(cache.top_healthy().len(), 1);
    }

    #[test]
    fn test_session_ratings_pass_through() {
        let mut session = Session::new();
        let update = session.refresh_ratings(&ScriptedBackend::happy(), 5);
        assert!(update.harmful && update.healthy);
        assert_eq!(session.ratings().top_harmful()[0].score, 15);
    }
}
