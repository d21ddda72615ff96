//! Integration tests for tab navigation and history browsing in a [`Session`].

mod common;

use common::{sample_history, ScriptedBackend};
use foodcheck::{HistoryQuery, Session, TabKind};

fn loaded_session() -> Session {
    let mut session = Session::new();
    session
        .refresh_history(&ScriptedBackend::happy(), &HistoryQuery::all())
        .expect("history loads");
    session
}

#[test]
fn test_empty_search_shows_full_history() {
    let mut session = loaded_session();
    session.set_search("");
    assert_eq!(session.filtered_history().len(), 2);
}

#[test]
fn test_blank_search_is_matched_literally() {
    let mut session = loaded_session();
    session.set_search("   ");
    assert!(session.filtered_history().is_empty());
    session.set_search(" варёная");
    assert_eq!(session.filtered_history().len(), 1);
}

#[test]
fn test_search_without_matches() {
    let mut session = loaded_session();
    session.set_search("шоколад");
    assert!(session.filtered_history().is_empty());
    assert!(!session.select_history(0));
    assert!(session.selected().is_none());
    assert_eq!(session.active_tab(), TabKind::Scanner);
}

#[test]
fn test_select_indexes_into_filtered_list() {
    let mut session = loaded_session();
    session.set_search("КОЛБАСА");

    assert!(session.select_history(0));

    let selected = session.selected().expect("selected");
    assert_eq!(selected.name, "Колбаса варёная");
    assert_eq!(selected.score, 23);
    assert_eq!(session.active_tab(), TabKind::Details);
}

#[test]
fn test_failed_refresh_keeps_previous_history() {
    let mut session = loaded_session();
    let backend = ScriptedBackend::happy().with_products(None);

    let err = session
        .refresh_history(&backend, &HistoryQuery::all())
        .unwrap_err();

    assert!(err.to_string().contains("refreshing history"));
    assert_eq!(session.history().products(), sample_history().as_slice());
}

#[test]
fn test_tabs_are_independent_of_selection() {
    let mut session = loaded_session();
    assert!(session.select_history(1));
    for tab in TabKind::ALL {
        session.set_tab(tab);
        assert_eq!(session.active_tab(), tab);
        assert_eq!(session.selected().map(|p| p.score), Some(23));
    }
}
