//! Event handling for the TUI.
//!
//! Terminal input is polled on a background thread and merged with results
//! from worker threads (scan progress, history and ratings fetches) into a
//! single channel that the main loop drains.

use super::app::App;
use crate::error::Result;
use crate::model::Product;
use crate::notify::Notification;
use crate::session::TabKind;
use crate::store::RatingsFetch;
use crate::tui::state::ListNavigation;
use crate::workflow::{ScanPermit, ScanReport, ScanState};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick (for animations and status expiry)
    Tick,
    /// Resize event
    Resize(u16, u16),
    /// Result delivered by a worker thread
    App(AppEvent),
}

/// Results sent back by worker threads.
#[derive(Debug)]
pub enum AppEvent {
    /// The running scan entered a new state
    ScanProgress(ScanState),
    /// The scan finished; the permit is released once the report is applied
    ScanFinished { report: ScanReport, permit: ScanPermit },
    /// A workflow toast
    Notify(Notification),
    /// Products from the refresh numbered `generation`
    HistoryLoaded {
        generation: u64,
        result: Result<Vec<Product>>,
    },
    RatingsLoaded(RatingsFetch),
}

impl From<Notification> for Event {
    fn from(notification: Notification) -> Self {
        Self::App(AppEvent::Notify(notification))
    }
}

impl From<AppEvent> for Event {
    fn from(event: AppEvent) -> Self {
        Self::App(event)
    }
}

/// Event handler
pub struct EventHandler {
    sender: Sender<Event>,
    receiver: Receiver<Event>,
}

impl EventHandler {
    /// Start polling the terminal, emitting a tick every `tick_rate` without input.
    #[must_use]
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let input_tx = sender.clone();
        thread::spawn(move || poll_terminal(&input_tx, tick_rate));
        Self { sender, receiver }
    }

    /// Sender for worker threads.
    #[must_use]
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    /// Block until the next event.
    pub fn next(&self) -> io::Result<Event> {
        self.receiver
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::BrokenPipe, e))
    }
}

fn poll_terminal(tx: &Sender<Event>, tick_rate: Duration) {
    loop {
        let event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                Ok(CrosstermEvent::Resize(width, height)) => Event::Resize(width, height),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal event");
                    continue;
                }
            },
            Ok(false) => Event::Tick,
            Err(e) => {
                tracing::error!(error = %e, "terminal polling stopped");
                return;
            }
        };
        if tx.send(event).is_err() {
            return;
        }
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Text inputs capture every key while active
    if app.image_input.active {
        handle_image_input(app, key);
        return;
    }
    if app.search_input.active {
        handle_search_input(app, key);
        return;
    }

    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Char('?' | 'q') | KeyCode::Enter
        ) {
            app.show_help = false;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
            return;
        }
        KeyCode::Char('t') => {
            app.toggle_theme();
            return;
        }
        KeyCode::Tab => {
            app.set_tab(app.session.active_tab().next());
            return;
        }
        KeyCode::BackTab => {
            app.set_tab(app.session.active_tab().prev());
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            if let Some(tab) = TabKind::from_index(index) {
                app.set_tab(tab);
            }
            return;
        }
        _ => {}
    }

    match app.session.active_tab() {
        TabKind::Scanner => handle_scanner_key(app, key),
        TabKind::Details => handle_details_key(app, key),
        TabKind::Rating => handle_rating_key(app, key),
        TabKind::History => handle_history_key(app, key),
    }
}

fn handle_image_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.image_input.stop(),
        KeyCode::Enter => {
            app.image_input.stop();
            app.start_scan();
        }
        KeyCode::Backspace => app.image_input.pop_char(),
        KeyCode::Char(c) => app.image_input.push_char(c),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.search_input.cancel();
            app.apply_search();
        }
        KeyCode::Enter => app.search_input.stop(),
        KeyCode::Backspace => {
            app.search_input.pop_char();
            app.apply_search();
        }
        KeyCode::Char(c) => {
            app.search_input.push_char(c);
            app.apply_search();
        }
        _ => {}
    }
}

fn handle_scanner_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('e' | 'i') => app.image_input.start(),
        KeyCode::Enter | KeyCode::Char('s') => app.start_scan(),
        _ => {}
    }
}

fn handle_details_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.details_scroll = app.details_scroll.saturating_add(1),
        KeyCode::Up | KeyCode::Char('k') => app.details_scroll = app.details_scroll.saturating_sub(1),
        KeyCode::Home | KeyCode::Char('g') => app.details_scroll = 0,
        _ => {}
    }
}

fn handle_rating_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('r') {
        app.refresh_ratings();
    }
}

fn handle_history_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => app.search_input.start(),
        KeyCode::Char('r') => app.refresh_history(),
        KeyCode::Down | KeyCode::Char('j') => app.history_list.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.history_list.select_prev(),
        KeyCode::PageDown => app.history_list.page_down(),
        KeyCode::PageUp => app.history_list.page_up(),
        KeyCode::Home | KeyCode::Char('g') => app.history_list.go_first(),
        KeyCode::End | KeyCode::Char('G') => app.history_list.go_last(),
        KeyCode::Enter => app.open_selected_history(),
        _ => {}
    }
}
