//! Interactive terminal UI using ratatui.
//!
//! Four tabs mirror the [`Session`](crate::session::Session) view state:
//! Scanner, Details, Rating and History. Network calls run on worker
//! threads and report back through the event channel, so the screen keeps
//! redrawing while a scan is in flight.

mod app;
mod events;
pub mod state;
pub mod theme;
mod ui;
mod views;
pub mod viewmodel;
pub(crate) mod widgets;

// Theme exports
pub use theme::{
    colors, current_theme_name, set_theme, toggle_theme, ColorScheme, FooterHints, Styles, Theme,
};

pub use state::{ListNavigation, ListState};
pub use viewmodel::{StatusLevel, StatusMessage, TextInput};

pub use app::{App, TuiOptions};
pub use events::{AppEvent, Event, EventHandler};
pub use ui::run_tui;
