//! Reusable state components embedded in the TUI [`App`](super::App).
//!
//! - [`StatusMessage`] - Temporary footer message with auto-clear
//! - [`TextInput`] - Single-line editable input

mod input;
mod status;

pub use input::TextInput;
pub use status::{StatusLevel, StatusMessage};
