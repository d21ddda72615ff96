//! Status message management for the TUI.
//!
//! Workflow notifications and local feedback ("Тема: light") are shown in
//! the footer for a few seconds.

use crate::notify::{Notification, NotificationKind};
use std::time::{Duration, Instant};

/// Severity of a status message, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Success,
    Error,
}

impl From<NotificationKind> for StatusLevel {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Success => Self::Success,
            NotificationKind::Failure => Self::Error,
        }
    }
}

/// Manages temporary status messages with optional auto-clear.
///
/// # Example
///
/// ```ignore
/// let mut status = StatusMessage::with_auto_clear(Duration::from_secs(4));
/// status.notify(&Notification::analysis_complete(5));
/// assert!(status.message().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    /// The current message (if any)
    message: Option<String>,
    level: StatusLevel,
    /// When the message was set (for auto-clear)
    set_at: Option<Instant>,
    /// Auto-clear duration (None = no auto-clear)
    auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a status message manager with auto-clear after duration.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            level: StatusLevel::Info,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    /// Set an informational message.
    pub fn set(&mut self, msg: impl Into<String>) {
        self.set_with_level(msg, StatusLevel::Info);
    }

    /// Set an error message.
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.set_with_level(msg, StatusLevel::Error);
    }

    fn set_with_level(&mut self, msg: impl Into<String>, level: StatusLevel) {
        self.message = Some(msg.into());
        self.level = level;
        self.set_at = Some(Instant::now());
    }

    /// Show a workflow notification.
    pub fn notify(&mut self, notification: &Notification) {
        self.set_with_level(notification.to_string(), notification.kind.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// Drop the message once its display time has passed.
    pub fn expire(&mut self) {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after) {
            if set_at.elapsed() >= duration {
                self.clear();
            }
        }
    }

    /// Get the current message (checking auto-clear if configured).
    pub fn message(&mut self) -> Option<&str> {
        self.expire();
        self.message.as_deref()
    }

    /// Get the current message without checking auto-clear.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }
}
