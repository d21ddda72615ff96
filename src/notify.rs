//! User-facing toast notifications.
//!
//! The scan workflow reports its outcome through a [`Notifier`]. The CLI
//! prints notifications to stderr; the TUI forwards them over a channel and
//! shows them in the status bar.

use std::sync::mpsc::Sender;

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

/// A short toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn failure(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// OCR request failed.
    #[must_use]
    pub fn recognition_failed() -> Self {
        Self::failure("Ошибка", "Не удалось распознать состав")
    }

    /// OCR succeeded but produced no names.
    #[must_use]
    pub fn no_ingredients() -> Self {
        Self::failure(
            "Ингредиенты не найдены",
            "Попробуйте сфотографировать состав продукта чётче",
        )
    }

    /// Scoring request failed.
    #[must_use]
    pub fn scoring_failed() -> Self {
        Self::failure("Ошибка", "Не удалось проанализировать состав")
    }

    /// Scan finished; `count` is the number of recognized ingredients.
    #[must_use]
    pub fn analysis_complete(count: usize) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Анализ завершён".to_string(),
            description: format!("Распознано ингредиентов: {count}"),
        }
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self.kind, NotificationKind::Failure)
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

/// Receives workflow notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr with a timestamp.
pub struct StderrNotifier {
    quiet: bool,
}

impl StderrNotifier {
    /// With `quiet` set, only failures are printed.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        if self.quiet && !notification.is_failure() {
            return;
        }
        let ts = chrono::Local::now().format("%H:%M:%S");
        eprintln!("[{ts}] {notification}");
    }
}

/// Forwards notifications to a channel.
pub struct ChannelNotifier<T> {
    sender: Sender<T>,
}

impl<T> ChannelNotifier<T> {
    pub const fn new(sender: Sender<T>) -> Self {
        Self { sender }
    }
}

impl<T> Notifier for ChannelNotifier<T>
where
    T: From<Notification> + Send,
{
    fn notify(&self, notification: Notification) {
        if self.sender.send(T::from(notification)).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}
