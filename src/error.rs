//! Unified error types for foodcheck.
//!
//! Errors carry a context chain so a failed request can be traced back to
//! the stage that issued it (recognition, scoring, persistence, ...).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for foodcheck operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FoodCheckError {
    /// Errors talking to one of the backend endpoints
    #[error("Backend request failed: {context}")]
    Api {
        context: String,
        #[source]
        source: ApiErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific backend error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiErrorKind {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Endpoint returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl ApiErrorKind {
    /// Whether the failure happened before any response arrived.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for foodcheck operations
pub type Result<T> = std::result::Result<T, FoodCheckError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl FoodCheckError {
    /// Create a backend error with context
    pub fn api(context: impl Into<String>, source: ApiErrorKind) -> Self {
        Self::Api {
            context: context.into(),
            source,
        }
    }

    /// Create a backend error for a non-success HTTP status
    pub fn status(context: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::api(
            context,
            ApiErrorKind::Status {
                status,
                message: message.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status of the failed request, if one was received.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api {
                source: ApiErrorKind::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for FoodCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FoodCheckError {
    fn from(err: serde_json::Error) -> Self {
        Self::api(
            "JSON deserialization",
            ApiErrorKind::InvalidResponse(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// # Example
///
/// ```ignore
/// use foodcheck::error::ErrorContext;
///
/// let products = backend
///     .list_products(&query)
///     .context("refreshing history")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    ///
    /// The context string is prepended to the error's existing context.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<FoodCheckError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: FoodCheckError, new_ctx: &str) -> FoodCheckError {
    match err {
        FoodCheckError::Api {
            context: existing,
            source,
        } => FoodCheckError::Api {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FoodCheckError::Io {
            path,
            message,
            source,
        } => FoodCheckError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        FoodCheckError::Config(msg) => FoodCheckError::Config(chain_context(new_ctx, &msg)),
        FoodCheckError::Validation(msg) => {
            FoodCheckError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| FoodCheckError::Validation(context.into()))
    }
}
