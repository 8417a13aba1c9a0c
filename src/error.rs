//! Error types for catalog audit operations
//!
//! Distinguishes failures that end a whole brand run (filter synchronisation,
//! empty listings) from the expected, non-fatal conditions that only steer a
//! single row toward its fallback path.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for audit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Error types for catalog audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    /// A required control never became visible within the wait budget.
    #[error("element '{target}' not visible after {timeout:?}")]
    ElementNotFound {
        /// Human-readable description of the element
        target: String,
        /// How long we waited
        timeout: Duration,
    },

    /// The listing has no actionable rows.
    #[error("no actionable rows in the product listing for brand '{brand}'")]
    EmptyListing { brand: String },

    /// Toggling the filter did not produce the expected network response.
    #[error("filter '{label}' did not refresh the listing within {timeout:?}")]
    FilterSyncTimeout { label: String, timeout: Duration },

    /// Clipboard could not be read. Expected in headless sessions.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// A bounded suspension point expired.
    #[error("{operation} timed out after {timeout:?}")]
    Timeout { operation: String, timeout: Duration },

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed { url: String, reason: String },

    /// Console login did not leave the login screen.
    #[error("login failed: {0}")]
    LoginFailed(String),

    /// JavaScript evaluation in the page failed or returned an unexpected shape.
    #[error("script execution failed: {0}")]
    ScriptExecution(String),

    /// Wraps errors from the chromiumoxide library.
    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AuditError {
    fn from(error: anyhow::Error) -> Self {
        // {:#} keeps the context chain
        AuditError::Other(format!("{error:#}"))
    }
}

impl AuditError {
    /// Whether this error ends the current brand's run.
    ///
    /// Row-level failures are folded into the row's record and never reach
    /// this check. An `ElementNotFound` that does reach it came from either
    /// the filter toggle or the console controls that open the brand's
    /// listing; in both cases the rows cannot be trusted or reached, so the
    /// brand is skipped. Login failures end the whole run instead and are
    /// not brand-level.
    #[must_use]
    pub fn is_brand_fatal(&self) -> bool {
        matches!(
            self,
            AuditError::FilterSyncTimeout { .. }
                | AuditError::EmptyListing { .. }
                | AuditError::ElementNotFound { .. }
        )
    }

    /// Whether this error only means "try the next strategy".
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AuditError::ClipboardUnavailable(_) | AuditError::Timeout { .. }
        )
    }
}
