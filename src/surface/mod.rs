//! Browser capability surface
//!
//! The audit core never talks to chromiumoxide directly. It drives two
//! traits: [`CatalogSurface`] for the product listing page owned by the
//! console session, and [`ProductContext`] for the short-lived tab each
//! product URL is opened in. [`chrome`] implements both on top of a real
//! Chromium; tests script them in memory.

pub mod chrome;
pub mod js_scripts;

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::AuditResult;

pub use chrome::{ChromeCatalogSurface, ChromeProductContext};

/// An element on the listing page the core needs to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Filter pill whose text contains `label`
    FilterToggle { label: String },
    /// Copy-link button of the `row`-th actionable row (0-based, document order)
    CopyControl { row: usize },
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilterToggle { label } => write!(f, "filter toggle '{label}'"),
            Self::CopyControl { row } => write!(f, "copy control #{}", row + 1),
        }
    }
}

/// A network response seen by the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedResponse {
    pub url: String,
    pub status: u16,
}

impl ObservedResponse {
    #[must_use]
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Responses observed from the moment of subscription onward.
pub type ResponseStream = BoxStream<'static, ObservedResponse>;

/// The product listing page, scoped to one brand.
///
/// Implementations must be safe to call strictly sequentially; the core
/// never issues overlapping calls.
#[async_trait]
pub trait CatalogSurface: Send + Sync {
    type Context: ProductContext;

    /// Wait until `locator` is present and visible.
    ///
    /// Fails with `AuditError::ElementNotFound` when the timeout expires.
    async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> AuditResult<()>;

    /// The element's `class` attribute, as a whitespace-separated string.
    async fn class_names(&self, locator: &Locator) -> AuditResult<String>;

    /// Scroll the element into view and dispatch a synthetic click on it.
    async fn activate(&self, locator: &Locator) -> AuditResult<()>;

    /// Start observing network responses. Subscribe before the action whose
    /// response you want to see.
    async fn observe_responses(&self) -> AuditResult<ResponseStream>;

    /// Number of copy-link controls currently in the listing.
    async fn count_copy_controls(&self) -> AuditResult<usize>;

    /// Trimmed text of each cell in the first data row.
    async fn first_row_cells(&self) -> AuditResult<Vec<String>>;

    /// Raw text of cell `column` (0-based) in the row holding copy control `row`.
    async fn row_cell_text(&self, row: usize, column: usize) -> AuditResult<Option<String>>;

    async fn write_clipboard(&self, text: &str) -> AuditResult<()>;

    /// Fails with `AuditError::ClipboardUnavailable` if the clipboard cannot be read.
    async fn read_clipboard(&self) -> AuditResult<String>;

    /// Open a fresh, isolated tab. The listing page is left untouched.
    async fn open_context(&self) -> AuditResult<Self::Context>;
}

/// An isolated tab used to load a single product page.
#[async_trait]
pub trait ProductContext: Send {
    /// Navigate and return the main document's HTTP status, if it was observed.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> AuditResult<Option<u16>>;

    /// Wait for `DOMContentLoaded`.
    async fn wait_for_content_loaded(&self, timeout: Duration) -> AuditResult<()>;

    /// `document.body.innerText`, empty if there is no body.
    async fn body_text(&self) -> AuditResult<String>;

    /// Write a PNG screenshot to `path`, creating parent directories.
    async fn screenshot(&self, path: &Path) -> AuditResult<()>;

    /// Close the tab. Calling it twice is a no-op.
    async fn close(&mut self) -> AuditResult<()>;
}
