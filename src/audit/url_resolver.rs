//! Per-row URL resolution
//!
//! Clipboard first: trigger the row's copy control and read back what the
//! console put on the clipboard. When that yields nothing usable, rebuild
//! the URL from the slug cell and the configured template.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::RowHandle;
use crate::config::AuditConfig;
use crate::error::AuditResult;
use crate::surface::{CatalogSurface, Locator};
use crate::utils::{UrlTemplate, is_http_url, normalize_slug, settle, with_timeout};

/// Which strategy produced the URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlSource {
    Clipboard,
    TableFallback,
    None,
}

impl UrlSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::TableFallback => "table-fallback",
            Self::None => "none",
        }
    }
}

/// Outcome of resolving one row. `url` is `None` when the row is unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUrl {
    pub url: Option<String>,
    pub source: UrlSource,
}

impl ResolvedUrl {
    #[must_use]
    pub fn clipboard(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            source: UrlSource::Clipboard,
        }
    }

    #[must_use]
    pub fn table_fallback(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            source: UrlSource::TableFallback,
        }
    }

    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            url: None,
            source: UrlSource::None,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.url.is_some()
    }
}

/// Build the fallback URL from raw slug cell text.
///
/// Returns `None` for a missing or blank cell.
#[must_use]
pub fn fallback_url(template: &UrlTemplate, brand_slug: &str, cell_text: Option<&str>) -> Option<String> {
    cell_text
        .and_then(normalize_slug)
        .map(|slug| template.render(brand_slug, &slug))
}

/// Copy-to-clipboard strategy. Any failure means "nothing".
async fn resolve_from_clipboard<S>(surface: &S, row: RowHandle, config: &AuditConfig) -> Option<String>
where
    S: CatalogSurface + ?Sized,
{
    // A leftover URL from the previous row must not be mistaken for this one
    if let Err(e) = surface.write_clipboard("").await {
        debug!("Could not clear clipboard before row {}: {e}", row.number());
    }

    let locator = Locator::CopyControl { row: row.index };
    if let Err(e) = surface
        .wait_for_visible(&locator, config.copy_control_timeout())
        .await
    {
        warn!("Row {}: {e}", row.number());
        return None;
    }
    if let Err(e) = surface.activate(&locator).await {
        warn!("Row {}: copy action failed: {e}", row.number());
        return None;
    }

    settle(config.copy_settle()).await;

    let read = with_timeout(
        surface.read_clipboard(),
        config.clipboard_timeout(),
        "clipboard read",
    )
    .await;

    match read {
        Ok(text) => {
            let text = text.trim();
            if is_http_url(text) {
                debug!("Row {} clipboard: {text}", row.number());
                Some(text.to_string())
            } else {
                if !text.is_empty() {
                    debug!("Row {} clipboard held a non-URL value: {text:?}", row.number());
                }
                None
            }
        }
        Err(e) if e.is_recoverable() => {
            debug!("Row {} clipboard unavailable: {e}", row.number());
            None
        }
        Err(e) => {
            warn!("Row {} clipboard read failed: {e}", row.number());
            None
        }
    }
}

async fn read_slug_cell<S>(surface: &S, row: RowHandle) -> AuditResult<Option<String>>
where
    S: CatalogSurface + ?Sized,
{
    surface.row_cell_text(row.index, row.slug_column_index).await
}

/// Resolve the public URL of `row`. Never fails: an unusable row resolves
/// to [`ResolvedUrl::unresolved`].
pub async fn resolve_url<S>(
    surface: &S,
    row: RowHandle,
    brand_slug: &str,
    template: &UrlTemplate,
    config: &AuditConfig,
) -> ResolvedUrl
where
    S: CatalogSurface + ?Sized,
{
    if let Some(url) = resolve_from_clipboard(surface, row, config).await {
        return ResolvedUrl::clipboard(url);
    }

    warn!("Row {}: clipboard empty, using slug column {}", row.number(), row.slug_column_index);

    let cell = match read_slug_cell(surface, row).await {
        Ok(cell) => cell,
        Err(e) => {
            warn!("Row {}: cannot read slug cell: {e}", row.number());
            None
        }
    };

    match fallback_url(template, brand_slug, cell.as_deref()) {
        Some(url) => ResolvedUrl::table_fallback(url),
        None => {
            warn!("Row {}: no URL from clipboard or table", row.number());
            ResolvedUrl::unresolved()
        }
    }
}
