//! Product page health classification
//!
//! Opens a resolved URL in its own tab, waits for the document, and matches
//! the rendered body text against known broken-page phrases. The tab is
//! closed on every path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::AuditConfig;
use crate::error::AuditResult;
use crate::surface::{CatalogSurface, ProductContext};
use crate::utils::{BROKEN_PAGE_SIGNATURES, settle, truncate_chars};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Ok,
    Broken,
    SkippedUnresolved,
}

impl HealthStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Broken => "BROKEN",
            Self::SkippedUnresolved => "SKIPPED",
        }
    }
}

/// Verdict for one row. `evidence_path` is only set for `Broken` pages
/// whose screenshot was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthVerdict {
    pub status: HealthStatus,
    pub evidence_path: Option<PathBuf>,
    pub matched_signature: Option<String>,
    pub http_status: Option<u16>,
    /// Why the page counts as broken when no signature matched
    pub detail: Option<String>,
}

impl HealthVerdict {
    #[must_use]
    pub fn ok(http_status: Option<u16>) -> Self {
        Self {
            status: HealthStatus::Ok,
            evidence_path: None,
            matched_signature: None,
            http_status,
            detail: None,
        }
    }

    #[must_use]
    pub fn skipped() -> Self {
        Self {
            status: HealthStatus::SkippedUnresolved,
            evidence_path: None,
            matched_signature: None,
            http_status: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn broken(detail: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Broken,
            evidence_path: None,
            matched_signature: None,
            http_status: None,
            detail: Some(detail.into()),
        }
    }

    #[must_use]
    pub fn is_broken(&self) -> bool {
        self.status == HealthStatus::Broken
    }
}

/// First broken-page signature found in `text`, compared case-insensitively.
#[must_use]
pub fn detect_broken_signature(text: &str) -> Option<&'static str> {
    let normalized = text.to_lowercase();
    BROKEN_PAGE_SIGNATURES
        .iter()
        .copied()
        .find(|signature| normalized.contains(signature))
}

/// Classify already-extracted page text.
///
/// With `status_check` enabled an HTTP status of 400 or above is broken even
/// when the text looks healthy.
#[must_use]
pub fn classify_page(text: &str, http_status: Option<u16>, status_check: bool) -> HealthVerdict {
    if let Some(signature) = detect_broken_signature(text) {
        return HealthVerdict {
            status: HealthStatus::Broken,
            evidence_path: None,
            matched_signature: Some(signature.to_string()),
            http_status,
            detail: None,
        };
    }

    match http_status {
        Some(status) if status_check && status >= 400 => HealthVerdict {
            status: HealthStatus::Broken,
            evidence_path: None,
            matched_signature: None,
            http_status,
            detail: Some(format!("HTTP error: {status}")),
        },
        _ => HealthVerdict::ok(http_status),
    }
}

async fn inspect<C>(context: &mut C, url: &str, config: &AuditConfig) -> AuditResult<HealthVerdict>
where
    C: ProductContext + ?Sized,
{
    let http_status = context.navigate(url, config.page_load_timeout()).await?;
    context
        .wait_for_content_loaded(config.content_ready_timeout())
        .await?;
    settle(config.page_settle()).await;

    let text = context.body_text().await?;
    debug!("Page text for {url}: {:?}", truncate_chars(&text, 200));

    Ok(classify_page(&text, http_status, config.status_check()))
}

/// Classify the page at `url`.
///
/// `None` short-circuits to `SkippedUnresolved` without opening a tab.
/// A page that cannot be loaded counts as broken. On a broken verdict a
/// screenshot is attempted at `evidence_path`; failure to write it is
/// logged and leaves `evidence_path` unset.
pub async fn classify<S>(
    surface: &S,
    url: Option<&str>,
    evidence_path: &Path,
    config: &AuditConfig,
) -> HealthVerdict
where
    S: CatalogSurface + ?Sized,
{
    let Some(url) = url else {
        return HealthVerdict::skipped();
    };

    let mut context = match surface.open_context().await {
        Ok(context) => context,
        Err(e) => {
            error!("Cannot open a tab for {url}: {e}");
            return HealthVerdict::broken(format!("could not open tab: {e}"));
        }
    };

    let mut verdict = match inspect(&mut context, url, config).await {
        Ok(verdict) => verdict,
        Err(e) => {
            warn!("Failed to load {url}: {e}");
            HealthVerdict::broken(e.to_string())
        }
    };

    if verdict.is_broken() {
        error!("Broken page detected: {url}");
        match context.screenshot(evidence_path).await {
            Ok(()) => {
                info!("Evidence saved to {}", evidence_path.display());
                verdict.evidence_path = Some(evidence_path.to_path_buf());
            }
            Err(e) => warn!("Screenshot of {url} failed: {e}"),
        }
    } else {
        info!("OK: {url}");
    }

    if let Err(e) = context.close().await {
        warn!("Failed to close tab for {url}: {e}");
    }

    verdict
}
