//! Filter state synchronisation
//!
//! Check-then-toggle on the listing's filter pill. When a toggle is needed
//! the response stream is subscribed first, then the pill is clicked, then
//! we block until the listing refresh request comes back successfully.

use futures::StreamExt;
use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult};
use crate::surface::{CatalogSurface, Locator};
use crate::utils::settle;

/// What the synchroniser had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Filter was already active; nothing was clicked
    AlreadyActive,
    /// Filter was toggled and the listing refreshed
    Toggled,
}

/// Whether any of the `active` class names appears as a token in `class_attr`.
#[must_use]
pub fn is_active_class_list(class_attr: &str, active: &[String]) -> bool {
    class_attr
        .split_whitespace()
        .any(|token| active.iter().any(|class| class == token))
}

/// Make sure the filter labelled `label` is active.
///
/// Safe to call repeatedly: an already-active filter is never re-toggled.
///
/// # Errors
/// * `ElementNotFound` - the toggle never became visible
/// * `FilterSyncTimeout` - no successful refresh response after the toggle
pub async fn ensure_filter_active<S>(
    surface: &S,
    label: &str,
    config: &AuditConfig,
) -> AuditResult<FilterOutcome>
where
    S: CatalogSurface + ?Sized,
{
    let locator = Locator::FilterToggle {
        label: label.to_string(),
    };

    surface
        .wait_for_visible(&locator, config.visibility_timeout())
        .await?;

    let classes = surface.class_names(&locator).await?;
    if is_active_class_list(&classes, config.filter_active_classes()) {
        debug!("Filter '{label}' already active");
        return Ok(FilterOutcome::AlreadyActive);
    }

    info!("Activating filter '{label}'");
    let fragment = config.filter_response_fragment();
    let timeout = config.filter_response_timeout();

    // Subscribe before clicking so the refresh response cannot be missed
    let mut responses = surface.observe_responses().await?;
    surface.activate(&locator).await?;

    let refreshed = tokio::time::timeout(timeout, async {
        while let Some(response) = responses.next().await {
            if response.url.contains(fragment) && response.is_success() {
                debug!("Listing refreshed: {} ({})", response.url, response.status);
                return true;
            }
        }
        false
    })
    .await
    .unwrap_or(false);

    if !refreshed {
        return Err(AuditError::FilterSyncTimeout {
            label: label.to_string(),
            timeout,
        });
    }

    settle(config.filter_settle()).await;
    Ok(FilterOutcome::Toggled)
}
