//! chromiumoxide implementation of the capability surface
//!
//! All DOM access goes through JSON-escaped scripts from [`super::js_scripts`],
//! evaluated with `awaitPromise` so clipboard promises resolve in-page.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::network::{EventResponseReceived, ResourceType};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, FrameId,
};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};

use super::js_scripts as js;
use super::{CatalogSurface, Locator, ObservedResponse, ProductContext, ResponseStream};
use crate::error::{AuditError, AuditResult};
use crate::utils::{WaitConfig, wait_until, with_timeout};

/// How long to keep scanning buffered response events for the document status
const STATUS_LOOKUP_WINDOW: Duration = Duration::from_millis(500);

/// Evaluate `script` in the page and deserialize its by-value result.
///
/// `undefined` results deserialize as JSON `null`.
pub(crate) async fn evaluate<T: DeserializeOwned>(page: &Page, script: &str) -> AuditResult<T> {
    let params = EvaluateParams::builder()
        .expression(script)
        .await_promise(true)
        .return_by_value(true)
        .build()
        .map_err(AuditError::ScriptExecution)?;

    let result = page
        .evaluate_expression(params)
        .await
        .map_err(|e| AuditError::ScriptExecution(e.to_string()))?;

    let value = result.value().cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value)
        .map_err(|e| AuditError::ScriptExecution(format!("unexpected script result: {e}")))
}

/// Poll a boolean script until it returns `true`.
pub(crate) async fn wait_for_script(
    page: &Page,
    script: &str,
    timeout: Duration,
    description: &str,
) -> AuditResult<()> {
    wait_until(
        || {
            let page = page.clone();
            let script = script.to_string();
            async move { evaluate::<bool>(&page, &script).await }
        },
        WaitConfig::with_timeout(timeout),
        description,
    )
    .await
}

/// The console's product listing page, driven through Chromium.
pub struct ChromeCatalogSurface<'a> {
    browser: &'a Browser,
    page: Page,
}

impl<'a> ChromeCatalogSurface<'a> {
    /// Wrap the listing page. `browser` is used to open product tabs.
    #[must_use]
    pub fn new(browser: &'a Browser, page: Page) -> Self {
        Self { browser, page }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    fn element_expr(locator: &Locator) -> String {
        match locator {
            Locator::FilterToggle { label } => js::filter_toggle(label),
            Locator::CopyControl { row } => js::copy_icon(*row),
        }
    }

    /// Clipboard access requires the listing tab to hold focus again after
    /// a product tab was closed.
    async fn focus(&self) {
        if let Err(e) = self.page.bring_to_front().await {
            trace!("bring_to_front failed: {e}");
        }
    }
}

#[async_trait]
impl<'a> CatalogSurface for ChromeCatalogSurface<'a> {
    type Context = ChromeProductContext;

    async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> AuditResult<()> {
        let script = js::is_visible(&Self::element_expr(locator));
        wait_for_script(&self.page, &script, timeout, &locator.to_string())
            .await
            .map_err(|_| AuditError::ElementNotFound {
                target: locator.to_string(),
                timeout,
            })
    }

    async fn class_names(&self, locator: &Locator) -> AuditResult<String> {
        let script = js::class_names(&Self::element_expr(locator));
        let classes: Option<String> = evaluate(&self.page, &script).await?;
        classes.ok_or_else(|| AuditError::ElementNotFound {
            target: locator.to_string(),
            timeout: Duration::ZERO,
        })
    }

    async fn activate(&self, locator: &Locator) -> AuditResult<()> {
        let script = js::synthetic_click(&Self::element_expr(locator));
        if evaluate::<bool>(&self.page, &script).await? {
            Ok(())
        } else {
            Err(AuditError::ElementNotFound {
                target: locator.to_string(),
                timeout: Duration::ZERO,
            })
        }
    }

    async fn observe_responses(&self) -> AuditResult<ResponseStream> {
        let events = self.page.event_listener::<EventResponseReceived>().await?;
        Ok(events
            .map(|event| {
                ObservedResponse::new(
                    event.response.url.clone(),
                    u16::try_from(event.response.status).unwrap_or(0),
                )
            })
            .boxed())
    }

    async fn count_copy_controls(&self) -> AuditResult<usize> {
        evaluate(&self.page, &js::count_copy_controls()).await
    }

    async fn first_row_cells(&self) -> AuditResult<Vec<String>> {
        evaluate(&self.page, &js::first_row_cells()).await
    }

    async fn row_cell_text(&self, row: usize, column: usize) -> AuditResult<Option<String>> {
        evaluate(&self.page, &js::row_cell_text(row, column)).await
    }

    async fn write_clipboard(&self, text: &str) -> AuditResult<()> {
        self.focus().await;
        evaluate::<bool>(&self.page, &js::write_clipboard(text))
            .await
            .map(|_| ())
            .map_err(|e| AuditError::ClipboardUnavailable(e.to_string()))
    }

    async fn read_clipboard(&self) -> AuditResult<String> {
        self.focus().await;
        let text: Option<String> = evaluate(&self.page, js::READ_CLIPBOARD)
            .await
            .map_err(|e| AuditError::ClipboardUnavailable(e.to_string()))?;
        Ok(text.unwrap_or_default())
    }

    async fn open_context(&self) -> AuditResult<ChromeProductContext> {
        let page = self.browser.new_page("about:blank").await?;
        debug!("Opened product tab");
        Ok(ChromeProductContext::new(page))
    }
}

/// A product tab. Closed explicitly via [`ProductContext::close`]; if that
/// never happens, `Drop` spawns the close so the tab does not leak.
pub struct ChromeProductContext {
    page: Option<Page>,
}

impl ChromeProductContext {
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page: Some(page) }
    }

    fn page(&self) -> AuditResult<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| AuditError::Other("product tab already closed".to_string()))
    }
}

/// The main frame's document response, whatever URL it ended up at.
///
/// Chromium reports the final URL of a navigation (percent-encoded, after
/// redirects), so the requested URL cannot be used to find it.
fn is_main_document(
    resource_type: &ResourceType,
    frame: Option<&FrameId>,
    main_frame: Option<&FrameId>,
) -> bool {
    if *resource_type != ResourceType::Document {
        return false;
    }
    match main_frame {
        Some(main) => frame == Some(main),
        None => true,
    }
}

#[async_trait]
impl ProductContext for ChromeProductContext {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> AuditResult<Option<u16>> {
        let page = self.page()?;

        // Subscribe before goto so the document response is buffered
        let mut responses = page.event_listener::<EventResponseReceived>().await?;

        with_timeout(
            async {
                page.goto(url)
                    .await
                    .map(|_| ())
                    .map_err(|e| AuditError::NavigationFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })
            },
            timeout,
            "product page navigation",
        )
        .await?;

        let main_frame = page.mainframe().await?;

        let status = tokio::time::timeout(STATUS_LOOKUP_WINDOW, async {
            while let Some(event) = responses.next().await {
                if is_main_document(&event.r#type, event.frame_id.as_ref(), main_frame.as_ref()) {
                    trace!("Document response for {url} arrived from {}", event.response.url);
                    return u16::try_from(event.response.status).ok();
                }
            }
            None
        })
        .await
        .ok()
        .flatten();

        trace!("Document status for {url}: {status:?}");
        Ok(status)
    }

    async fn wait_for_content_loaded(&self, timeout: Duration) -> AuditResult<()> {
        wait_for_script(self.page()?, js::READY_STATE_INTERACTIVE, timeout, "DOMContentLoaded").await
    }

    async fn body_text(&self) -> AuditResult<String> {
        evaluate(self.page()?, js::BODY_TEXT).await
    }

    async fn screenshot(&self, path: &Path) -> AuditResult<()> {
        let params = CaptureScreenshotParams {
            format: Some(CaptureScreenshotFormat::Png),
            capture_beyond_viewport: Some(true),
            ..Default::default()
        };

        let data = self.page()?.screenshot(params).await?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    async fn close(&mut self) -> AuditResult<()> {
        if let Some(page) = self.page.take() {
            page.close().await?;
            debug!("Closed product tab");
        }
        Ok(())
    }
}

impl Drop for ChromeProductContext {
    fn drop(&mut self) {
        if let Some(page) = self.page.take() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(async move {
                        if let Err(e) = page.close().await {
                            warn!("Failed to close product tab on drop: {e}");
                        }
                    });
                }
                Err(_) => warn!("Product tab dropped outside a runtime; left to browser shutdown"),
            }
        }
    }
}
