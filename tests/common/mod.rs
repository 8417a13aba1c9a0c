//! Scriptable in-memory listing surface for the catalog_audit test suite

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use catalog_audit::surface::ResponseStream;
use catalog_audit::{
    AuditConfig, AuditError, AuditResult, CatalogSurface, Locator, ObservedResponse,
    ProductContext,
};
use futures::StreamExt;
use futures::channel::mpsc::{UnboundedSender, unbounded};

#[allow(dead_code)]
pub const BRAND_NAME: &str = "Frank & Co.";
#[allow(dead_code)]
pub const BRAND_SLUG: &str = "frankandcojewellery";

/// Config pointed at `report_dir` with every settle delay disabled.
#[allow(dead_code)]
pub fn test_config(report_dir: &Path) -> AuditConfig {
    AuditConfig::builder()
        .console_url("https://staging-dms.intra.cmk.co.id")
        .report_dir(report_dir)
        .without_settle_delays()
        .filter_response_timeout_secs(1)
        .build()
        .expect("test config is valid")
}

#[allow(dead_code)]
pub fn product_url(slug: &str) -> String {
    format!("https://staging.intra.{BRAND_SLUG}.com/selections/{slug}")
}

/// One listing row: its table cells and what its copy control puts on
/// the clipboard.
#[derive(Debug, Clone, Default)]
pub struct MockRow {
    pub cells: Vec<String>,
    pub copies: Option<String>,
}

impl MockRow {
    #[allow(dead_code)]
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            copies: None,
        }
    }

    /// Row in the usual console shape: image, name, slug, price.
    #[allow(dead_code)]
    pub fn product(name: &str, slug: &str) -> Self {
        Self::new(["", name, slug, "Rp 1.500.000"])
    }

    #[allow(dead_code)]
    pub fn copies(mut self, text: impl Into<String>) -> Self {
        self.copies = Some(text.into());
        self
    }
}

#[derive(Debug, Clone)]
pub enum MockPage {
    Loads { text: String, status: Option<u16> },
    FailsToLoad,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub filter_active: bool,
    pub filter_activations: usize,
    pub copy_activations: usize,
    pub clipboard: String,
    pub clipboard_reads: usize,
    pub contexts_opened: usize,
    pub contexts_closed: usize,
    pub visited: Vec<String>,
    pub screenshots: Vec<PathBuf>,
    response_senders: Vec<UnboundedSender<ObservedResponse>>,
}

/// In-memory `CatalogSurface`.
pub struct MockSurface {
    rows: Vec<MockRow>,
    pages: Arc<HashMap<String, MockPage>>,
    filter_present: bool,
    filter_responds: bool,
    clipboard_works: bool,
    screenshots_work: bool,
    state: Arc<Mutex<MockState>>,
}

impl Default for MockSurface {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            pages: Arc::new(HashMap::new()),
            filter_present: true,
            filter_responds: true,
            clipboard_works: true,
            screenshots_work: true,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }
}

#[allow(dead_code)]
impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, row: MockRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = MockRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert_page(url.into(), MockPage::Loads { text: text.into(), status: Some(200) })
    }

    pub fn with_page_status(self, url: impl Into<String>, text: impl Into<String>, status: u16) -> Self {
        self.insert_page(url.into(), MockPage::Loads { text: text.into(), status: Some(status) })
    }

    pub fn with_failing_page(self, url: impl Into<String>) -> Self {
        self.insert_page(url.into(), MockPage::FailsToLoad)
    }

    fn insert_page(mut self, url: String, page: MockPage) -> Self {
        Arc::make_mut(&mut self.pages).insert(url, page);
        self
    }

    pub fn with_filter_active(self, active: bool) -> Self {
        self.lock().filter_active = active;
        self
    }

    pub fn without_filter_toggle(mut self) -> Self {
        self.filter_present = false;
        self
    }

    /// Toggling the filter never produces a successful refresh response.
    pub fn without_filter_response(mut self) -> Self {
        self.filter_responds = false;
        self
    }

    /// Clipboard reads and writes fail, as in a locked-down headless session.
    pub fn with_clipboard_blocked(mut self) -> Self {
        self.clipboard_works = false;
        self
    }

    /// Page captures fail, e.g. because the renderer crashed.
    pub fn with_screenshots_failing(mut self) -> Self {
        self.screenshots_work = false;
        self
    }

    pub fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    pub fn filter_activations(&self) -> usize {
        self.lock().filter_activations
    }

    pub fn contexts_opened(&self) -> usize {
        self.lock().contexts_opened
    }

    pub fn contexts_closed(&self) -> usize {
        self.lock().contexts_closed
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.lock().screenshots.clone()
    }

    pub fn visited(&self) -> Vec<String> {
        self.lock().visited.clone()
    }

    fn emit(&self, responses: &[ObservedResponse]) {
        let mut state = self.lock();
        state.response_senders.retain(|sender| {
            responses
                .iter()
                .all(|response| sender.unbounded_send(response.clone()).is_ok())
        });
    }

    fn row(&self, row: usize) -> AuditResult<&MockRow> {
        self.rows.get(row).ok_or_else(|| AuditError::ElementNotFound {
            target: format!("copy control #{}", row + 1),
            timeout: Duration::ZERO,
        })
    }
}

#[async_trait]
impl CatalogSurface for MockSurface {
    type Context = MockContext;

    async fn wait_for_visible(&self, locator: &Locator, timeout: Duration) -> AuditResult<()> {
        let visible = match locator {
            Locator::FilterToggle { .. } => self.filter_present,
            Locator::CopyControl { row } => *row < self.rows.len(),
        };
        if visible {
            Ok(())
        } else {
            Err(AuditError::ElementNotFound {
                target: locator.to_string(),
                timeout,
            })
        }
    }

    async fn class_names(&self, locator: &Locator) -> AuditResult<String> {
        match locator {
            Locator::FilterToggle { .. } if self.lock().filter_active => {
                Ok("p-1 px-2 rounded-lg cursor-pointer bg-primary text-white".to_string())
            }
            Locator::FilterToggle { .. } => Ok("p-1 px-2 rounded-lg cursor-pointer".to_string()),
            Locator::CopyControl { .. } => Ok(String::new()),
        }
    }

    async fn activate(&self, locator: &Locator) -> AuditResult<()> {
        match locator {
            Locator::FilterToggle { .. } => {
                {
                    let mut state = self.lock();
                    state.filter_activations += 1;
                    state.filter_active = !state.filter_active;
                }
                let status = if self.filter_responds { 200 } else { 500 };
                self.emit(&[
                    ObservedResponse::new("https://staging-dms.intra.cmk.co.id/static/app.js", 200),
                    ObservedResponse::new(
                        "https://api.staging-dms.intra.cmk.co.id/v1/product-selection?status=published",
                        status,
                    ),
                ]);
            }
            Locator::CopyControl { row } => {
                let copies = self.row(*row)?.copies.clone();
                let mut state = self.lock();
                state.copy_activations += 1;
                if let Some(text) = copies
                    && self.clipboard_works
                {
                    state.clipboard = text;
                }
            }
        }
        Ok(())
    }

    async fn observe_responses(&self) -> AuditResult<ResponseStream> {
        let (sender, receiver) = unbounded();
        self.lock().response_senders.push(sender);
        Ok(receiver.boxed())
    }

    async fn count_copy_controls(&self) -> AuditResult<usize> {
        Ok(self.rows.len())
    }

    async fn first_row_cells(&self) -> AuditResult<Vec<String>> {
        Ok(self
            .rows
            .first()
            .map(|row| row.cells.iter().map(|c| c.trim().to_string()).collect())
            .unwrap_or_default())
    }

    async fn row_cell_text(&self, row: usize, column: usize) -> AuditResult<Option<String>> {
        Ok(self.row(row)?.cells.get(column).cloned())
    }

    async fn write_clipboard(&self, text: &str) -> AuditResult<()> {
        if !self.clipboard_works {
            return Err(AuditError::ClipboardUnavailable("write denied".to_string()));
        }
        self.lock().clipboard = text.to_string();
        Ok(())
    }

    async fn read_clipboard(&self) -> AuditResult<String> {
        let mut state = self.lock();
        state.clipboard_reads += 1;
        if !self.clipboard_works {
            return Err(AuditError::ClipboardUnavailable("read denied".to_string()));
        }
        Ok(state.clipboard.clone())
    }

    async fn open_context(&self) -> AuditResult<MockContext> {
        self.lock().contexts_opened += 1;
        Ok(MockContext {
            pages: Arc::clone(&self.pages),
            state: Arc::clone(&self.state),
            current: None,
            closed: false,
            screenshots_work: self.screenshots_work,
        })
    }
}

/// In-memory product tab.
pub struct MockContext {
    pages: Arc<HashMap<String, MockPage>>,
    state: Arc<Mutex<MockState>>,
    current: Option<String>,
    closed: bool,
    screenshots_work: bool,
}

impl MockContext {
    fn current_text(&self) -> AuditResult<String> {
        let url = self
            .current
            .as_ref()
            .ok_or_else(|| AuditError::Other("no page loaded".to_string()))?;
        match self.pages.get(url) {
            Some(MockPage::Loads { text, .. }) => Ok(text.clone()),
            _ => Err(AuditError::Other(format!("{url} has no content"))),
        }
    }
}

#[async_trait]
impl ProductContext for MockContext {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> AuditResult<Option<u16>> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .visited
            .push(url.to_string());

        match self.pages.get(url) {
            Some(MockPage::Loads { status, .. }) => {
                self.current = Some(url.to_string());
                Ok(*status)
            }
            Some(MockPage::FailsToLoad) => Err(AuditError::Timeout {
                operation: "product page navigation".to_string(),
                timeout,
            }),
            None => Err(AuditError::NavigationFailed {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            }),
        }
    }

    async fn wait_for_content_loaded(&self, _timeout: Duration) -> AuditResult<()> {
        Ok(())
    }

    async fn body_text(&self) -> AuditResult<String> {
        self.current_text()
    }

    async fn screenshot(&self, path: &Path) -> AuditResult<()> {
        if !self.screenshots_work {
            return Err(AuditError::ScriptExecution("Page.captureScreenshot failed".to_string()));
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, b"\x89PNG\r\n\x1a\n").await?;
        self.state
            .lock()
            .expect("mock state poisoned")
            .screenshots
            .push(path.to_path_buf());
        Ok(())
    }

    async fn close(&mut self) -> AuditResult<()> {
        if !self.closed {
            self.closed = true;
            self.state.lock().expect("mock state poisoned").contexts_closed += 1;
        }
        Ok(())
    }
}
