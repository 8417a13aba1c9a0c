//! Type-safe builder for `AuditConfig` using the typestate pattern
//!
//! `build()` only exists once both the console URL and the report
//! directory have been supplied.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::AuditConfig;
use crate::error::AuditResult;
use crate::utils::UrlTemplate;

// Type states for the builder
pub struct WithConsoleUrl;
pub struct Complete;

pub struct AuditConfigBuilder<State = ()> {
    draft: AuditConfig,
    product_url_template: Option<String>,
    _phantom: PhantomData<State>,
}

impl Default for AuditConfigBuilder<()> {
    fn default() -> Self {
        Self {
            draft: AuditConfig::default(),
            product_url_template: None,
            _phantom: PhantomData,
        }
    }
}

impl AuditConfig {
    /// Create a builder for configuring an `AuditConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> AuditConfigBuilder<()> {
        AuditConfigBuilder::default()
    }

    /// Reopen an existing configuration (e.g. loaded from JSON) for overrides.
    ///
    /// Console URL and report directory must be supplied again, so the
    /// result goes through the same validation as a fresh build.
    #[must_use]
    pub fn into_builder(self) -> AuditConfigBuilder<()> {
        AuditConfigBuilder {
            draft: self,
            product_url_template: None,
            _phantom: PhantomData,
        }
    }
}

impl<State> AuditConfigBuilder<State> {
    fn transition<Next>(self) -> AuditConfigBuilder<Next> {
        AuditConfigBuilder {
            draft: self.draft,
            product_url_template: self.product_url_template,
            _phantom: PhantomData,
        }
    }
}

impl AuditConfigBuilder<()> {
    pub fn console_url(mut self, url: impl Into<String>) -> AuditConfigBuilder<WithConsoleUrl> {
        let url = url.into();

        // Normalize URL: add https:// if no scheme is present
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("https://{url}")
        };
        self.draft.console_url = url.trim_end_matches('/').to_string();
        self.transition()
    }
}

impl AuditConfigBuilder<WithConsoleUrl> {
    pub fn report_dir(mut self, dir: impl Into<PathBuf>) -> AuditConfigBuilder<Complete> {
        self.draft.report_dir = dir.into();
        self.transition()
    }
}

impl AuditConfigBuilder<Complete> {
    /// Validate and produce the configuration.
    pub fn build(mut self) -> AuditResult<AuditConfig> {
        if let Some(template) = self.product_url_template.take() {
            self.draft.product_url_template = UrlTemplate::parse(template)?;
        }
        self.draft.validate()?;
        Ok(self.draft)
    }
}

// Optional settings, available in any state
impl<State> AuditConfigBuilder<State> {
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.draft.limit = limit;
        self
    }

    #[must_use]
    pub fn filter_label(mut self, label: impl Into<String>) -> Self {
        self.draft.filter_label = label.into();
        self
    }

    #[must_use]
    pub fn filter_active_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft.filter_active_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn filter_response_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.draft.filter_response_fragment = fragment.into();
        self
    }

    /// Public product URL pattern; validated in `build()`.
    #[must_use]
    pub fn product_url_template(mut self, template: impl Into<String>) -> Self {
        self.product_url_template = Some(template.into());
        self
    }

    #[must_use]
    pub fn fallback_slug_column(mut self, column: usize) -> Self {
        self.draft.fallback_slug_column = column;
        self
    }

    #[must_use]
    pub fn visibility_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.visibility_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn filter_response_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.filter_response_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn copy_control_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.copy_control_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn clipboard_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.clipboard_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn content_ready_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.content_ready_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn listing_ready_timeout_secs(mut self, secs: u64) -> Self {
        self.draft.listing_ready_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn copy_settle_ms(mut self, ms: u64) -> Self {
        self.draft.copy_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn filter_settle_ms(mut self, ms: u64) -> Self {
        self.draft.filter_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn page_settle_ms(mut self, ms: u64) -> Self {
        self.draft.page_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn row_settle_ms(mut self, ms: u64) -> Self {
        self.draft.row_settle_ms = ms;
        self
    }

    #[must_use]
    pub fn navigation_settle_ms(mut self, ms: u64) -> Self {
        self.draft.navigation_settle_ms = ms;
        self
    }

    /// Disable every settle delay. Intended for scripted surfaces in tests.
    #[must_use]
    pub fn without_settle_delays(self) -> Self {
        self.copy_settle_ms(0)
            .filter_settle_ms(0)
            .page_settle_ms(0)
            .row_settle_ms(0)
            .navigation_settle_ms(0)
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.draft.headless = headless;
        self
    }

    #[must_use]
    pub fn status_check(mut self, enabled: bool) -> Self {
        self.draft.status_check = enabled;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.draft.chrome_data_dir = Some(dir.into());
        self
    }
}
