//! Getter methods for `AuditConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::AuditConfig;
use crate::utils::UrlTemplate;

impl AuditConfig {
    #[must_use]
    pub fn console_url(&self) -> &str {
        &self.console_url
    }

    #[must_use]
    pub fn report_dir(&self) -> &PathBuf {
        &self.report_dir
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn filter_label(&self) -> &str {
        &self.filter_label
    }

    #[must_use]
    pub fn filter_active_classes(&self) -> &[String] {
        &self.filter_active_classes
    }

    #[must_use]
    pub fn filter_response_fragment(&self) -> &str {
        &self.filter_response_fragment
    }

    #[must_use]
    pub fn product_url_template(&self) -> &UrlTemplate {
        &self.product_url_template
    }

    #[must_use]
    pub fn fallback_slug_column(&self) -> usize {
        self.fallback_slug_column
    }

    #[must_use]
    pub fn visibility_timeout(&self) -> Duration {
        Duration::from_secs(self.visibility_timeout_secs)
    }

    #[must_use]
    pub fn filter_response_timeout(&self) -> Duration {
        Duration::from_secs(self.filter_response_timeout_secs)
    }

    #[must_use]
    pub fn copy_control_timeout(&self) -> Duration {
        Duration::from_secs(self.copy_control_timeout_secs)
    }

    #[must_use]
    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_secs(self.clipboard_timeout_secs)
    }

    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    #[must_use]
    pub fn content_ready_timeout(&self) -> Duration {
        Duration::from_secs(self.content_ready_timeout_secs)
    }

    #[must_use]
    pub fn listing_ready_timeout(&self) -> Duration {
        Duration::from_secs(self.listing_ready_timeout_secs)
    }

    #[must_use]
    pub fn copy_settle(&self) -> Duration {
        Duration::from_millis(self.copy_settle_ms)
    }

    #[must_use]
    pub fn filter_settle(&self) -> Duration {
        Duration::from_millis(self.filter_settle_ms)
    }

    #[must_use]
    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }

    #[must_use]
    pub fn row_settle(&self) -> Duration {
        Duration::from_millis(self.row_settle_ms)
    }

    #[must_use]
    pub fn navigation_settle(&self) -> Duration {
        Duration::from_millis(self.navigation_settle_ms)
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn status_check(&self) -> bool {
        self.status_check
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&Path> {
        self.chrome_data_dir.as_deref()
    }
}
