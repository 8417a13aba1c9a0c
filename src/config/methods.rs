//! Validation, loading and derived values for `AuditConfig`

use std::path::{Path, PathBuf};

use url::Url;

use super::types::AuditConfig;
use crate::error::{AuditError, AuditResult};
use crate::utils::is_http_url;

impl AuditConfig {
    /// Check cross-field invariants.
    ///
    /// The product URL template validates itself on construction; this covers
    /// the remaining fields.
    pub fn validate(&self) -> AuditResult<()> {
        if !is_http_url(&self.console_url) {
            return Err(AuditError::Config(format!(
                "console_url '{}' is not an absolute http(s) URL",
                self.console_url
            )));
        }
        if self.filter_label.trim().is_empty() {
            return Err(AuditError::Config("filter_label must not be empty".to_string()));
        }
        if self.filter_active_classes.iter().all(|c| c.trim().is_empty()) {
            return Err(AuditError::Config(
                "filter_active_classes needs at least one class name".to_string(),
            ));
        }
        if self.filter_response_fragment.is_empty() {
            return Err(AuditError::Config(
                "filter_response_fragment must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a JSON configuration file. Missing fields take their defaults.
    pub async fn from_json_file(path: impl AsRef<Path>) -> AuditResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AuditError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: AuditConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// URL of the console login screen.
    pub fn login_url(&self) -> AuditResult<String> {
        let base = Url::parse(&self.console_url)
            .map_err(|e| AuditError::Config(format!("invalid console_url: {e}")))?;
        let login = base
            .join("/login")
            .map_err(|e| AuditError::Config(format!("cannot derive login URL: {e}")))?;
        Ok(login.into())
    }

    /// Origin of the console (scheme, host and port), for permission grants.
    pub fn console_origin(&self) -> AuditResult<String> {
        let base = Url::parse(&self.console_url)
            .map_err(|e| AuditError::Config(format!("invalid console_url: {e}")))?;
        Ok(base.origin().ascii_serialization())
    }

    /// Where the screenshot for a broken row is written.
    ///
    /// `row_number` is 1-based, matching the numbering in text reports.
    #[must_use]
    pub fn evidence_path(&self, brand_slug: &str, row_number: usize) -> PathBuf {
        let brand = sanitize_filename::sanitize(brand_slug);
        self.report_dir
            .join(format!("error-{brand}-{row_number}.png"))
    }
}
