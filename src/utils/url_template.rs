//! Product URL template
//!
//! The table fallback needs to rebuild the public URL a human operator would
//! have copied. The shape of that URL is configuration, not code.

use serde::{Deserialize, Serialize};
use url::Url;

use super::constants::DEFAULT_PRODUCT_URL_TEMPLATE;
use crate::error::{AuditError, AuditResult};

const BRAND_PLACEHOLDER: &str = "{brand}";
const SLUG_PLACEHOLDER: &str = "{slug}";

/// A public product URL pattern with `{brand}` and `{slug}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Parse a template, requiring a `{slug}` placeholder.
    pub fn parse(template: impl Into<String>) -> AuditResult<Self> {
        let template = template.into();
        if !template.contains(SLUG_PLACEHOLDER) {
            return Err(AuditError::Config(format!(
                "product URL template '{template}' has no {SLUG_PLACEHOLDER} placeholder"
            )));
        }

        // Render with dummy values to make sure the result is an absolute URL
        let sample = template
            .replace(BRAND_PLACEHOLDER, "brand")
            .replace(SLUG_PLACEHOLDER, "slug");
        if !is_http_url(&sample) {
            return Err(AuditError::Config(format!(
                "product URL template '{template}' does not render to an http(s) URL"
            )));
        }

        Ok(Self(template))
    }

    /// Substitute brand and slug.
    #[must_use]
    pub fn render(&self, brand_slug: &str, slug: &str) -> String {
        self.0
            .replace(BRAND_PLACEHOLDER, brand_slug)
            .replace(SLUG_PLACEHOLDER, slug)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self(DEFAULT_PRODUCT_URL_TEMPLATE.to_string())
    }
}

impl TryFrom<String> for UrlTemplate {
    type Error = AuditError;

    fn try_from(value: String) -> AuditResult<Self> {
        Self::parse(value)
    }
}

impl From<UrlTemplate> for String {
    fn from(template: UrlTemplate) -> Self {
        template.0
    }
}

/// Whether `text` parses as an absolute http or https URL with a host.
#[must_use]
pub fn is_http_url(text: &str) -> bool {
    Url::parse(text)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}
