//! Core configuration type for catalog audits

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{
    DEFAULT_FALLBACK_SLUG_COLUMN, DEFAULT_FILTER_ACTIVE_CLASSES, DEFAULT_FILTER_LABEL,
    DEFAULT_FILTER_RESPONSE_FRAGMENT, DEFAULT_LIMIT, UrlTemplate,
};

/// Main configuration struct for an audit run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Base URL of the admin console, e.g. `https://staging-dms.intra.cmk.co.id`.
    ///
    /// **INVARIANT:** absolute http(s) URL (checked in `validate`).
    pub(crate) console_url: String,

    /// Directory receiving text/JSON reports and evidence screenshots.
    pub(crate) report_dir: PathBuf,

    /// Maximum number of listed products checked per brand
    pub(crate) limit: usize,

    /// Label of the listing filter that must be active before enumeration
    pub(crate) filter_label: String,

    /// Class names that mark the filter toggle as active; any one suffices
    pub(crate) filter_active_classes: Vec<String>,

    /// Substring of the listing refresh request URL awaited after a toggle
    pub(crate) filter_response_fragment: String,

    /// Public URL pattern used by the table fallback
    pub(crate) product_url_template: UrlTemplate,

    /// 0-based column read when no first-row cell looks like a slug
    pub(crate) fallback_slug_column: usize,

    /// Wait for a control to become visible
    ///
    /// Default: 10 seconds
    pub(crate) visibility_timeout_secs: u64,

    /// Wait for the listing refresh response after toggling the filter
    ///
    /// Default: 10 seconds
    pub(crate) filter_response_timeout_secs: u64,

    /// Wait for a row's copy control to be visible
    ///
    /// Default: 8 seconds
    pub(crate) copy_control_timeout_secs: u64,

    /// Wait for `navigator.clipboard.readText()` to settle.
    /// Headless Chromium can leave the promise pending forever.
    ///
    /// Default: 5 seconds
    pub(crate) clipboard_timeout_secs: u64,

    /// Timeout for product page navigation
    ///
    /// Default: 30 seconds
    pub(crate) page_load_timeout_secs: u64,

    /// Wait for the product page to reach `DOMContentLoaded`
    ///
    /// Default: 15 seconds
    pub(crate) content_ready_timeout_secs: u64,

    /// Wait for the listing table and its copy controls after navigation
    ///
    /// Default: 20 seconds
    pub(crate) listing_ready_timeout_secs: u64,

    /// Delay between triggering the copy action and reading the clipboard
    pub(crate) copy_settle_ms: u64,

    /// Delay after the filter refresh response so the table can re-render
    pub(crate) filter_settle_ms: u64,

    /// Delay after `DOMContentLoaded` for client-rendered content
    pub(crate) page_settle_ms: u64,

    /// Delay between consecutive rows
    pub(crate) row_settle_ms: u64,

    /// Delay after console navigation steps (login, brand switch)
    pub(crate) navigation_settle_ms: u64,

    pub(crate) headless: bool,

    /// Also treat HTTP status >= 400 on the product document as broken.
    ///
    /// Off by default: classification is purely text-signature based.
    pub(crate) status_check: bool,

    /// Chrome user data directory for profile isolation.
    /// When unset a per-process temp directory is used.
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            console_url: String::new(),
            report_dir: PathBuf::from("./reports"),
            limit: DEFAULT_LIMIT,
            filter_label: DEFAULT_FILTER_LABEL.to_string(),
            filter_active_classes: DEFAULT_FILTER_ACTIVE_CLASSES
                .iter()
                .map(|class| (*class).to_string())
                .collect(),
            filter_response_fragment: DEFAULT_FILTER_RESPONSE_FRAGMENT.to_string(),
            product_url_template: UrlTemplate::default(),
            fallback_slug_column: DEFAULT_FALLBACK_SLUG_COLUMN,
            visibility_timeout_secs: 10,
            filter_response_timeout_secs: 10,
            copy_control_timeout_secs: 8,
            clipboard_timeout_secs: 5,
            page_load_timeout_secs: 30,
            content_ready_timeout_secs: 15,
            listing_ready_timeout_secs: 20,
            copy_settle_ms: 400,
            filter_settle_ms: 1500,
            page_settle_ms: 1000,
            row_settle_ms: 300,
            navigation_settle_ms: 2000,
            headless: true,
            status_check: false,
            chrome_data_dir: None,
        }
    }
}
