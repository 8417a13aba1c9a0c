pub mod audit;
pub mod browser_setup;
pub mod config;
pub mod console;
pub mod error;
pub mod report_saver;
pub mod surface;
pub mod utils;

pub use audit::{
    FilterState, HealthStatus, HealthVerdict, ListingAuditor, ListingContext, ReportSummary,
    ResolvedUrl, ResultReporter, RowHandle, SlugColumnDetector, UrlSource, ValidationRecord,
    ValidationReport,
};
pub use browser_setup::{
    AuditBrowser, download_managed_browser, find_browser_executable, grant_clipboard_access,
    launch_browser,
};
pub use config::AuditConfig;
pub use console::{BrandTarget, ConsoleSession, load_brands};
pub use error::{AuditError, AuditResult};
pub use report_saver::{SavedReport, save_report};
pub use surface::{
    CatalogSurface, ChromeCatalogSurface, ChromeProductContext, Locator, ObservedResponse,
    ProductContext,
};

/// Audit up to `limit` products of the listing behind `surface`.
///
/// Ensures the configured filter is active first, then resolves, classifies
/// and records each row in order. `context.filter_state` reflects the
/// filter after the call.
pub async fn validate_listed_products<S>(
    surface: &S,
    context: &mut ListingContext,
    limit: usize,
    config: &AuditConfig,
) -> AuditResult<ValidationReport>
where
    S: CatalogSurface + ?Sized,
{
    ListingAuditor::new(surface, config)
        .validate_listed_products(context, limit)
        .await
}
