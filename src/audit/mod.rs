//! Listing audit pipeline
//!
//! For one brand: synchronise the filter, enumerate rows, then for each row
//! resolve its URL, classify the page and record the outcome. Rows run
//! strictly one after another; the clipboard and the product tab are shared
//! by the whole session.

pub mod filter_sync;
pub mod health;
pub mod reporter;
pub mod row_enumerator;
pub mod types;
pub mod url_resolver;

use tracing::info;

use crate::config::AuditConfig;
use crate::error::AuditResult;
use crate::surface::CatalogSurface;
use crate::utils::{UrlTemplate, settle};

pub use filter_sync::{FilterOutcome, ensure_filter_active, is_active_class_list};
pub use health::{HealthStatus, HealthVerdict, classify, classify_page, detect_broken_signature};
pub use reporter::{ReportSummary, ResultReporter, ValidationRecord, ValidationReport};
pub use row_enumerator::{RowSet, SlugColumn, SlugColumnDetector, enumerate_rows};
pub use types::{FilterState, ListingContext, RowHandle};
pub use url_resolver::{ResolvedUrl, UrlSource, fallback_url, resolve_url};

/// Runs the audit pipeline against one listing surface.
pub struct ListingAuditor<'a, S: CatalogSurface + ?Sized> {
    surface: &'a S,
    config: &'a AuditConfig,
    detector: SlugColumnDetector,
}

impl<'a, S: CatalogSurface + ?Sized> ListingAuditor<'a, S> {
    #[must_use]
    pub fn new(surface: &'a S, config: &'a AuditConfig) -> Self {
        Self {
            surface,
            config,
            detector: SlugColumnDetector::new(config.fallback_slug_column()),
        }
    }

    fn template(&self) -> &UrlTemplate {
        self.config.product_url_template()
    }

    /// Ensure the configured filter is active and record the new state.
    pub async fn ensure_filter_active(&self, context: &mut ListingContext) -> AuditResult<FilterOutcome> {
        match ensure_filter_active(self.surface, self.config.filter_label(), self.config).await {
            Ok(outcome) => {
                context.filter_state = FilterState::Active;
                Ok(outcome)
            }
            Err(e) => {
                context.filter_state = FilterState::Unknown;
                Err(e)
            }
        }
    }

    pub async fn enumerate_rows(&self, context: &ListingContext, limit: usize) -> AuditResult<RowSet> {
        enumerate_rows(self.surface, limit, &self.detector, &context.brand_slug).await
    }

    pub async fn resolve_url(&self, row: RowHandle, brand_slug: &str) -> ResolvedUrl {
        resolve_url(self.surface, row, brand_slug, self.template(), self.config).await
    }

    pub async fn classify(&self, row: RowHandle, brand_slug: &str, url: Option<&str>) -> HealthVerdict {
        let evidence = self.config.evidence_path(brand_slug, row.number());
        classify(self.surface, url, &evidence, self.config).await
    }

    /// Audit up to `limit` listed products.
    ///
    /// Brand-level failures (filter synchronisation, empty listing) are
    /// returned as errors. Row-level problems end up in the row's record;
    /// every enumerated row yields exactly one record, in row order.
    pub async fn validate_listed_products(
        &self,
        context: &mut ListingContext,
        limit: usize,
    ) -> AuditResult<ValidationReport> {
        self.ensure_filter_active(context).await?;

        let row_set = self.enumerate_rows(context, limit).await?;
        let mut reporter = ResultReporter::new(&context.brand_name, &context.brand_slug, limit);

        for row in &row_set.rows {
            info!("Checking product #{}", row.number());

            let resolved = self.resolve_url(*row, &context.brand_slug).await;
            let verdict = self
                .classify(*row, &context.brand_slug, resolved.url.as_deref())
                .await;
            reporter.record(ValidationRecord::new(row.index, resolved, verdict));

            settle(self.config.row_settle()).await;
        }

        let report = reporter.finalize();
        let summary = report.summary();
        info!(
            "{}: {} ok, {} broken, {} skipped",
            context.brand_slug, summary.ok, summary.broken, summary.skipped
        );
        Ok(report)
    }
}
