//! Row enumeration and slug column detection

use tracing::{debug, info};

use super::types::RowHandle;
use crate::error::{AuditError, AuditResult};
use crate::surface::CatalogSurface;
use crate::utils::is_slug_shaped;

/// Which column holds the slug, and whether it was sniffed or defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugColumn {
    pub index: usize,
    pub detected: bool,
}

/// Picks the slug column from the first data row.
///
/// The first cell whose trimmed text is slug-shaped (lowercase
/// alphanumerics and hyphens) wins; otherwise `fallback_column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugColumnDetector {
    fallback_column: usize,
}

impl SlugColumnDetector {
    #[must_use]
    pub fn new(fallback_column: usize) -> Self {
        Self { fallback_column }
    }

    #[must_use]
    pub fn fallback_column(&self) -> usize {
        self.fallback_column
    }

    #[must_use]
    pub fn detect(&self, first_row: &[String]) -> SlugColumn {
        first_row
            .iter()
            .position(|cell| is_slug_shaped(cell.trim()))
            .map_or(
                SlugColumn {
                    index: self.fallback_column,
                    detected: false,
                },
                |index| SlugColumn {
                    index,
                    detected: true,
                },
            )
    }
}

/// Enumerated rows plus the column shared by all of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSet {
    pub rows: Vec<RowHandle>,
    pub slug_column: SlugColumn,
    /// Actionable rows present before applying the limit
    pub total: usize,
}

/// List up to `limit` actionable rows in document order.
///
/// Column detection runs exactly once here; every returned handle carries
/// the same `slug_column_index`.
///
/// # Errors
/// `EmptyListing` when the page has no copy controls.
pub async fn enumerate_rows<S>(
    surface: &S,
    limit: usize,
    detector: &SlugColumnDetector,
    brand: &str,
) -> AuditResult<RowSet>
where
    S: CatalogSurface + ?Sized,
{
    let total = surface.count_copy_controls().await?;
    if total == 0 {
        return Err(AuditError::EmptyListing {
            brand: brand.to_string(),
        });
    }

    let first_row = surface.first_row_cells().await?;
    let slug_column = detector.detect(&first_row);
    debug!(
        "Slug column {} ({}) from first row {:?}",
        slug_column.index,
        if slug_column.detected { "detected" } else { "fallback" },
        first_row
    );

    let rows: Vec<RowHandle> = (0..total.min(limit))
        .map(|index| RowHandle {
            index,
            slug_column_index: slug_column.index,
        })
        .collect();

    info!("Found {total} actionable rows for {brand}, checking {}", rows.len());

    Ok(RowSet {
        rows,
        slug_column,
        total,
    })
}
