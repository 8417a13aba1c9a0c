//! Shared types for a single brand's audit

use serde::{Deserialize, Serialize};

/// Filter state as last observed on the listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FilterState {
    Active,
    Inactive,
    #[default]
    Unknown,
}

/// The filtered, brand-scoped product listing.
///
/// Created by the console collaborator; the audit only updates `filter_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingContext {
    pub brand_name: String,
    pub brand_slug: String,
    pub filter_state: FilterState,
}

impl ListingContext {
    #[must_use]
    pub fn new(brand_name: impl Into<String>, brand_slug: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            brand_slug: brand_slug.into(),
            filter_state: FilterState::Unknown,
        }
    }
}

/// One actionable row of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHandle {
    /// 0-based position among the copy controls, in document order
    pub index: usize,
    /// Column holding the slug, shared by every row of the listing
    pub slug_column_index: usize,
}

impl RowHandle {
    /// 1-based row number used in reports and evidence file names
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}
