//! End-to-end runs of `validate_listed_products` against the in-memory surface

mod common;

use catalog_audit::{
    AuditError, FilterState, HealthStatus, ListingContext, UrlSource, validate_listed_products,
};
use common::{BRAND_NAME, BRAND_SLUG, MockRow, MockSurface, product_url, test_config};
use tempfile::TempDir;

fn listing(rows: usize) -> MockSurface {
    let mut surface = MockSurface::new().with_filter_active(true);
    for i in 0..rows {
        let slug = format!("ring-{i}");
        let url = product_url(&slug);
        surface = surface
            .with_row(MockRow::product(&format!("Ring {i}"), &slug).copies(url.clone()))
            .with_page(url, format!("Ring {i} - Frank & Co."));
    }
    surface
}

#[tokio::test]
async fn test_seven_rows_limit_five_yields_five_records_in_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = listing(7);
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

    let report = validate_listed_products(&surface, &mut context, 5, &config)
        .await
        .unwrap();

    assert_eq!(report.records().len(), 5);
    let indices: Vec<usize> = report.records().iter().map(|r| r.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(report.records()[2].url(), Some(product_url("ring-2").as_str()));
    assert_eq!(report.limit(), 5);
    assert_eq!(surface.contexts_opened(), 5);
    assert_eq!(surface.contexts_closed(), 5);
}

#[tokio::test]
async fn test_limit_above_row_count_checks_every_row() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = listing(3);
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

    let report = validate_listed_products(&surface, &mut context, 10, &config)
        .await
        .unwrap();

    assert_eq!(report.records().len(), 3);
    assert_eq!(report.summary().ok, 3);
}

#[tokio::test]
async fn test_mixed_row_outcomes_each_produce_one_record() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());

    let healthy = product_url("diamond-ring");
    let broken = product_url("gold-bangle");
    let surface = MockSurface::new()
        .with_filter_active(true)
        .with_row(MockRow::product("Diamond Ring", "diamond-ring").copies(healthy.clone()))
        .with_row(MockRow::product("Gold Bangle", "gold-bangle"))
        .with_row(MockRow::new(["", "Unnamed", "", ""]))
        .with_row(MockRow::product("Pearl Drop", "pearl-drop").copies("copied!"))
        .with_page(healthy.clone(), "Diamond Ring — Frank & Co.")
        .with_page(broken.clone(), "Oops — 404 page not found")
        .with_failing_page(product_url("pearl-drop"));
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

    let report = validate_listed_products(&surface, &mut context, 5, &config)
        .await
        .unwrap();
    let records = report.records();

    assert_eq!(records.len(), 4);

    assert_eq!(records[0].status(), HealthStatus::Ok);
    assert_eq!(records[0].source(), UrlSource::Clipboard);

    assert_eq!(records[1].status(), HealthStatus::Broken);
    assert_eq!(records[1].source(), UrlSource::TableFallback);
    assert_eq!(records[1].url(), Some(broken.as_str()));
    assert_eq!(
        records[1].evidence_path(),
        Some(config.evidence_path(BRAND_SLUG, 2).as_path())
    );

    assert_eq!(records[2].status(), HealthStatus::SkippedUnresolved);
    assert_eq!(records[2].source(), UrlSource::None);
    assert_eq!(records[2].url(), None);

    // Non-URL clipboard text falls back to the table; the page then fails to load
    assert_eq!(records[3].source(), UrlSource::TableFallback);
    assert_eq!(records[3].status(), HealthStatus::Broken);
    assert!(records[3].detail().is_some());

    // No tab for the unresolved row, and every opened tab was closed
    assert_eq!(surface.contexts_opened(), 3);
    assert_eq!(surface.contexts_closed(), 3);

    let summary = report.summary();
    assert_eq!((summary.ok, summary.broken, summary.skipped), (1, 2, 1));
}

#[tokio::test]
async fn test_inactive_filter_is_activated_before_enumeration() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = listing(2).with_filter_active(false);
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);
    assert_eq!(context.filter_state, FilterState::Unknown);

    let report = validate_listed_products(&surface, &mut context, 5, &config)
        .await
        .unwrap();

    assert_eq!(surface.filter_activations(), 1);
    assert_eq!(context.filter_state, FilterState::Active);
    assert_eq!(report.records().len(), 2);
}

#[tokio::test]
async fn test_empty_listing_is_a_brand_level_error() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = MockSurface::new().with_filter_active(true);
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

    let err = validate_listed_products(&surface, &mut context, 5, &config)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::EmptyListing { ref brand } if brand == BRAND_SLUG));
    assert!(err.is_brand_fatal());
    assert_eq!(surface.contexts_opened(), 0);
}

#[tokio::test]
async fn test_filter_timeout_aborts_before_any_row() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = listing(3).with_filter_active(false).without_filter_response();
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

    let err = validate_listed_products(&surface, &mut context, 5, &config)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::FilterSyncTimeout { .. }));
    assert_eq!(context.filter_state, FilterState::Unknown);
    assert_eq!(surface.contexts_opened(), 0);
    assert!(surface.visited().is_empty());
}

#[tokio::test]
async fn test_rows_are_visited_sequentially_in_row_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = listing(4);
    let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

    validate_listed_products(&surface, &mut context, 4, &config)
        .await
        .unwrap();

    let expected: Vec<String> = (0..4).map(|i| product_url(&format!("ring-{i}"))).collect();
    assert_eq!(surface.visited(), expected);
}
