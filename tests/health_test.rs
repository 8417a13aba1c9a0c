//! Page health classification through isolated product tabs

mod common;

use catalog_audit::audit::classify;
use catalog_audit::HealthStatus;
use common::{BRAND_SLUG, MockSurface, product_url, test_config};
use tempfile::TempDir;

#[tokio::test]
async fn test_broken_text_captures_evidence() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let url = product_url("gone");
    let surface = MockSurface::new().with_page(url.clone(), "Oops — 404 page not found");
    let evidence = config.evidence_path(BRAND_SLUG, 1);

    let verdict = classify(&surface, Some(url.as_str()), &evidence, &config).await;

    assert_eq!(verdict.status, HealthStatus::Broken);
    assert_eq!(verdict.matched_signature.as_deref(), Some("404"));
    assert_eq!(verdict.evidence_path.as_deref(), Some(evidence.as_path()));
    assert!(evidence.exists());
    assert_eq!(surface.contexts_closed(), 1);
}

#[tokio::test]
async fn test_healthy_text_takes_no_screenshot() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let url = product_url("diamond-ring");
    let surface = MockSurface::new().with_page(url.clone(), "Diamond Ring — Frank & Co.");
    let evidence = config.evidence_path(BRAND_SLUG, 1);

    let verdict = classify(&surface, Some(url.as_str()), &evidence, &config).await;

    assert_eq!(verdict.status, HealthStatus::Ok);
    assert_eq!(verdict.evidence_path, None);
    assert!(surface.screenshots().is_empty());
    assert!(!evidence.exists());
    assert_eq!(surface.contexts_opened(), 1);
    assert_eq!(surface.contexts_closed(), 1);
}

#[tokio::test]
async fn test_failed_screenshot_keeps_broken_verdict() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let url = product_url("gone");
    let surface = MockSurface::new()
        .with_screenshots_failing()
        .with_page(url.clone(), "Something went wrong");
    let evidence = config.evidence_path(BRAND_SLUG, 3);

    let verdict = classify(&surface, Some(url.as_str()), &evidence, &config).await;

    assert_eq!(verdict.status, HealthStatus::Broken);
    assert_eq!(verdict.matched_signature.as_deref(), Some("something went wrong"));
    assert_eq!(verdict.evidence_path, None);
    assert!(!evidence.exists());
    assert!(surface.screenshots().is_empty());
    assert_eq!(surface.contexts_closed(), 1);
}

#[tokio::test]
async fn test_unresolved_url_opens_no_context() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let surface = MockSurface::new();

    let verdict = classify(&surface, None, &config.evidence_path(BRAND_SLUG, 1), &config).await;

    assert_eq!(verdict.status, HealthStatus::SkippedUnresolved);
    assert_eq!(surface.contexts_opened(), 0);
}

#[tokio::test]
async fn test_load_failure_is_broken_and_tab_is_closed() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let url = product_url("slow");
    let surface = MockSurface::new().with_failing_page(url.clone());

    let verdict = classify(&surface, Some(url.as_str()), &config.evidence_path(BRAND_SLUG, 4), &config).await;

    assert_eq!(verdict.status, HealthStatus::Broken);
    assert!(verdict.detail.unwrap().contains("timed out"));
    assert_eq!(surface.contexts_opened(), 1);
    assert_eq!(surface.contexts_closed(), 1);
}

#[tokio::test]
async fn test_http_status_only_counts_with_status_check() {
    let dir = TempDir::new().unwrap();
    let url = product_url("server-error");
    let surface = MockSurface::new().with_page_status(url.clone(), "Diamond Ring", 502);

    let heuristic = test_config(dir.path());
    let verdict = classify(&surface, Some(url.as_str()), &heuristic.evidence_path(BRAND_SLUG, 1), &heuristic).await;
    assert_eq!(verdict.status, HealthStatus::Ok);
    assert_eq!(verdict.http_status, Some(502));

    let strict = heuristic
        .clone()
        .into_builder()
        .console_url(heuristic.console_url())
        .report_dir(dir.path())
        .status_check(true)
        .build()
        .unwrap();
    let verdict = classify(&surface, Some(url.as_str()), &strict.evidence_path(BRAND_SLUG, 1), &strict).await;
    assert_eq!(verdict.status, HealthStatus::Broken);
    assert_eq!(verdict.detail.as_deref(), Some("HTTP error: 502"));
}
