//! Property tests for record counts and signature classification

mod common;

use catalog_audit::audit::{classify_page, detect_broken_signature};
use catalog_audit::utils::BROKEN_PAGE_SIGNATURES;
use catalog_audit::{HealthStatus, ListingContext, validate_listed_products};
use common::{BRAND_NAME, BRAND_SLUG, MockRow, MockSurface, product_url, test_config};
use proptest::prelude::*;
use tempfile::TempDir;

fn run_listing(rows: usize, limit: usize) -> Vec<usize> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    runtime.block_on(async {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let mut surface = MockSurface::new().with_filter_active(true);
        for i in 0..rows {
            let slug = format!("item-{i}");
            // Alternate clipboard, fallback and broken pages
            let mut row = MockRow::product("Item", &slug);
            if i % 2 == 0 {
                row = row.copies(product_url(&slug));
            }
            let text = if i % 3 == 0 { "An error occurred" } else { "Item page" };
            surface = surface.with_row(row).with_page(product_url(&slug), text);
        }
        let mut context = ListingContext::new(BRAND_NAME, BRAND_SLUG);

        let report = validate_listed_products(&surface, &mut context, limit, &config)
            .await
            .unwrap();
        report.records().iter().map(|r| r.index()).collect()
    })
}

fn with_random_case(text: &str, mask: &[bool]) -> String {
    text.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn records_are_min_of_rows_and_limit(rows in 1usize..9, limit in 1usize..9) {
        let indices = run_listing(rows, limit);
        let expected: Vec<usize> = (0..rows.min(limit)).collect();
        prop_assert_eq!(indices, expected);
    }
}

proptest! {
    #[test]
    fn any_signature_anywhere_is_broken(
        prefix in "[a-zA-Z ]{0,20}",
        suffix in "[a-zA-Z ]{0,20}",
        index in 0usize..BROKEN_PAGE_SIGNATURES.len(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let signature = with_random_case(BROKEN_PAGE_SIGNATURES[index], &mask);
        let text = format!("{prefix}{signature}{suffix}");
        prop_assert!(detect_broken_signature(&text).is_some());
        prop_assert_eq!(classify_page(&text, None, false).status, HealthStatus::Broken);
    }

    #[test]
    fn text_without_signatures_is_ok(text in "[a-eA-E .,]{0,60}") {
        prop_assert_eq!(classify_page(&text, Some(200), true).status, HealthStatus::Ok);
    }
}
