//! Shared constants for the catalog audit
//!
//! Default values and DOM selectors used throughout the crate, so the
//! console's markup assumptions live in one place.

/// Default number of listed products checked per brand
pub const DEFAULT_LIMIT: usize = 5;

/// Filter that must be active before rows are enumerated
pub const DEFAULT_FILTER_LABEL: &str = "Published";

/// Class names whose presence marks the filter toggle as active
pub const DEFAULT_FILTER_ACTIVE_CLASSES: &[&str] = &["bg-primary", "text-white"];

/// URL fragment of the listing refresh request issued by the filter toggle
pub const DEFAULT_FILTER_RESPONSE_FRAGMENT: &str = "/product-selection";

/// Public product page template; `{brand}` and `{slug}` are substituted
pub const DEFAULT_PRODUCT_URL_TEMPLATE: &str =
    "https://staging.intra.{brand}.com/selections/{slug}";

/// Slug column used when no cell of the first row looks like a slug (0-based)
pub const DEFAULT_FALLBACK_SLUG_COLUMN: usize = 3;

/// SVG path drawn by the "copy public link" button in each listing row
pub const COPY_ICON_PATH: &str = "M5 15H4a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2h9a2 2 0 0 1 2 2v1m-4 4h9a2 2 0 0 1 2 2v9a2 2 0 0 1-2 2h-9a2 2 0 0 1-2-2v-9a2 2 0 0 1 2-2Z";

/// Container elements that carry the listing filter toggles
pub const FILTER_TOGGLE_SELECTOR: &str = "div.cursor-pointer";

/// Cells of the first data row, inspected for the slug column
pub const FIRST_ROW_CELLS_SELECTOR: &str = "table tbody tr:first-child td";

/// Brand dropdown trigger in the console header
pub const BRAND_DROPDOWN_SELECTOR: &str = "img[alt=\"select brands\"]";

/// Wider set of dropdown triggers tried when the menu is collapsed
pub const BRAND_DROPDOWN_FALLBACK_SELECTOR: &str =
    "img[alt=\"select brands\"], button[aria-label=\"select brands\"], button:has(svg)";

/// Login form fields
pub const USERNAME_INPUT_SELECTOR: &str = "input[placeholder=\"Input Username\"]";
pub const PASSWORD_INPUT_SELECTOR: &str = "input[placeholder=\"Input Password\"]";

/// Sidebar entry leading to the product listing
pub const PRODUCT_SELECTIONS_LABEL: &str = "Product Selections";

/// Phrases whose presence in rendered page text marks the page as broken.
///
/// Matched case-insensitively against `document.body.innerText`. The curly
/// apostrophe variant is what Chromium actually renders on its own error page.
pub const BROKEN_PAGE_SIGNATURES: &[&str] = &[
    "404",
    "not found",
    "something went wrong",
    "an error occurred",
    "this page isn't working",
    "this page isn\u{2019}t working",
];

/// Poll interval for visibility waits
pub const POLL_INTERVAL_MS: u64 = 100;

/// Chrome user agent string
///
/// Updated periodically to match current stable Chrome.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Admin console used when neither CLI nor config file names one
pub const DEFAULT_CONSOLE_URL: &str = "https://staging-dms.intra.cmk.co.id";
