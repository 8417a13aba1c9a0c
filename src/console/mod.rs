//! Admin console navigation
//!
//! Everything the audit needs before it can start: login, brand selection
//! and opening the Product Selections listing. Produces the
//! [`ListingContext`] the audit pipeline consumes.

pub mod brand;

use std::time::Duration;

use chromiumoxide::browser::Browser;
use chromiumoxide::page::Page;
use tracing::{debug, info};
use url::Url;

use crate::audit::ListingContext;
use crate::config::AuditConfig;
use crate::error::{AuditError, AuditResult};
use crate::surface::ChromeCatalogSurface;
use crate::surface::chrome::{evaluate, wait_for_script};
use crate::surface::js_scripts as js;
use crate::utils::{
    BRAND_DROPDOWN_FALLBACK_SELECTOR, BRAND_DROPDOWN_SELECTOR, PASSWORD_INPUT_SELECTOR,
    PRODUCT_SELECTIONS_LABEL, USERNAME_INPUT_SELECTOR, WaitConfig, settle, wait_until,
    with_timeout,
};

pub use brand::{BrandTarget, load_brands};

/// How long the Product Selections entry gets before the dropdown fallback
const DIRECT_ENTRY_TIMEOUT: Duration = Duration::from_secs(5);

/// A logged-in console tab.
pub struct ConsoleSession<'a> {
    page: Page,
    config: &'a AuditConfig,
}

impl<'a> ConsoleSession<'a> {
    #[must_use]
    pub fn new(page: Page, config: &'a AuditConfig) -> Self {
        Self { page, config }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The listing surface backed by this session's tab.
    #[must_use]
    pub fn catalog_surface<'b>(&self, browser: &'b Browser) -> ChromeCatalogSurface<'b> {
        ChromeCatalogSurface::new(browser, self.page.clone())
    }

    async fn goto(&self, url: &str) -> AuditResult<()> {
        with_timeout(
            async {
                self.page
                    .goto(url)
                    .await
                    .map(|_| ())
                    .map_err(|e| AuditError::NavigationFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    })
            },
            self.config.page_load_timeout(),
            "console navigation",
        )
        .await
    }

    async fn wait_visible(&self, element_expr: &str, target: &str, timeout: Duration) -> AuditResult<()> {
        wait_for_script(&self.page, &js::is_visible(element_expr), timeout, target)
            .await
            .map_err(|_| AuditError::ElementNotFound {
                target: target.to_string(),
                timeout,
            })
    }

    /// Wait for the element, then click it.
    async fn click_when_visible(&self, element_expr: &str, target: &str, timeout: Duration) -> AuditResult<()> {
        self.wait_visible(element_expr, target, timeout).await?;
        if evaluate::<bool>(&self.page, &js::click(element_expr)).await? {
            debug!("Clicked {target}");
            Ok(())
        } else {
            Err(AuditError::ElementNotFound {
                target: target.to_string(),
                timeout,
            })
        }
    }

    async fn fill(&self, selector: &str, text: &str) -> AuditResult<()> {
        self.wait_visible(&js::query(selector), selector, self.config.visibility_timeout())
            .await?;
        let input = self.page.find_element(selector).await?;
        input.click().await?.type_str(text).await?;
        Ok(())
    }

    async fn current_path(&self) -> AuditResult<String> {
        let href: String = evaluate(&self.page, js::LOCATION_HREF).await?;
        let url = Url::parse(&href)
            .map_err(|e| AuditError::ScriptExecution(format!("invalid location '{href}': {e}")))?;
        Ok(url.path().trim_end_matches('/').to_string())
    }

    /// Log in with the given credentials.
    ///
    /// Success means the browser left the `/login` path.
    pub async fn login(&self, username: &str, password: &str) -> AuditResult<()> {
        let login_url = self.config.login_url()?;
        info!("Logging in to {login_url}");

        self.goto(&login_url).await?;
        self.fill(USERNAME_INPUT_SELECTOR, username).await?;
        self.fill(PASSWORD_INPUT_SELECTOR, password).await?;
        self.click_when_visible(
            &js::button_with_text("Login", true),
            "Login button",
            self.config.visibility_timeout(),
        )
        .await?;

        let timeout = self.config.listing_ready_timeout();
        wait_until(
            move || async move { Ok::<_, AuditError>(self.current_path().await? != "/login") },
            WaitConfig::with_timeout(timeout),
            "redirect away from /login",
        )
        .await
        .map_err(|_| {
            AuditError::LoginFailed(format!("still on the login page after {timeout:?}"))
        })?;

        settle(self.config.navigation_settle()).await;
        info!("Login succeeded");
        Ok(())
    }

    /// Switch the console to `brand_name` via the header dropdown.
    pub async fn select_brand(&self, brand_name: &str) -> AuditResult<()> {
        info!("Selecting brand {brand_name}");
        let timeout = self.config.visibility_timeout();

        self.click_when_visible(&js::query(BRAND_DROPDOWN_SELECTOR), "brand dropdown", timeout)
            .await?;
        self.click_when_visible(
            &js::element_with_exact_text(brand_name),
            &format!("brand option '{brand_name}'"),
            timeout,
        )
        .await?;

        settle(self.config.navigation_settle()).await;
        Ok(())
    }

    /// Open the Product Selections listing for `brand` and wait until it has
    /// at least one copy control.
    ///
    /// The returned context has `FilterState::Unknown`; the audit pipeline
    /// synchronises the filter itself.
    pub async fn open_product_selections(&self, brand: &BrandTarget) -> AuditResult<ListingContext> {
        info!("Opening Product Selections for {}", brand.name);
        let entry = js::button_with_text(PRODUCT_SELECTIONS_LABEL, false);

        if self
            .click_when_visible(&entry, PRODUCT_SELECTIONS_LABEL, DIRECT_ENTRY_TIMEOUT)
            .await
            .is_err()
        {
            debug!("Product Selections not directly visible, opening the menu first");
            self.click_when_visible(
                &js::query(BRAND_DROPDOWN_FALLBACK_SELECTOR),
                "navigation menu",
                self.config.copy_control_timeout(),
            )
            .await?;
            self.click_when_visible(&entry, PRODUCT_SELECTIONS_LABEL, self.config.visibility_timeout())
                .await?;
        }

        let table_timeout = self.config.content_ready_timeout();
        wait_for_script(&self.page, &js::exists("table"), table_timeout, "listing table")
            .await
            .map_err(|_| AuditError::ElementNotFound {
                target: "listing table".to_string(),
                timeout: table_timeout,
            })?;

        let rows_timeout = self.config.listing_ready_timeout();
        let has_rows = format!("({}) > 0", js::count_copy_controls());
        wait_for_script(&self.page, &has_rows, rows_timeout, "copy controls")
            .await
            .map_err(|_| AuditError::EmptyListing {
                brand: brand.slug.clone(),
            })?;

        info!("Product Selections loaded for {}", brand.name);
        Ok(ListingContext::new(&brand.name, &brand.slug))
    }

    /// Select the brand and open its listing.
    pub async fn open_brand(&self, brand: &BrandTarget) -> AuditResult<ListingContext> {
        self.select_brand(&brand.name).await?;
        self.open_product_selections(brand).await
    }
}
