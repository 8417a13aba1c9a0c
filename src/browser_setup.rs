//! Chromium discovery, launch and shutdown
//!
//! The audit needs a browser that lets the console origin use
//! `navigator.clipboard`, so launch flags and a permission grant are set up
//! here alongside the usual executable lookup.

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::cdp::browser_protocol::browser::{GrantPermissionsParams, PermissionType};
use chromiumoxide::fetcher::{BrowserFetcher, BrowserFetcherOptions};
use futures::StreamExt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{error, info, trace, warn};

use crate::config::AuditConfig;
use crate::utils::constants::CHROME_USER_AGENT;

/// Find Chrome/Chromium executable on the system with platform-specific search paths.
pub async fn find_browser_executable() -> Result<PathBuf> {
    // First check environment variable which overrides all other methods
    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!("CHROMIUM_PATH points to a missing file: {}", path.display());
    }

    let candidates: &[&str] = if cfg!(target_os = "windows") {
        &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "~/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    };

    for candidate in candidates {
        let path = match candidate.strip_prefix("~/") {
            Some(rest) => match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => continue,
            },
            None => PathBuf::from(*candidate),
        };

        if path.exists() {
            info!("Found browser at: {}", path.display());
            return Ok(path);
        }
    }

    if !cfg!(target_os = "windows") {
        for cmd in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
            if let Ok(output) = Command::new("which").arg(cmd).output()
                && output.status.success()
            {
                let found = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !found.is_empty() {
                    info!("Found browser using 'which': {found}");
                    return Ok(PathBuf::from(found));
                }
            }
        }
    }

    warn!("No Chrome/Chromium executable found. Will download one.");
    Err(anyhow::anyhow!("Chrome/Chromium executable not found"))
}

/// Download Chromium into the user cache directory and return its executable.
pub async fn download_managed_browser() -> Result<PathBuf> {
    info!("Downloading managed Chromium browser...");

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| {
            let fallback = std::env::temp_dir();
            warn!("No user cache directory, using {}", fallback.display());
            fallback
        })
        .join("catalog_audit")
        .join("chromium");

    std::fs::create_dir_all(&cache_dir).context("Failed to create cache directory")?;

    let fetcher = BrowserFetcher::new(
        BrowserFetcherOptions::builder()
            .with_path(&cache_dir)
            .build()
            .context("Failed to build fetcher options")?,
    );

    let revision_info = fetcher.fetch().await.context("Failed to fetch browser")?;
    info!("Downloaded Chromium to: {}", revision_info.folder_path.display());

    Ok(revision_info.executable_path)
}

/// A launched browser together with its CDP handler task.
///
/// Call [`AuditBrowser::shutdown`] when done. Dropping without it aborts
/// the handler (the Chrome process is killed by `Browser`'s own drop) and
/// removes a temporary profile directory.
pub struct AuditBrowser {
    browser: Browser,
    handler: JoinHandle<()>,
    /// Profile directory to remove on shutdown; `None` for a caller-supplied one
    temp_profile: Option<PathBuf>,
}

impl AuditBrowser {
    #[must_use]
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close Chrome, wait for the process, stop the handler and remove the
    /// temporary profile.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {e}");
        }
        match tokio::time::timeout(Duration::from_secs(10), self.browser.wait()).await {
            Ok(Ok(_)) => info!("Browser exited"),
            Ok(Err(e)) => warn!("Waiting for browser exit failed: {e}"),
            Err(_) => warn!("Browser did not exit within 10s"),
        }
        self.handler.abort();
        self.cleanup_profile();
        Ok(())
    }

    fn cleanup_profile(&mut self) {
        if let Some(path) = self.temp_profile.take() {
            info!("Removing browser profile {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path) {
                warn!("Failed to remove browser profile {}: {e}", path.display());
            }
        }
    }
}

impl Drop for AuditBrowser {
    fn drop(&mut self) {
        self.handler.abort();
        if self.temp_profile.is_some() {
            warn!("AuditBrowser dropped without shutdown()");
            self.cleanup_profile();
        }
    }
}

fn profile_dir(config: &AuditConfig) -> (PathBuf, bool) {
    match config.chrome_data_dir() {
        Some(dir) => (dir.to_path_buf(), false),
        None => (
            std::env::temp_dir().join(format!("catalog_audit_chrome_{}", std::process::id())),
            true,
        ),
    }
}

/// Launch Chromium configured for the console at `config.console_url()`.
///
/// Clipboard read/write is enabled and the console origin is treated as
/// secure, so `navigator.clipboard` works even over plain http.
pub async fn launch_browser(config: &AuditConfig) -> Result<AuditBrowser> {
    let chrome_path = match find_browser_executable().await {
        Ok(path) => path,
        Err(_) => download_managed_browser().await?,
    };

    let (user_data_dir, is_temp) = profile_dir(config);
    std::fs::create_dir_all(&user_data_dir).context("Failed to create user data directory")?;

    let origin = config.console_origin()?;

    let mut builder = BrowserConfigBuilder::default()
        .request_timeout(Duration::from_secs(30))
        .window_size(1280, 800)
        .user_data_dir(user_data_dir.clone())
        .chrome_executable(chrome_path);

    builder = if config.headless() {
        builder.headless_mode(HeadlessMode::default())
    } else {
        builder.with_head()
    };

    builder = builder
        .arg(format!("--user-agent={CHROME_USER_AGENT}"))
        .arg("--enable-features=ClipboardReadWrite")
        .arg(format!("--unsafely-treat-insecure-origin-as-secure={origin}"))
        .arg("--disable-blink-features=AutomationControlled")
        .arg("--disable-features=IsolateOrigins,site-per-process")
        .arg("--no-sandbox")
        .arg("--disable-gpu")
        .arg("--disable-dev-shm-usage")
        .arg("--no-first-run")
        .arg("--no-default-browser-check")
        .arg("--disable-notifications")
        .arg("--password-store=basic")
        .arg("--use-mock-keychain");

    let browser_config = builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build browser config: {e}"))?;

    info!("Launching browser (headless: {})", config.headless());
    let (browser, mut handler) = Browser::launch(browser_config)
        .await
        .context("Failed to launch browser")?;

    let handler_task = task::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                let message = e.to_string();
                // Unknown CDP events chromiumoxide cannot deserialize are harmless
                if message.contains("data did not match any variant of untagged enum Message")
                    || message.contains("Failed to deserialize WS response")
                {
                    trace!("Suppressed CDP deserialization error: {message}");
                } else {
                    error!("Browser handler error: {e:?}");
                }
            }
        }
        info!("Browser handler task completed");
    });

    let audit_browser = AuditBrowser {
        browser,
        handler: handler_task,
        temp_profile: is_temp.then_some(user_data_dir),
    };

    grant_clipboard_access(audit_browser.browser(), &origin).await?;
    Ok(audit_browser)
}

/// Grant clipboard permissions to `origin` for the whole browser.
pub async fn grant_clipboard_access(browser: &Browser, origin: &str) -> Result<()> {
    let mut params = GrantPermissionsParams::new(vec![
        PermissionType::ClipboardReadWrite,
        PermissionType::ClipboardSanitizedWrite,
    ]);
    params.origin = Some(origin.to_string());

    browser
        .execute(params)
        .await
        .with_context(|| format!("Failed to grant clipboard access to {origin}"))?;
    info!("Clipboard access granted to {origin}");
    Ok(())
}
