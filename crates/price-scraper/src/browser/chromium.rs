//! Chromium sessions driven over CDP with chromiumoxide.

use super::{BrowserLauncher, BrowserSession};
use crate::error::ScrapeError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

const PATH_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Locate a Chrome/Chromium binary on `PATH`.
pub fn find_chromium() -> Option<PathBuf> {
    PATH_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}

/// Launches one headless Chromium process per session.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    chrome_path: Option<PathBuf>,
    headless: bool,
}

impl ChromiumLauncher {
    pub fn new() -> Self {
        Self {
            chrome_path: None,
            headless: true,
        }
    }

    /// Use a specific browser binary instead of searching `PATH`.
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    fn resolve_binary(&self) -> Result<PathBuf, ScrapeError> {
        match &self.chrome_path {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(path) => Err(ScrapeError::Launch(format!(
                "browser binary not found at {}",
                path.display()
            ))),
            None => find_chromium().ok_or_else(|| {
                ScrapeError::Launch(
                    "no Chrome/Chromium found on PATH; set SCRAPER__CHROME_PATH".into(),
                )
            }),
        }
    }

    /// Build the launch config with a fresh profile directory, which must
    /// outlive the browser process.
    fn browser_config(&self, binary: &Path) -> Result<(BrowserConfig, TempDir), ScrapeError> {
        let profile = tempfile::Builder::new()
            .prefix("price-scraper-profile-")
            .tempdir()
            .map_err(|e| ScrapeError::Launch(format!("failed to create profile dir: {e}")))?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(binary)
            .user_data_dir(profile.path())
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if !self.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ScrapeError::Launch)?;
        Ok((config, profile))
    }
}

impl Default for ChromiumLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    #[instrument(skip(self))]
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScrapeError> {
        let binary = self.resolve_binary()?;
        let (config, profile) = self.browser_config(&binary)?;
        debug!(
            binary = %binary.display(),
            profile = %profile.path().display(),
            "Launching browser"
        );

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let session = ChromiumSession::without_page(browser, handler, profile);
                if let Err(close_err) = session.shutdown().await {
                    warn!(error = %close_err, "Failed to close browser after page creation error");
                }
                return Err(ScrapeError::Launch(format!("failed to open page: {e}")));
            }
        };

        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler),
            profile: Some(profile),
        }))
    }
}

/// One browser process with a single page.
///
/// Dropping the session without calling `close` aborts the CDP handler task;
/// chromiumoxide kills the child process when the `Browser` is dropped, and
/// the profile directory is removed after it.
pub struct ChromiumSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
    // Declared last: dropped only after the browser is gone.
    profile: Option<TempDir>,
}

impl ChromiumSession {
    fn without_page(browser: Browser, handler: JoinHandle<()>, profile: TempDir) -> Self {
        Self {
            browser: Some(browser),
            page: None,
            handler: Some(handler),
            profile: Some(profile),
        }
    }

    fn page(&self) -> Result<&Page, ScrapeError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScrapeError::Browser("session has no open page".into()))
    }

    async fn evaluate<T: DeserializeOwned>(&self, script: String) -> Result<T, ScrapeError> {
        self.page()?
            .evaluate(script)
            .await
            .map_err(|e| ScrapeError::Browser(format!("JS execution failed: {e}")))?
            .into_value()
            .map_err(|e| ScrapeError::Browser(format!("failed to convert JS result: {e:?}")))
    }

    async fn shutdown(mut self) -> Result<(), ScrapeError> {
        self.page.take();
        let result = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser
                    .close()
                    .await
                    .map(|_| ())
                    .map_err(|e| ScrapeError::Browser(format!("failed to close browser: {e}")));
                if let Err(e) = browser.wait().await {
                    debug!(error = %e, "Waiting for browser exit failed");
                }
                closed
            }
            None => Ok(()),
        };
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        if let Some(profile) = self.profile.take() {
            if let Err(e) = profile.close() {
                debug!(error = %e, "Failed to remove browser profile dir");
            }
        }
        result
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

/// Encode `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn click_button_script(label: &str) -> String {
    format!(
        r#"(() => {{
    const label = {label};
    const button = Array.from(document.querySelectorAll('button'))
        .find(b => b.textContent.trim() === label && !b.disabled && b.offsetParent !== null);
    if (!button) {{
        return false;
    }}
    button.click();
    return true;
}})()"#,
        label = js_string(label)
    )
}

fn has_element_script(selector: &str) -> String {
    format!(
        "document.querySelector({}) !== null",
        js_string(selector)
    )
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        let page = self.page()?;
        page.goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation(format!("{url}: {e}")))?;
        let _ = page.wait_for_navigation().await;
        Ok(())
    }

    async fn click_button_with_text(&self, label: &str) -> Result<bool, ScrapeError> {
        self.evaluate(click_button_script(label)).await
    }

    async fn has_element(&self, selector: &str) -> Result<bool, ScrapeError> {
        self.evaluate(has_element_script(selector)).await
    }

    async fn html(&self) -> Result<String, ScrapeError> {
        self.evaluate("document.documentElement.outerHTML".to_string())
            .await
    }

    async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
        (*self).shutdown().await
    }
}
