//! Browser abstraction used by the page acquirer.
//!
//! [`BrowserLauncher`] starts one isolated session per search; a
//! [`BrowserSession`] owns that browser until [`BrowserSession::close`] is
//! called. The Chromium implementation lives in [`chromium`].

pub mod chromium;

use crate::error::ScrapeError;
use async_trait::async_trait;

/// Starts fresh browser sessions.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    /// Launch a new, unshared session.
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScrapeError>;
}

/// A single live browser session with one page.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Navigate the page to `url`.
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError>;

    /// Click the first `<button>` whose visible text equals `label`.
    ///
    /// Returns `Ok(false)` when no such button is currently present.
    async fn click_button_with_text(&self, label: &str) -> Result<bool, ScrapeError>;

    /// Whether at least one element matches the CSS `selector`.
    async fn has_element(&self, selector: &str) -> Result<bool, ScrapeError>;

    /// Current rendered document as HTML.
    async fn html(&self) -> Result<String, ScrapeError>;

    /// Tear down the session and its browser process.
    async fn close(self: Box<Self>) -> Result<(), ScrapeError>;
}
