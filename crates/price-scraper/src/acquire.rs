//! Page acquisition: navigate, dismiss consent, wait for results.

use crate::browser::{BrowserLauncher, BrowserSession};
use crate::error::ScrapeError;
use crate::profile::WaitPolicy;
use std::sync::Arc;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

/// Drives one browser session per call and hands back the rendered HTML.
#[derive(Clone)]
pub struct PageAcquirer {
    launcher: Arc<dyn BrowserLauncher>,
    waits: WaitPolicy,
}

impl PageAcquirer {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, waits: WaitPolicy) -> Self {
        Self { launcher, waits }
    }

    pub fn with_waits(mut self, waits: WaitPolicy) -> Self {
        self.waits = waits;
        self
    }

    /// Load `url` and return its HTML once an element matching `marker` exists.
    ///
    /// The session is always closed before returning, after the settle delay,
    /// whatever the render outcome. A marker that never appears yields
    /// [`ScrapeError::Timeout`].
    #[instrument(skip(self, consent_label, marker))]
    pub async fn acquire(
        &self,
        url: &str,
        consent_label: &str,
        marker: &str,
    ) -> Result<String, ScrapeError> {
        let session = self.launcher.launch().await?;

        let outcome = self
            .render(session.as_ref(), url, consent_label, marker)
            .await;

        if !self.waits.settle_delay.is_zero() {
            sleep(self.waits.settle_delay).await;
        }
        match session.close().await {
            Ok(()) => debug!("Browser session closed"),
            Err(e) => warn!(error = %e, "Failed to close browser session"),
        }

        outcome
    }

    async fn render(
        &self,
        session: &dyn BrowserSession,
        url: &str,
        consent_label: &str,
        marker: &str,
    ) -> Result<String, ScrapeError> {
        session.navigate(url).await?;
        self.dismiss_consent(session, consent_label).await;
        self.wait_for_marker(session, marker).await?;
        session.html().await
    }

    /// Best effort: a missing or unclickable consent dialog is not an error.
    async fn dismiss_consent(&self, session: &dyn BrowserSession, label: &str) {
        let poll_interval = self.waits.poll_interval;
        let attempt = timeout(self.waits.consent_timeout, async {
            loop {
                if session.click_button_with_text(label).await? {
                    return Ok::<(), ScrapeError>(());
                }
                sleep(poll_interval).await;
            }
        })
        .await;

        match attempt {
            Ok(Ok(())) => info!(label, "Accepted cookie consent"),
            Ok(Err(e)) => warn!(error = %e, "Cookie consent dialog could not be interacted with"),
            Err(_) => debug!(label, "Cookie consent dialog did not appear"),
        }
    }

    async fn wait_for_marker(
        &self,
        session: &dyn BrowserSession,
        marker: &str,
    ) -> Result<(), ScrapeError> {
        let poll_interval = self.waits.poll_interval;
        let found = timeout(self.waits.results_timeout, async {
            loop {
                if session.has_element(marker).await? {
                    return Ok::<(), ScrapeError>(());
                }
                sleep(poll_interval).await;
            }
        })
        .await;

        match found {
            Ok(result) => result,
            Err(_) => Err(ScrapeError::Timeout {
                what: format!("'{marker}'"),
                after: self.waits.results_timeout,
            }),
        }
    }
}
