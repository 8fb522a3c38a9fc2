//! Scripted browser sessions for pipeline tests.

use async_trait::async_trait;
use price_scraper::{BrowserLauncher, BrowserSession, ScrapeError, WaitPolicy};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the fake page does.
#[derive(Clone, Default)]
pub struct PageScript {
    pub html: String,
    pub consent_label: Option<String>,
    pub marker_present: bool,
    pub fail_navigation: bool,
    pub fail_consent_probe: bool,
    pub fail_html: bool,
    /// `has_element` never resolves.
    pub hang_on_marker: bool,
    pub panic_on_html: bool,
}

impl PageScript {
    /// A page that renders `html` immediately behind a consent dialog.
    pub fn rendered(html: &str) -> Self {
        Self {
            html: html.to_string(),
            consent_label: Some("Acceptera".into()),
            marker_present: true,
            ..Default::default()
        }
    }
}

#[derive(Default)]
pub struct Calls {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub consent_clicks: AtomicUsize,
    pub html_reads: AtomicUsize,
    pub drops: AtomicUsize,
    pub urls: Mutex<Vec<String>>,
}

impl Calls {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn consent_clicks(&self) -> usize {
        self.consent_clicks.load(Ordering::SeqCst)
    }

    pub fn html_reads(&self) -> usize {
        self.html_reads.load(Ordering::SeqCst)
    }

    /// Sessions released, whether through `close` or by being dropped.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

pub struct FakeLauncher {
    script: PageScript,
    calls: Arc<Calls>,
    fail_launch: bool,
}

impl FakeLauncher {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            calls: Arc::new(Calls::default()),
            fail_launch: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(PageScript::default())
        }
    }

    pub fn calls(&self) -> Arc<Calls> {
        self.calls.clone()
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScrapeError> {
        if self.fail_launch {
            return Err(ScrapeError::Launch("no browser".into()));
        }
        self.calls.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            script: self.script.clone(),
            calls: self.calls.clone(),
        }))
    }
}

struct FakeSession {
    script: PageScript,
    calls: Arc<Calls>,
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str) -> Result<(), ScrapeError> {
        self.calls.urls.lock().unwrap().push(url.to_string());
        if self.script.fail_navigation {
            return Err(ScrapeError::Navigation("connection refused".into()));
        }
        Ok(())
    }

    async fn click_button_with_text(&self, label: &str) -> Result<bool, ScrapeError> {
        if self.script.fail_consent_probe {
            return Err(ScrapeError::Browser("detached frame".into()));
        }
        if self.script.consent_label.as_deref() == Some(label) {
            self.calls.consent_clicks.fetch_add(1, Ordering::SeqCst);
            return Ok(true);
        }
        Ok(false)
    }

    async fn has_element(&self, _selector: &str) -> Result<bool, ScrapeError> {
        if self.script.hang_on_marker {
            std::future::pending::<()>().await;
        }
        Ok(self.script.marker_present)
    }

    async fn html(&self) -> Result<String, ScrapeError> {
        self.calls.html_reads.fetch_add(1, Ordering::SeqCst);
        if self.script.panic_on_html {
            panic!("renderer crashed");
        }
        if self.script.fail_html {
            return Err(ScrapeError::Browser("target closed".into()));
        }
        Ok(self.script.html.clone())
    }

    async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
        self.calls.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.calls.drops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Short bounds so timeout paths finish quickly.
pub fn fast_waits() -> WaitPolicy {
    WaitPolicy {
        consent_timeout: Duration::from_millis(50),
        results_timeout: Duration::from_millis(100),
        poll_interval: Duration::from_millis(10),
        settle_delay: Duration::ZERO,
    }
}
