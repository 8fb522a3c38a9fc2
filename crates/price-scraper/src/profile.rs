//! Site-specific strings and wait bounds.
//!
//! Everything the scraper knows about the target site's markup lives here.
//! The class names are an unversioned contract with a third-party site, so a
//! layout change should only ever require editing [`pricerunner`].

use std::time::Duration;

/// PriceRunner (Sweden) constants.
pub mod pricerunner {
    pub const SEARCH_URL: &str = "https://www.pricerunner.se/results?q=";
    pub const ORIGIN: &str = "https://www.pricerunner.se";

    pub const CONTAINER: &str = "div.pr-gkzc8z-Carousel-scrollSnapChild";
    pub const NAME: &str = "h3.pr-kxc9l9";
    pub const PRICE: &str = r#"span.pr-2v77sd[data-testid="priceComponent"]"#;
    pub const LINK: &str = "a[href]";

    pub const CURRENCY_SUFFIX: &str = "kr";
    pub const CONSENT_LABEL: &str = "Acceptera";
}

/// CSS selectors for one result entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Result-entry container; also the marker awaited after navigation.
    pub container: String,
    /// Name element inside a container. The name is read from its `title`.
    pub name: String,
    /// Price element inside a container.
    pub price: String,
    /// Anchor inside a container.
    pub link: String,
}

/// Everything needed to query and read one price-comparison site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    /// Search endpoint; the encoded product name is appended verbatim.
    pub search_url: String,
    /// Origin used to absolutize relative links.
    pub origin: String,
    pub selectors: Selectors,
    /// Currency token stripped from raw prices and appended on output.
    pub currency_suffix: String,
    /// Visible text of the cookie-consent accept button.
    pub consent_label: String,
}

impl SiteProfile {
    /// Profile for pricerunner.se.
    pub fn pricerunner() -> Self {
        Self {
            search_url: pricerunner::SEARCH_URL.into(),
            origin: pricerunner::ORIGIN.into(),
            selectors: Selectors {
                container: pricerunner::CONTAINER.into(),
                name: pricerunner::NAME.into(),
                price: pricerunner::PRICE.into(),
                link: pricerunner::LINK.into(),
            },
            currency_suffix: pricerunner::CURRENCY_SUFFIX.into(),
            consent_label: pricerunner::CONSENT_LABEL.into(),
        }
    }

    /// Override the consent button label (e.g. for another locale).
    pub fn with_consent_label(mut self, label: impl Into<String>) -> Self {
        self.consent_label = label.into();
        self
    }
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::pricerunner()
    }
}

/// Bounds for the two waits performed while acquiring a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// How long to look for the consent button before giving up silently.
    pub consent_timeout: Duration,
    /// How long to wait for the first result container before failing.
    pub results_timeout: Duration,
    /// Delay between probes.
    pub poll_interval: Duration,
    /// Pause before tearing the session down.
    pub settle_delay: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            consent_timeout: Duration::from_secs(10),
            results_timeout: Duration::from_secs(15),
            poll_interval: Duration::from_millis(250),
            settle_delay: Duration::from_secs(5),
        }
    }
}
