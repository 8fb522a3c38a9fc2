//! The cheapest-offer search: query, acquire, extract, normalize, select.

use crate::acquire::PageAcquirer;
use crate::browser::BrowserLauncher;
use crate::error::ScrapeError;
use crate::extract::extract_entries;
use crate::normalize::{normalize_entry, select_cheapest};
use crate::profile::{SiteProfile, WaitPolicy};
use crate::query::SearchRequest;
use crate::types::NormalizedOffer;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use url::Url;

/// Finds the cheapest offer for a product on one price-comparison site.
///
/// Holds no per-search state; every call launches and tears down its own
/// browser session.
#[derive(Clone)]
pub struct PriceScraper {
    acquirer: PageAcquirer,
    profile: SiteProfile,
}

impl PriceScraper {
    /// Create a scraper for PriceRunner with default wait bounds.
    pub fn new(launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self {
            acquirer: PageAcquirer::new(launcher, WaitPolicy::default()),
            profile: SiteProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: SiteProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_waits(mut self, waits: WaitPolicy) -> Self {
        self.acquirer = self.acquirer.with_waits(waits);
        self
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// Search for `request` and return the cheapest offer, if any.
    ///
    /// `Ok(None)` covers a result list that never rendered, a page with no
    /// result entries, and entries none of which had a usable price.
    #[instrument(skip(self, request), fields(product = %request.product_name()))]
    pub async fn find_cheapest(
        &self,
        request: &SearchRequest,
    ) -> Result<Option<NormalizedOffer>, ScrapeError> {
        let url = request.search_url(&self.profile);

        let html = match self
            .acquirer
            .acquire(
                &url,
                &self.profile.consent_label,
                &self.profile.selectors.container,
            )
            .await
        {
            Ok(html) => html,
            Err(e) if e.is_timeout() => {
                warn!(error = %e, "Result list never rendered");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let best = cheapest_in_html(&html, &self.profile)?;
        match &best {
            Some(offer) => info!(name = %offer.name, price = offer.price, "Found cheapest offer"),
            None => info!("No usable offers on results page"),
        }
        Ok(best)
    }
}

/// Extract, normalize and select from already-rendered HTML.
pub fn cheapest_in_html(
    html: &str,
    profile: &SiteProfile,
) -> Result<Option<NormalizedOffer>, ScrapeError> {
    let entries = extract_entries(html, &profile.selectors)?;
    if entries.is_empty() {
        return Ok(None);
    }

    let origin = Url::parse(&profile.origin)?;
    Ok(select_cheapest(entries.into_iter().filter_map(|entry| {
        normalize_entry(entry, &origin, &profile.currency_suffix)
    })))
}
