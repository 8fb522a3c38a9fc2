//! Cheapest-price search on a price-comparison site.
//!
//! A search runs four steps in order: build the search URL
//! ([`SearchRequest`]), render the results page in a real browser
//! ([`PageAcquirer`]), read the result entries out of the HTML
//! ([`extract_entries`]) and pick the lowest parsable price
//! ([`select_cheapest`]). [`PriceScraper`] wires them together.

mod acquire;
pub mod browser;
mod error;
mod extract;
mod normalize;
mod pipeline;
mod profile;
mod query;
mod types;

pub use acquire::PageAcquirer;
pub use browser::chromium::{find_chromium, ChromiumLauncher};
pub use browser::{BrowserLauncher, BrowserSession};
pub use error::ScrapeError;
pub use extract::extract_entries;
pub use normalize::{normalize_entry, parse_price, select_cheapest};
pub use pipeline::{cheapest_in_html, PriceScraper};
pub use profile::{pricerunner, Selectors, SiteProfile, WaitPolicy};
pub use query::SearchRequest;
pub use types::{NormalizedOffer, ResultEntry};
