//! Search request and URL construction.

use crate::error::ScrapeError;
use crate::profile::SiteProfile;

/// A validated product search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    product_name: String,
}

impl SearchRequest {
    /// Create a request; the name is trimmed and must not be empty.
    pub fn new(product_name: impl AsRef<str>) -> Result<Self, ScrapeError> {
        let product_name = product_name.as_ref().trim();
        if product_name.is_empty() {
            return Err(ScrapeError::InvalidInput("Empty product_name".into()));
        }
        Ok(Self {
            product_name: product_name.to_string(),
        })
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Build the search URL for this request against `profile`.
    pub fn search_url(&self, profile: &SiteProfile) -> String {
        format!(
            "{}{}",
            profile.search_url,
            urlencoding::encode(&self.product_name)
        )
    }
}
