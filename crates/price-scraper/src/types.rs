//! Values produced while scraping one search.

/// A result entry as read from the DOM, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub name: String,
    /// Price text as rendered, e.g. `"9 999,50 kr"`.
    pub raw_price: String,
    /// `href` as found; may be relative.
    pub link: String,
}

/// An entry with a parsed price and an absolute link.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOffer {
    pub name: String,
    /// Finite and non-negative.
    pub price: f64,
    pub link: String,
}
