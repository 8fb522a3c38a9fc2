//! Price normalization and cheapest-offer selection.

use crate::types::{NormalizedOffer, ResultEntry};
use tracing::warn;
use url::Url;

/// Parse a rendered price such as `"10 500,00 kr"` into `10500.0`.
///
/// Non-breaking spaces, the currency suffix and all whitespace are removed and
/// the decimal comma becomes a point. Returns `None` for anything that does not
/// parse to a finite, non-negative number.
pub fn parse_price(raw: &str, currency_suffix: &str) -> Option<f64> {
    let mut text = raw.replace('\u{a0}', " ");
    if !currency_suffix.is_empty() {
        text = text.replace(currency_suffix, "");
    }
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let price: f64 = compact.parse().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Normalize one entry against the site origin.
///
/// Entries whose price does not parse, or whose link cannot be resolved, are
/// logged and dropped.
pub fn normalize_entry(
    entry: ResultEntry,
    origin: &Url,
    currency_suffix: &str,
) -> Option<NormalizedOffer> {
    let Some(price) = parse_price(&entry.raw_price, currency_suffix) else {
        warn!(
            name = %entry.name,
            raw_price = %entry.raw_price,
            "Skipping entry with unparsable price"
        );
        return None;
    };

    let link = match origin.join(&entry.link) {
        Ok(url) => url.to_string(),
        Err(e) => {
            warn!(
                name = %entry.name,
                link = %entry.link,
                error = %e,
                "Skipping entry with unresolvable link"
            );
            return None;
        }
    };

    Some(NormalizedOffer {
        name: entry.name,
        price,
        link,
    })
}

/// Pick the lowest-priced offer. On equal prices the earliest offer wins.
pub fn select_cheapest<I>(offers: I) -> Option<NormalizedOffer>
where
    I: IntoIterator<Item = NormalizedOffer>,
{
    offers.into_iter().fold(None, |best, offer| match best {
        Some(current) if offer.price >= current.price => Some(current),
        _ => Some(offer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(name: &str, price: f64) -> NormalizedOffer {
        NormalizedOffer {
            name: name.into(),
            price,
            link: format!("https://www.pricerunner.se/pl/{name}"),
        }
    }

    #[test]
    fn test_parse_price_swedish_format() {
        assert_eq!(parse_price("10 500,00 kr", "kr"), Some(10500.0));
        assert_eq!(parse_price("9 999,50 kr", "kr"), Some(9999.5));
        assert_eq!(parse_price("12 000 kr", "kr"), Some(12000.0));
    }

    #[test]
    fn test_parse_price_non_breaking_spaces() {
        assert_eq!(parse_price("1\u{a0}299\u{a0}kr", "kr"), Some(1299.0));
        assert_eq!(parse_price("2\u{202f}499,90\u{a0}kr", "kr"), Some(2499.9));
    }

    #[test]
    fn test_parse_price_rejects_residue() {
        assert_eq!(parse_price("N/A kr", "kr"), None);
        assert_eq!(parse_price("", "kr"), None);
        assert_eq!(parse_price("fr. 1 000 kr", "kr"), None);
    }

    #[test]
    fn test_parse_price_rejects_non_finite_and_negative() {
        assert_eq!(parse_price("inf kr", "kr"), None);
        assert_eq!(parse_price("NaN", "kr"), None);
        assert_eq!(parse_price("-5 kr", "kr"), None);
    }

    #[test]
    fn test_normalize_entry_resolves_relative_link() {
        let origin = Url::parse("https://www.pricerunner.se").unwrap();
        let entry = ResultEntry {
            name: "Phone".into(),
            raw_price: "3 495 kr".into(),
            link: "/pl/1-3200/Mobiltelefoner/Phone".into(),
        };

        let offer = normalize_entry(entry, &origin, "kr").unwrap();
        assert_eq!(offer.price, 3495.0);
        assert_eq!(
            offer.link,
            "https://www.pricerunner.se/pl/1-3200/Mobiltelefoner/Phone"
        );
    }

    #[test]
    fn test_normalize_entry_keeps_absolute_link() {
        let origin = Url::parse("https://www.pricerunner.se").unwrap();
        let entry = ResultEntry {
            name: "Phone".into(),
            raw_price: "100 kr".into(),
            link: "https://shop.example.com/phone".into(),
        };

        let offer = normalize_entry(entry, &origin, "kr").unwrap();
        assert_eq!(offer.link, "https://shop.example.com/phone");
    }

    #[test]
    fn test_select_cheapest() {
        let best = select_cheapest(vec![
            offer("a", 10500.0),
            offer("b", 9999.5),
            offer("c", 12000.0),
        ])
        .unwrap();
        assert_eq!(best.name, "b");
    }

    #[test]
    fn test_select_cheapest_first_minimum_wins() {
        let best = select_cheapest(vec![
            offer("first", 499.0),
            offer("pricier", 899.0),
            offer("second", 499.0),
        ])
        .unwrap();
        assert_eq!(best.name, "first");
    }

    #[test]
    fn test_select_cheapest_empty() {
        assert!(select_cheapest(Vec::new()).is_none());
    }
}
