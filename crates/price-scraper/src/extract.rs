//! Result extraction from rendered HTML.

use crate::error::ScrapeError;
use crate::profile::Selectors;
use crate::types::ResultEntry;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Parse a CSS selector, keeping the offending text in the error.
pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{e:?}"),
    })
}

/// Extract every result entry from `html`, in document order.
///
/// Containers missing a name, price or link are skipped. An empty vector means
/// either no containers matched or none of them were complete.
pub fn extract_entries(
    html: &str,
    selectors: &Selectors,
) -> Result<Vec<ResultEntry>, ScrapeError> {
    let container_sel = parse_selector(&selectors.container)?;
    let name_sel = parse_selector(&selectors.name)?;
    let price_sel = parse_selector(&selectors.price)?;
    let link_sel = parse_selector(&selectors.link)?;

    let document = Html::parse_document(html);
    let mut containers = 0usize;
    let mut entries = Vec::new();

    for (index, container) in document.select(&container_sel).enumerate() {
        containers += 1;
        match extract_entry(&container, &name_sel, &price_sel, &link_sel) {
            Some(entry) => entries.push(entry),
            None => debug!(index, "Skipping result entry with missing name, price or link"),
        }
    }

    debug!(containers, extracted = entries.len(), "Extracted result entries");
    Ok(entries)
}

fn extract_entry(
    container: &ElementRef<'_>,
    name_sel: &Selector,
    price_sel: &Selector,
    link_sel: &Selector,
) -> Option<ResultEntry> {
    let name = container
        .select(name_sel)
        .next()?
        .value()
        .attr("title")?
        .trim()
        .to_string();

    let raw_price = element_text(&container.select(price_sel).next()?);

    let link = container
        .select(link_sel)
        .next()?
        .value()
        .attr("href")?
        .trim()
        .to_string();

    Some(ResultEntry {
        name,
        raw_price,
        link,
    })
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SiteProfile;

    fn entry_html(title: &str, price: &str, href: &str) -> String {
        format!(
            r#"<div class="pr-gkzc8z-Carousel-scrollSnapChild">
                 <a href="{href}">
                   <h3 class="pr-kxc9l9" title="{title}">{title}</h3>
                   <span class="pr-2v77sd" data-testid="priceComponent">{price}</span>
                 </a>
               </div>"#
        )
    }

    #[test]
    fn test_extracts_entries_in_document_order() {
        let html = format!(
            "<html><body>{}{}</body></html>",
            entry_html(" Apple MacBook Air ", "10 500,00 kr", "/pl/1"),
            entry_html("Lenovo ThinkPad", "9 999,50 kr", "/pl/2"),
        );

        let entries = extract_entries(&html, &SiteProfile::pricerunner().selectors).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Apple MacBook Air");
        assert_eq!(entries[0].raw_price, "10 500,00 kr");
        assert_eq!(entries[0].link, "/pl/1");
        assert_eq!(entries[1].name, "Lenovo ThinkPad");
    }

    #[test]
    fn test_skips_entry_without_price_component() {
        let html = format!(
            r#"<html><body>
                 <div class="pr-gkzc8z-Carousel-scrollSnapChild">
                   <a href="/pl/9"><h3 class="pr-kxc9l9" title="No price"></h3>
                   <span class="pr-2v77sd">1 000 kr</span></a>
                 </div>
                 {}
               </body></html>"#,
            entry_html("Has price", "500 kr", "/pl/3"),
        );

        let entries = extract_entries(&html, &SiteProfile::pricerunner().selectors).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Has price");
    }

    #[test]
    fn test_skips_entry_without_title_attribute() {
        let html = r#"<div class="pr-gkzc8z-Carousel-scrollSnapChild">
                        <a href="/pl/4"><h3 class="pr-kxc9l9">Untitled</h3>
                        <span class="pr-2v77sd" data-testid="priceComponent">10 kr</span></a>
                      </div>"#;

        let entries = extract_entries(html, &SiteProfile::pricerunner().selectors).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_no_containers() {
        let html = "<html><body><p>Inga träffar</p></body></html>";
        let entries = extract_entries(html, &SiteProfile::pricerunner().selectors).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_invalid_selector() {
        let mut selectors = SiteProfile::pricerunner().selectors;
        selectors.container = "div[".into();

        let result = extract_entries("<html></html>", &selectors);
        assert!(matches!(result, Err(ScrapeError::InvalidSelector { .. })));
    }
}
