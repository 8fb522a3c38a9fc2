//! Cheapest-price lookup on PriceRunner, driven through a real browser.

use crate::args::parse_arguments;
use crate::error::ToolError;
use crate::types::{Tool, ToolDefinition};
use async_trait::async_trait;
use price_scraper::{NormalizedOffer, PriceScraper, SearchRequest};
use serde::Deserialize;

const TOOL_NAME: &str = "get_cheapest_option";

/// Returned when the search yields no usable offer.
pub const NO_PRODUCTS_FOUND: &str = "No products found.";

/// Finds the cheapest listed offer for a product.
pub struct CheapestOptionTool {
    scraper: PriceScraper,
}

#[derive(Deserialize)]
struct CheapestOptionArgs {
    product_name: String,
}

impl CheapestOptionTool {
    pub fn new(scraper: PriceScraper) -> Self {
        Self { scraper }
    }

    fn format_offer(&self, offer: &NormalizedOffer) -> String {
        format!(
            "\n\nCheapest Option:\nName: {}\nPrice: {:.2} {}\nLink: {}\nFetched using {}.",
            offer.name,
            offer.price,
            self.scraper.profile().currency_suffix,
            offer.link,
            TOOL_NAME
        )
    }
}

#[async_trait]
impl Tool for CheapestOptionTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            TOOL_NAME,
            "Find the cheapest offer for a product on PriceRunner. Returns the product name, price and a link.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "product_name": {
                        "type": "string",
                        "description": "Product to search for (e.g., 'macbook air 13')"
                    }
                },
                "required": ["product_name"]
            }),
        )
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: CheapestOptionArgs = parse_arguments(arguments)?;
        let request = SearchRequest::new(&args.product_name)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        match self.scraper.find_cheapest(&request).await? {
            Some(offer) => Ok(self.format_offer(&offer)),
            None => Ok(NO_PRODUCTS_FOUND.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use price_scraper::{BrowserLauncher, BrowserSession, ScrapeError, WaitPolicy};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const RESULTS_PAGE: &str = r#"<html><body>
        <div class="pr-gkzc8z-Carousel-scrollSnapChild">
          <a href="/pl/1-100/Mobiltelefoner/Phone-A"><h3 class="pr-kxc9l9" title="Phone A">Phone A</h3>
          <span class="pr-2v77sd" data-testid="priceComponent">10&nbsp;500,00&nbsp;kr</span></a>
        </div>
        <div class="pr-gkzc8z-Carousel-scrollSnapChild">
          <a href="/pl/1-200/Mobiltelefoner/Phone-B"><h3 class="pr-kxc9l9" title="Phone B">Phone B</h3>
          <span class="pr-2v77sd" data-testid="priceComponent">9&nbsp;999,50&nbsp;kr</span></a>
        </div>
        <div class="pr-gkzc8z-Carousel-scrollSnapChild">
          <a href="/pl/1-300/Mobiltelefoner/Phone-C"><h3 class="pr-kxc9l9" title="Phone C">Phone C</h3>
          <span class="pr-2v77sd" data-testid="priceComponent">12 000 kr</span></a>
        </div>
    </body></html>"#;

    struct StaticPage {
        html: &'static str,
        marker_present: bool,
        closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BrowserLauncher for StaticPage {
        async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScrapeError> {
            Ok(Box::new(StaticSession {
                html: self.html,
                marker_present: self.marker_present,
                closes: self.closes.clone(),
            }))
        }
    }

    struct StaticSession {
        html: &'static str,
        marker_present: bool,
        closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BrowserSession for StaticSession {
        async fn navigate(&self, _url: &str) -> Result<(), ScrapeError> {
            Ok(())
        }

        async fn click_button_with_text(&self, _label: &str) -> Result<bool, ScrapeError> {
            Ok(false)
        }

        async fn has_element(&self, _selector: &str) -> Result<bool, ScrapeError> {
            Ok(self.marker_present)
        }

        async fn html(&self) -> Result<String, ScrapeError> {
            Ok(self.html.to_string())
        }

        async fn close(self: Box<Self>) -> Result<(), ScrapeError> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn tool(html: &'static str, marker_present: bool) -> (CheapestOptionTool, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let launcher = StaticPage {
            html,
            marker_present,
            closes: closes.clone(),
        };
        let waits = WaitPolicy {
            consent_timeout: Duration::from_millis(20),
            results_timeout: Duration::from_millis(50),
            poll_interval: Duration::from_millis(5),
            settle_delay: Duration::ZERO,
        };
        let scraper = PriceScraper::new(Arc::new(launcher)).with_waits(waits);
        (CheapestOptionTool::new(scraper), closes)
    }

    #[tokio::test]
    async fn test_formats_cheapest_offer() {
        let (tool, closes) = tool(RESULTS_PAGE, true);

        let output = tool
            .execute(r#"{"product_name": "phone"}"#)
            .await
            .unwrap();

        assert_eq!(
            output,
            "\n\nCheapest Option:\nName: Phone B\nPrice: 9999.50 kr\nLink: https://www.pricerunner.se/pl/1-200/Mobiltelefoner/Phone-B\nFetched using get_cheapest_option."
        );
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_containers() {
        let (tool, _) = tool("<html><body><p>Inga träffar</p></body></html>", true);

        let output = tool.execute("{'product_name': 'xyzzy'}").await.unwrap();
        assert_eq!(output, "No products found.");
    }

    #[tokio::test]
    async fn test_results_never_render() {
        let (tool, closes) = tool(RESULTS_PAGE, false);

        let output = tool.execute(r#"{"product_name": "phone"}"#).await.unwrap();
        assert_eq!(output, NO_PRODUCTS_FOUND);
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_input() {
        let (tool, closes) = tool(RESULTS_PAGE, true);

        let result = tool.execute("product_name=phone").await;
        assert!(matches!(result, Err(ToolError::InvalidInput { .. })));
        assert_eq!(closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_product_name() {
        let (tool, _) = tool(RESULTS_PAGE, true);

        let result = tool.execute(r#"{"product_name": ""}"#).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
