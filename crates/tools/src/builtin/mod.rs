//! Built-in tools.

mod bitcoin_stats;
mod cheapest_option;
pub mod coingecko;
mod crypto_stats;

pub use bitcoin_stats::BitcoinStatsTool;
pub use cheapest_option::{CheapestOptionTool, NO_PRODUCTS_FOUND};
pub use coingecko::CoinGeckoClient;
pub use crypto_stats::CryptoStatsTool;
