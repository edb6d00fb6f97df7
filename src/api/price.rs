use super::{decode, ApiClient};
use crate::error::{FetchError, FetchResult};
use std::collections::HashMap;

const SERVICE: &str = "price feed";
const ASSET: &str = "ethereum";
const CURRENCY: &str = "usd";

pub const PRICE_UNAVAILABLE: &str = "Unable to fetch Ethereum price at the moment.";

/// `{ "<asset>": { "<currency>": <price> } }`
type PriceQuote = HashMap<String, HashMap<String, f64>>;

impl ApiClient {
    /// Current ETH/USD price as a sentence
    pub async fn eth_price(&self) -> String {
        match self.try_eth_price().await {
            Ok(price) => format_price(price),
            Err(e) => {
                tracing::warn!(error = %e, "Ethereum price lookup failed");
                PRICE_UNAVAILABLE.to_string()
            }
        }
    }

    async fn try_eth_price(&self) -> FetchResult<f64> {
        let url = format!("{}/simple/price", self.endpoints.price_base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("ids", ASSET), ("vs_currencies", CURRENCY)]);

        let body = self.send(SERVICE, request).await?;
        let quote: PriceQuote = decode(SERVICE, &body)?;
        extract_price(&quote).ok_or(FetchError::MissingField { service: SERVICE })
    }
}

fn extract_price(quote: &PriceQuote) -> Option<f64> {
    quote.get(ASSET)?.get(CURRENCY).copied()
}

// f64's Display already drops the fraction for whole numbers: 2500.0 -> "2500".
fn format_price(price: f64) -> String {
    format!("Current Ethereum Price: ${}", price)
}
