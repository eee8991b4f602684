//! HTTP client for the market-data service (price quotes + listing names).

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::symbol::normalize_symbol;

use super::types::{ListingEntry, QuoteResponse};
use super::PriceOracle;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the external price service.
///
/// The listing snapshot backing `display_name` is fetched once per process
/// on first successful use and never refreshed; names can go stale for the
/// life of the process.
pub struct PriceClient {
    client: Client,
    base_url: String,
    listing: Mutex<Option<HashMap<String, String>>>,
}

impl PriceClient {
    /// Create a client against the given service base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            listing: Mutex::new(None),
        })
    }

    fn fetch_listing(&self) -> Result<HashMap<String, String>> {
        let url = format!("{}/listing", self.base_url);
        debug!(url = %url, "fetching listing snapshot");

        let response = self
            .client
            .get(&url)
            .send()
            .context("failed to fetch listing")?;

        if !response.status().is_success() {
            anyhow::bail!("listing request failed: {}", response.status());
        }

        let entries: Vec<ListingEntry> =
            response.json().context("failed to parse listing response")?;

        Ok(entries.into_iter().map(|e| (e.code, e.name)).collect())
    }
}

impl PriceOracle for PriceClient {
    fn current_price(&self, symbol: &str) -> Result<Decimal> {
        let symbol = normalize_symbol(symbol);
        let url = format!("{}/quote?symbol={}", self.base_url, symbol);
        debug!(url = %url, "fetching quote");

        let response = self
            .client
            .get(&url)
            .send()
            .context("failed to fetch quote")?;

        if !response.status().is_success() {
            anyhow::bail!("quote request failed for {}: {}", symbol, response.status());
        }

        let quote: QuoteResponse = response.json().context("failed to parse quote response")?;
        Ok(quote.close)
    }

    fn display_name(&self, symbol: &str) -> Option<String> {
        let symbol = normalize_symbol(symbol);
        let mut listing = self.listing.lock().expect("listing lock poisoned");

        if listing.is_none() {
            match self.fetch_listing() {
                Ok(map) => *listing = Some(map),
                Err(err) => {
                    warn!(error = %err, "listing snapshot unavailable");
                    return None;
                }
            }
        }

        listing.as_ref().and_then(|map| map.get(&symbol).cloned())
    }
}
