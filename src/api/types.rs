//! Response types for the market-data service.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Quote response from the /quote endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub symbol: String,
    /// Last close price
    pub close: Decimal,
}

/// One listing entry from the /listing snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    pub code: String,
    pub name: String,
}
