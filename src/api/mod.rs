//! Market-data boundary: the external price oracle and its name sidecar.

mod price_client;
mod types;

use anyhow::Result;
use rust_decimal::Decimal;

pub use price_client::PriceClient;
pub use types::{ListingEntry, QuoteResponse};

/// External price oracle. Failures are recoverable by contract: callers
/// fall back rather than propagating them as hard errors.
pub trait PriceOracle {
    /// Current market price for a (normalized) symbol.
    fn current_price(&self, symbol: &str) -> Result<Decimal>;

    /// Human-readable listing name for a symbol, when the oracle knows one.
    fn display_name(&self, symbol: &str) -> Option<String>;
}
