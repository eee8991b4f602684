//! Journal configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for the journal core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    /// One-sided flat fee applied to the evaluation leg (0.0023 = 0.23%)
    pub fee_rate: Decimal,

    /// Currency label stamped on new accounts; the journal is single-currency
    pub currency: String,

    /// Default risk budget per trade, as a percent of adjusted capital
    pub default_risk_pct: Decimal,

    /// Base URL of the market-data service
    pub price_api_base: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            fee_rate: dec!(0.0023),        // 0.23% of notional
            currency: "KRW".to_string(),
            default_risk_pct: dec!(2.0),   // 2% of adjusted capital
            price_api_base: "http://localhost:8721".to_string(),
        }
    }
}
