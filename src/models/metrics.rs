//! Report structs produced by the stats engine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mark-to-market view of one open trade.
///
/// Carries both R-multiple variants: `r_multiple_raw` is the plain price
/// move in risk units (the progress indicator), `r_multiple_net` is
/// fee-adjusted P&L per unit of money at risk (shown next to the fee
/// breakdown). They serve different display panels and are kept separate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPositionView {
    pub trade_id: i64,

    pub symbol: String,

    /// Listing name from the price oracle's sidecar, when known
    pub display_name: Option<String>,

    pub quantity: i64,

    pub entry_price: Decimal,

    /// Oracle price, or the entry price when the oracle was unavailable
    pub current_price: Decimal,

    // === Valuation ===
    /// current_price x quantity
    pub eval_amount: Decimal,

    /// One-sided flat fee on the evaluation leg
    pub fee: Decimal,

    /// Price move x quantity, before fees
    pub gross_pnl: Decimal,

    /// gross_pnl - fee
    pub net_pnl: Decimal,

    /// net_pnl / cost basis, in percent
    pub net_return_pct: Decimal,

    // === Risk units ===
    pub r_multiple_raw: Decimal,

    pub r_multiple_net: Decimal,
}

/// Aggregate view over a set of open trades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSummary {
    pub positions: Vec<OpenPositionView>,

    /// Sum of current_price x quantity
    pub total_eval_amount: Decimal,

    /// Sum of entry_price x quantity
    pub total_cost_amount: Decimal,

    pub total_fee: Decimal,

    pub total_net_pnl: Decimal,

    /// total_net_pnl / total_cost_amount in percent, 0 when nothing is held
    pub roi_pct: Decimal,
}

/// Aggregate view over a set of closed trades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedSummary {
    pub total_trades: usize,

    pub winning_trades: usize,

    /// Sum of realized P&L
    pub total_pnl: Decimal,

    /// Winners / total, in percent; 0 when there are no trades
    pub win_rate: f64,

    /// Mean recorded R-multiple; 0 when there are no trades
    pub avg_r_multiple: f64,
}

/// One point of the equity curve: cumulative realized P&L on top of the
/// account's initial balance, keyed by exit date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub exit_date: NaiveDate,

    pub equity: Decimal,
}
