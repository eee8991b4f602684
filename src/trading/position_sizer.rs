//! Position sizing from a risk budget and market-regime tier.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

/// Result of a sizing calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingResult {
    /// Capital multiplier derived from the trend tier
    pub trend_factor: Decimal,

    /// floor(capital x trend_factor)
    pub adjusted_capital: Decimal,

    /// floor(adjusted_capital x risk_pct / 100), the money at risk
    pub risk_amount: Decimal,

    /// |entry - stop|, the per-share risk
    pub sl_dist: Decimal,

    /// Whole shares to buy; fractional risk is discarded, not rounded
    pub total_qty: i64,

    /// total_qty / 3, one tranche of a three-way scale-in
    pub unit_qty: i64,
}

/// Deterministic position-size calculator. Pure: no I/O, no state.
pub struct PositionSizer;

impl PositionSizer {
    /// Calculate a recommended position size.
    ///
    /// The trend tier scales deployable capital: tier 3 commits all of it,
    /// tier 2 and 1 commit roughly two thirds and one third (fixed
    /// constants, not exact fractions).
    ///
    /// Returns `None` when entry equals stop; a zero stop distance cannot
    /// be sized, and callers must distinguish that from "not yet computed".
    pub fn size(
        capital: Decimal,
        risk_pct: Decimal,
        entry: Decimal,
        stop: Decimal,
        trend_tier: u8,
    ) -> Option<SizingResult> {
        let trend_factor = match trend_tier {
            3 => dec!(1.0),
            2 => dec!(0.6666),
            1 => dec!(0.3333),
            _ => dec!(1.0),
        };

        let adjusted_capital = (capital * trend_factor).floor();
        let risk_amount = (adjusted_capital * risk_pct / dec!(100)).floor();

        let sl_dist = (entry - stop).abs();
        if sl_dist.is_zero() {
            return None;
        }

        let total_qty = (risk_amount / sl_dist).floor().to_i64().unwrap_or(0);
        let unit_qty = total_qty / 3;

        Some(SizingResult {
            trend_factor,
            adjusted_capital,
            risk_amount,
            sl_dist,
            total_qty,
            unit_qty,
        })
    }
}
