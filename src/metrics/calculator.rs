//! Stats engine: mark-to-market summaries, realized performance, equity curve.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use statrs::statistics::Statistics;
use tracing::warn;

use crate::api::PriceOracle;
use crate::models::{ClosedSummary, EquityPoint, OpenPositionView, OpenSummary, Trade, TradeStatus};
use crate::trading::JournalConfig;

/// Derives aggregate metrics from trade sets the caller has already scoped
/// (one account or all, open or closed).
pub struct StatsEngine {
    fee_rate: Decimal,
}

impl StatsEngine {
    pub fn new(config: &JournalConfig) -> Self {
        Self {
            fee_rate: config.fee_rate,
        }
    }

    /// Mark-to-market summary of open trades.
    ///
    /// Each position is valued at the oracle price; when the oracle fails
    /// (or reports a non-positive price) the trade is valued at its entry
    /// price instead, with a warning. The fee is one-sided: a flat
    /// percentage of the evaluation leg only.
    pub fn open_summary(&self, trades: &[Trade], oracle: &dyn PriceOracle) -> OpenSummary {
        let mut positions = Vec::with_capacity(trades.len());
        let mut total_eval_amount = Decimal::ZERO;
        let mut total_cost_amount = Decimal::ZERO;
        let mut total_fee = Decimal::ZERO;
        let mut total_net_pnl = Decimal::ZERO;

        for trade in trades {
            let current_price = match oracle.current_price(&trade.symbol) {
                Ok(price) if price > Decimal::ZERO => price,
                Ok(_) | Err(_) => {
                    warn!(
                        symbol = %trade.symbol,
                        "price unavailable, valuing at entry price"
                    );
                    trade.entry_price
                }
            };

            let qty = Decimal::from(trade.quantity);
            let cost = trade.cost_basis();
            let eval_amount = current_price * qty;
            let fee = eval_amount * self.fee_rate;
            let gross_pnl = trade.pnl_at(current_price);
            let net_pnl = gross_pnl - fee;

            let net_return_pct = if cost.is_zero() {
                Decimal::ZERO
            } else {
                net_pnl / cost * Decimal::ONE_HUNDRED
            };

            let risk_total = trade.stop_distance() * qty;
            let r_multiple_net = if risk_total.is_zero() {
                Decimal::ZERO
            } else {
                net_pnl / risk_total
            };

            total_eval_amount += eval_amount;
            total_cost_amount += cost;
            total_fee += fee;
            total_net_pnl += net_pnl;

            positions.push(OpenPositionView {
                trade_id: trade.trade_id,
                symbol: trade.symbol.clone(),
                display_name: oracle.display_name(&trade.symbol),
                quantity: trade.quantity,
                entry_price: trade.entry_price,
                current_price,
                eval_amount,
                fee,
                gross_pnl,
                net_pnl,
                net_return_pct,
                r_multiple_raw: trade.r_multiple_at(current_price),
                r_multiple_net,
            });
        }

        let roi_pct = if total_cost_amount.is_zero() {
            Decimal::ZERO
        } else {
            total_net_pnl / total_cost_amount * Decimal::ONE_HUNDRED
        };

        OpenSummary {
            positions,
            total_eval_amount,
            total_cost_amount,
            total_fee,
            total_net_pnl,
            roi_pct,
        }
    }

    /// Realized performance over closed trades.
    pub fn closed_summary(&self, trades: &[Trade]) -> ClosedSummary {
        let total_trades = trades.len();
        let winning_trades = trades.iter().filter(|t| t.pnl > Decimal::ZERO).count();
        let total_pnl: Decimal = trades.iter().map(|t| t.pnl).sum();

        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        let avg_r_multiple = if total_trades > 0 {
            trades
                .iter()
                .map(|t| t.r_multiple.to_f64().unwrap_or(0.0))
                .collect::<Vec<_>>()
                .mean()
        } else {
            0.0
        };

        ClosedSummary {
            total_trades,
            winning_trades,
            total_pnl,
            win_rate,
            avg_r_multiple,
        }
    }

    /// Equity curve: cumulative realized P&L on top of the account's
    /// initial balance, one point per closed trade, ascending by exit
    /// date. Same-day closes keep their ledger order.
    pub fn equity_curve(&self, trades: &[Trade], initial_balance: Decimal) -> Vec<EquityPoint> {
        let mut closed: Vec<&Trade> = trades
            .iter()
            .filter(|t| t.status == TradeStatus::Closed && t.exit_date.is_some())
            .collect();
        closed.sort_by_key(|t| t.exit_date);

        let mut equity = initial_balance;
        closed
            .into_iter()
            .map(|t| {
                equity += t.pnl;
                EquityPoint {
                    exit_date: t.exit_date.expect("filtered to dated closes"),
                    equity,
                }
            })
            .collect()
    }
}
