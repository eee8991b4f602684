//! Data models for accounts, trades, and performance reports.

mod account;
mod metrics;
mod trade;

pub use account::Account;
pub use metrics::{ClosedSummary, EquityPoint, OpenPositionView, OpenSummary};
pub use trade::{Trade, TradeStatus, TradeUpdate};
