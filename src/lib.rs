//! Personal trading journal core: trade ledger, risk-budget position
//! sizing, and performance statistics.
//!
//! The crate is a library invoked by a presentation layer. It owns:
//! - Account and trade ledgers with balance reconciliation
//! - Deterministic position sizing from capital, risk percent, and a
//!   market-regime trend tier
//! - Performance stats (win rate, realized P&L, R-multiples, equity curve)
//!
//! Persistence and market data are external collaborators behind the
//! [`store::RecordStore`] and [`api::PriceOracle`] traits.
//!
//! One session, one writer: every mutation is a whole-table
//! read-modify-write with no locking. Two concurrent sessions can clobber
//! each other; putting a single-writer queue in front is the caller's job.

pub mod api;
pub mod error;
pub mod journal;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod store;
pub mod symbol;
pub mod trading;

pub use api::{PriceClient, PriceOracle};
pub use error::JournalError;
pub use journal::Journal;
pub use ledger::{AccountLedger, TradeLedger};
pub use metrics::StatsEngine;
pub use models::{
    Account, ClosedSummary, EquityPoint, OpenPositionView, OpenSummary, Trade, TradeStatus,
    TradeUpdate,
};
pub use store::{CsvStore, MemoryStore, Record, RecordStore, Table};
pub use trading::{JournalConfig, PositionSizer, SizingResult};
