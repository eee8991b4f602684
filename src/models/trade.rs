//! Trade model: one journaled entry/exit with its risk parameters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::Record;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trade lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "Open",
            TradeStatus::Closed => "Closed",
        }
    }

    /// Anything other than the literal "Closed" reads as Open.
    pub fn parse(s: &str) -> Self {
        if s == "Closed" {
            TradeStatus::Closed
        } else {
            TradeStatus::Open
        }
    }
}

/// A single journaled trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Ledger-assigned integer id
    pub trade_id: i64,

    /// Owning account
    pub account_id: String,

    /// Normalized ticker/code
    pub symbol: String,

    /// Entry date
    pub entry_date: NaiveDate,

    /// Free-text strategy note/tag
    pub strategy: String,

    /// Market-regime tier {1,2,3}; used only to size the position at entry
    pub trend_score: u8,

    /// Entry price per share
    pub entry_price: Decimal,

    /// Stop-loss price
    pub stop_loss: Decimal,

    /// Share count (whole shares)
    pub quantity: i64,

    /// quantity / 3, supports a three-way scale-in discipline
    pub unit_quantity: i64,

    /// quantity x |entry - stop| computed at record time
    pub risk_amount: i64,

    /// Lifecycle state
    pub status: TradeStatus,

    /// Exit date, None while open
    pub exit_date: Option<NaiveDate>,

    /// Exit price, 0 while open
    pub exit_price: Decimal,

    /// Realized P&L, 0 while open
    pub pnl: Decimal,

    /// (exit - entry) / |entry - stop| rounded to 2 decimals, 0 while open
    pub r_multiple: Decimal,
}

impl Trade {
    /// Capital deployed by this trade: entry price x quantity.
    pub fn cost_basis(&self) -> Decimal {
        self.entry_price * Decimal::from(self.quantity)
    }

    /// Distance between entry and stop, the per-share risk.
    pub fn stop_distance(&self) -> Decimal {
        (self.entry_price - self.stop_loss).abs()
    }

    /// P&L if the whole position were closed at the given price.
    pub fn pnl_at(&self, price: Decimal) -> Decimal {
        (price - self.entry_price) * Decimal::from(self.quantity)
    }

    /// Price move at the given price expressed in risk units (R).
    /// Zero stop distance yields 0 rather than dividing by zero.
    pub fn r_multiple_at(&self, price: Decimal) -> Decimal {
        let dist = self.stop_distance();
        if dist.is_zero() {
            Decimal::ZERO
        } else {
            (price - self.entry_price) / dist
        }
    }

    pub fn from_record(rec: &Record) -> Self {
        Self {
            trade_id: rec.int_field("TradeID"),
            account_id: rec.str_field("AccountID").to_string(),
            symbol: rec.str_field("Symbol").to_string(),
            entry_date: parse_date(rec.str_field("EntryDate")).unwrap_or_default(),
            strategy: rec.str_field("Strategy").to_string(),
            trend_score: rec.int_field("TrendScore") as u8,
            entry_price: rec.decimal_field("EntryPrice"),
            stop_loss: rec.decimal_field("StopLoss"),
            quantity: rec.int_field("Quantity"),
            unit_quantity: rec.int_field("UnitQuantity"),
            risk_amount: rec.int_field("RiskAmount"),
            status: TradeStatus::parse(rec.str_field("Status")),
            exit_date: parse_date(rec.str_field("ExitDate")),
            exit_price: rec.decimal_field("ExitPrice"),
            pnl: rec.decimal_field("PnL"),
            r_multiple: rec.decimal_field("R_Multiple"),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut rec = Record::new();
        rec.set("TradeID", self.trade_id);
        rec.set("AccountID", &self.account_id);
        rec.set("Symbol", &self.symbol);
        rec.set("EntryDate", self.entry_date.format(DATE_FORMAT));
        rec.set("Strategy", &self.strategy);
        rec.set("TrendScore", self.trend_score);
        rec.set("EntryPrice", self.entry_price);
        rec.set("StopLoss", self.stop_loss);
        rec.set("Quantity", self.quantity);
        rec.set("UnitQuantity", self.unit_quantity);
        rec.set("RiskAmount", self.risk_amount);
        rec.set("Status", self.status.as_str());
        rec.set(
            "ExitDate",
            self.exit_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        );
        rec.set("ExitPrice", self.exit_price);
        rec.set("PnL", self.pnl);
        rec.set("R_Multiple", self.r_multiple);
        rec
    }
}

/// Lenient date read: blank is None (the normal open-trade shape),
/// anything unparseable is None with a warning.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(d) => Some(d),
        Err(_) => {
            warn!(value = raw, "malformed date field, treating as unset");
            None
        }
    }
}

/// Partial patch for `TradeLedger::update`. Fields left as `None` are
/// untouched; set fields are written verbatim with no recomputation of
/// dependent fields. Editing `quantity` does not refresh `risk_amount` or
/// `pnl`; the caller owns that.
#[derive(Debug, Clone, Default)]
pub struct TradeUpdate {
    pub symbol: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub strategy: Option<String>,
    pub trend_score: Option<u8>,
    pub entry_price: Option<Decimal>,
    pub stop_loss: Option<Decimal>,
    pub quantity: Option<i64>,
    pub unit_quantity: Option<i64>,
    pub risk_amount: Option<i64>,
    pub status: Option<TradeStatus>,
    pub exit_date: Option<NaiveDate>,
    pub exit_price: Option<Decimal>,
    pub pnl: Option<Decimal>,
    pub r_multiple: Option<Decimal>,
}
