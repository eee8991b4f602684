//! Record store boundary: generic load/save of the two journal tables.
//!
//! Every backend exposes the same snapshot contract: `load` returns the
//! whole table as an ordered list of field->value records, `save`
//! overwrites the table entirely. The core never sees which backend is
//! behind the trait (flat file, in-process memory, or a remote sheet
//! service maintained outside this crate).

mod csv;
mod memory;

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::warn;

pub use csv::CsvStore;
pub use memory::MemoryStore;

/// The two tables the journal persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Accounts,
    Trades,
}

impl Table {
    /// Backend-visible table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Accounts => "Accounts",
            Table::Trades => "Trades",
        }
    }

    /// Column set, in persisted order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Accounts => &[
                "AccountID",
                "Broker",
                "Currency",
                "InitialBalance",
                "CurrentBalance",
            ],
            Table::Trades => &[
                "TradeID",
                "AccountID",
                "Symbol",
                "EntryDate",
                "Strategy",
                "TrendScore",
                "EntryPrice",
                "StopLoss",
                "Quantity",
                "UnitQuantity",
                "RiskAmount",
                "Status",
                "ExitDate",
                "ExitPrice",
                "PnL",
                "R_Multiple",
            ],
        }
    }
}

/// A single row: field name -> raw string value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field from anything displayable.
    pub fn set(&mut self, field: &str, value: impl ToString) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    /// Raw string value, empty if the field is absent.
    pub fn str_field(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Lenient numeric read: blank or missing coerces to zero silently,
    /// anything else malformed coerces to zero with a warning so corrupt
    /// rows are surfaced rather than swallowed.
    pub fn decimal_field(&self, field: &str) -> Decimal {
        let raw = self.str_field(field).trim();
        if raw.is_empty() {
            return Decimal::ZERO;
        }
        match raw.parse::<Decimal>() {
            Ok(v) => v,
            Err(_) => {
                warn!(field, value = raw, "malformed numeric field, coercing to 0");
                Decimal::ZERO
            }
        }
    }

    /// Lenient integer read; fractional values truncate toward zero.
    pub fn int_field(&self, field: &str) -> i64 {
        self.decimal_field(field).trunc().to_i64().unwrap_or(0)
    }
}

/// Snapshot persistence contract shared by all backends.
pub trait RecordStore: Send + Sync {
    /// Load the whole table. A table that does not exist yet loads empty.
    fn load(&self, table: Table) -> anyhow::Result<Vec<Record>>;

    /// Overwrite the whole table with the given rows.
    fn save(&self, table: Table, records: &[Record]) -> anyhow::Result<()>;
}
