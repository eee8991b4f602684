//! Account model: one brokerage account tracked by the journal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A brokerage account. The id doubles as the user-facing display name,
/// so renaming an account is a key migration that cascades to its trades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier (primary key, also shown in the UI)
    pub account_id: String,

    /// Free-text broker label
    pub broker: String,

    /// Currency label; the journal is single-currency
    pub currency: String,

    /// Capital at account creation, immutable; equity-curve baseline
    pub initial_balance: Decimal,

    /// Live balance, mutated only by realized P&L deltas
    pub current_balance: Decimal,
}

impl Account {
    pub fn from_record(rec: &Record) -> Self {
        Self {
            account_id: rec.str_field("AccountID").to_string(),
            broker: rec.str_field("Broker").to_string(),
            currency: rec.str_field("Currency").to_string(),
            initial_balance: rec.decimal_field("InitialBalance"),
            current_balance: rec.decimal_field("CurrentBalance"),
        }
    }

    pub fn to_record(&self) -> Record {
        let mut rec = Record::new();
        rec.set("AccountID", &self.account_id);
        rec.set("Broker", &self.broker);
        rec.set("Currency", &self.currency);
        rec.set("InitialBalance", self.initial_balance);
        rec.set("CurrentBalance", self.current_balance);
        rec
    }
}
