//! Account and trade ledgers over the record store.

mod accounts;
mod trades;

pub use accounts::AccountLedger;
pub use trades::TradeLedger;
