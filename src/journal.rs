//! The journal service object: one instance per session, passed by
//! reference to every operation. No ambient singleton.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::Result;
use crate::ledger::{AccountLedger, TradeLedger};
use crate::metrics::StatsEngine;
use crate::store::RecordStore;
use crate::trading::JournalConfig;

/// Wires the record store and config into the ledgers and stats engine.
///
/// The store backend is whatever the presentation layer chose (flat file,
/// memory, or a remote sheet service implementing [`RecordStore`]); the
/// core is transparent to the choice.
pub struct Journal {
    config: JournalConfig,
    pub accounts: AccountLedger,
    pub trades: TradeLedger,
    pub stats: StatsEngine,
}

impl Journal {
    pub fn new(store: Arc<dyn RecordStore>, config: JournalConfig) -> Self {
        let accounts = AccountLedger::new(Arc::clone(&store), config.currency.clone());
        let trades = TradeLedger::new(store, accounts.clone());
        let stats = StatsEngine::new(&config);

        Self {
            config,
            accounts,
            trades,
            stats,
        }
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Rename an account, cascading the id to its trades, and override its
    /// balance. See [`AccountLedger::rename_and_rebalance`].
    pub fn rename_account(&self, old_id: &str, new_id: &str, new_balance: Decimal) -> Result<()> {
        self.accounts
            .rename_and_rebalance(old_id, new_id, new_balance, &self.trades)
    }

    /// Available cash for an account: balance minus open cost basis.
    pub fn deposit(&self, account_id: &str) -> Result<Option<Decimal>> {
        self.accounts.deposit(account_id, &self.trades)
    }
}
