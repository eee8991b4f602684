//! Account ledger: balance state and account lifecycle.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{JournalError, Result};
use crate::models::{Account, TradeStatus};
use crate::store::{RecordStore, Table};

use super::TradeLedger;

/// Owns account rows and their balance reconciliation. Every operation is
/// a full read-modify-write of the Accounts table; see the crate docs for
/// the single-writer assumption.
#[derive(Clone)]
pub struct AccountLedger {
    store: Arc<dyn RecordStore>,
    currency: String,
}

impl AccountLedger {
    /// Create a ledger over the given store. `currency` is stamped on new
    /// accounts; the journal is single-currency.
    pub fn new(store: Arc<dyn RecordStore>, currency: impl Into<String>) -> Self {
        Self {
            store,
            currency: currency.into(),
        }
    }

    /// All accounts, in stored order.
    pub fn list(&self) -> Result<Vec<Account>> {
        let records = self.store.load(Table::Accounts)?;
        Ok(records.iter().map(Account::from_record).collect())
    }

    /// Look up one account by id.
    pub fn get(&self, account_id: &str) -> Result<Option<Account>> {
        Ok(self
            .list()?
            .into_iter()
            .find(|a| a.account_id == account_id))
    }

    /// Create an account. The opening balance becomes both the immutable
    /// `initial_balance` and the live `current_balance`.
    pub fn create(&self, account_id: &str, broker: &str, initial_balance: Decimal) -> Result<()> {
        let mut records = self.store.load(Table::Accounts)?;

        if records.iter().any(|r| r.str_field("AccountID") == account_id) {
            return Err(JournalError::DuplicateAccount(account_id.to_string()));
        }

        let account = Account {
            account_id: account_id.to_string(),
            broker: broker.to_string(),
            currency: self.currency.clone(),
            initial_balance,
            current_balance: initial_balance,
        };
        records.push(account.to_record());
        self.store.save(Table::Accounts, &records)?;

        Ok(())
    }

    /// Rename an account and override its balance in one edit.
    ///
    /// The id change cascades to every trade owned by `old_id` before the
    /// account row itself is renamed. `new_balance` is written as a full
    /// override, independent of any P&L reconciliation: the manual "fix
    /// the number" edit, not a delta. The trade cascade and the account
    /// save are separate table writes with no atomicity between them.
    pub fn rename_and_rebalance(
        &self,
        old_id: &str,
        new_id: &str,
        new_balance: Decimal,
        trades: &TradeLedger,
    ) -> Result<()> {
        let mut records = self.store.load(Table::Accounts)?;

        let idx = records
            .iter()
            .position(|r| r.str_field("AccountID") == old_id)
            .ok_or_else(|| JournalError::AccountNotFound(old_id.to_string()))?;

        if old_id != new_id {
            if records.iter().any(|r| r.str_field("AccountID") == new_id) {
                return Err(JournalError::DuplicateAccount(new_id.to_string()));
            }
            trades.reassign_account(old_id, new_id)?;
        }

        let mut account = Account::from_record(&records[idx]);
        account.account_id = new_id.to_string();
        account.current_balance = new_balance;
        records[idx] = account.to_record();
        self.store.save(Table::Accounts, &records)?;

        Ok(())
    }

    /// Remove an account row unconditionally. Trades owned by the id are
    /// not cascade-deleted; they stay queryable under the deleted id.
    pub fn delete(&self, account_id: &str) -> Result<()> {
        let mut records = self.store.load(Table::Accounts)?;
        records.retain(|r| r.str_field("AccountID") != account_id);
        self.store.save(Table::Accounts, &records)?;
        Ok(())
    }

    /// Apply a realized P&L delta to the live balance. Unknown ids are a
    /// silent no-op.
    pub fn adjust_balance(&self, account_id: &str, delta: Decimal) -> Result<()> {
        let mut records = self.store.load(Table::Accounts)?;

        let Some(idx) = records
            .iter()
            .position(|r| r.str_field("AccountID") == account_id)
        else {
            debug!(account_id, "balance adjustment for unknown account, ignoring");
            return Ok(());
        };

        let mut account = Account::from_record(&records[idx]);
        account.current_balance += delta;
        records[idx] = account.to_record();
        self.store.save(Table::Accounts, &records)?;

        Ok(())
    }

    /// Available cash: current balance minus capital deployed in open
    /// trades. Derived at read time, never stored. `None` when the account
    /// does not exist.
    pub fn deposit(&self, account_id: &str, trades: &TradeLedger) -> Result<Option<Decimal>> {
        let Some(account) = self.get(account_id)? else {
            return Ok(None);
        };

        let invested: Decimal = trades
            .list(Some(account_id), Some(TradeStatus::Open))?
            .iter()
            .map(|t| t.cost_basis())
            .sum();

        Ok(Some(account.current_balance - invested))
    }
}
