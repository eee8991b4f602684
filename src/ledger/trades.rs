//! Trade ledger: trade rows, lifecycle transitions, and their cascading
//! effects on the account balance.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::models::{Trade, TradeStatus, TradeUpdate};
use crate::store::{Record, RecordStore, Table};
use crate::symbol::normalize_symbol;

use super::AccountLedger;

/// Owns trade rows. Close/update/delete reconcile realized P&L into the
/// account ledger; each of those is two separate table writes (Trades,
/// then Accounts) with no atomicity across them. A save that fails
/// between the two leaves the pair inconsistent.
#[derive(Clone)]
pub struct TradeLedger {
    store: Arc<dyn RecordStore>,
    accounts: AccountLedger,
}

impl TradeLedger {
    pub fn new(store: Arc<dyn RecordStore>, accounts: AccountLedger) -> Self {
        Self { store, accounts }
    }

    // ==================== Lifecycle ====================

    /// Record a new open trade and return its id.
    ///
    /// Ids are assigned as row count + 1; after deletions an id can be
    /// reused by a later insert.
    ///
    /// The caller supplies quantity, unit split, and risk amount. Sizing
    /// happened before this call, and the recorded risk reflects the
    /// actually entered quantity, not the sizer's recommendation.
    #[allow(clippy::too_many_arguments)]
    pub fn add(
        &self,
        account_id: &str,
        symbol: &str,
        strategy: &str,
        trend_score: u8,
        entry_price: Decimal,
        stop_loss: Decimal,
        quantity: i64,
        unit_quantity: i64,
        risk_amount: i64,
        entry_date: Option<NaiveDate>,
    ) -> Result<i64> {
        let mut records = self.store.load(Table::Trades)?;
        let trade_id = records.len() as i64 + 1;

        let trade = Trade {
            trade_id,
            account_id: account_id.to_string(),
            symbol: normalize_symbol(symbol),
            entry_date: entry_date.unwrap_or_else(|| Local::now().date_naive()),
            strategy: strategy.to_string(),
            trend_score,
            entry_price,
            stop_loss,
            quantity,
            unit_quantity,
            risk_amount,
            status: TradeStatus::Open,
            exit_date: None,
            exit_price: Decimal::ZERO,
            pnl: Decimal::ZERO,
            r_multiple: Decimal::ZERO,
        };

        records.push(trade.to_record());
        self.store.save(Table::Trades, &records)?;

        Ok(trade_id)
    }

    /// Close an open trade at the given exit price, dated today.
    /// Returns false when the id does not exist.
    pub fn close(&self, trade_id: i64, exit_price: Decimal) -> Result<bool> {
        self.close_on(trade_id, exit_price, Local::now().date_naive())
    }

    /// Close a trade with an explicit exit date.
    ///
    /// Computes realized P&L and the R-multiple (price move over stop
    /// distance, rounded to 2 decimals; 0 when the stop distance is 0),
    /// persists the row, then credits the account balance with the P&L
    /// exactly once.
    pub fn close_on(&self, trade_id: i64, exit_price: Decimal, exit_date: NaiveDate) -> Result<bool> {
        let mut records = self.store.load(Table::Trades)?;

        let Some(idx) = Self::position_of(&records, trade_id) else {
            return Ok(false);
        };

        let mut trade = Trade::from_record(&records[idx]);
        let pnl = trade.pnl_at(exit_price);

        trade.status = TradeStatus::Closed;
        trade.exit_price = exit_price;
        trade.exit_date = Some(exit_date);
        trade.pnl = pnl;
        trade.r_multiple = trade.r_multiple_at(exit_price).round_dp(2);

        records[idx] = trade.to_record();
        self.store.save(Table::Trades, &records)?;

        self.accounts.adjust_balance(&trade.account_id, pnl)?;

        Ok(true)
    }

    /// Apply a partial edit to a trade. Returns false when the id does not
    /// exist.
    ///
    /// A patched `pnl` is treated as a manual correction: the balance is
    /// adjusted by the old/new difference before the patch lands, so the
    /// account ends up reflecting the new value exactly once. Every other
    /// field is overwritten verbatim with no recomputation of dependents.
    pub fn update(&self, trade_id: i64, patch: &TradeUpdate) -> Result<bool> {
        let mut records = self.store.load(Table::Trades)?;

        let Some(idx) = Self::position_of(&records, trade_id) else {
            return Ok(false);
        };

        let mut trade = Trade::from_record(&records[idx]);

        if let Some(new_pnl) = patch.pnl {
            let diff = new_pnl - trade.pnl;
            if !diff.is_zero() {
                self.accounts.adjust_balance(&trade.account_id, diff)?;
            }
        }

        if let Some(symbol) = &patch.symbol {
            trade.symbol = normalize_symbol(symbol);
        }
        if let Some(entry_date) = patch.entry_date {
            trade.entry_date = entry_date;
        }
        if let Some(strategy) = &patch.strategy {
            trade.strategy = strategy.clone();
        }
        if let Some(trend_score) = patch.trend_score {
            trade.trend_score = trend_score;
        }
        if let Some(entry_price) = patch.entry_price {
            trade.entry_price = entry_price;
        }
        if let Some(stop_loss) = patch.stop_loss {
            trade.stop_loss = stop_loss;
        }
        if let Some(quantity) = patch.quantity {
            trade.quantity = quantity;
        }
        if let Some(unit_quantity) = patch.unit_quantity {
            trade.unit_quantity = unit_quantity;
        }
        if let Some(risk_amount) = patch.risk_amount {
            trade.risk_amount = risk_amount;
        }
        if let Some(status) = patch.status {
            trade.status = status;
        }
        if let Some(exit_date) = patch.exit_date {
            trade.exit_date = Some(exit_date);
        }
        if let Some(exit_price) = patch.exit_price {
            trade.exit_price = exit_price;
        }
        if let Some(pnl) = patch.pnl {
            trade.pnl = pnl;
        }
        if let Some(r_multiple) = patch.r_multiple {
            trade.r_multiple = r_multiple;
        }

        records[idx] = trade.to_record();
        self.store.save(Table::Trades, &records)?;

        Ok(true)
    }

    /// Delete a trade. A Closed trade with nonzero P&L has it reversed out
    /// of the account balance first. Unknown ids are a no-op.
    pub fn delete(&self, trade_id: i64) -> Result<()> {
        let mut records = self.store.load(Table::Trades)?;

        let Some(idx) = Self::position_of(&records, trade_id) else {
            debug!(trade_id, "delete of unknown trade, ignoring");
            return Ok(());
        };

        let trade = Trade::from_record(&records[idx]);
        if trade.status == TradeStatus::Closed && !trade.pnl.is_zero() {
            self.accounts.adjust_balance(&trade.account_id, -trade.pnl)?;
        }

        records.remove(idx);
        self.store.save(Table::Trades, &records)?;

        Ok(())
    }

    // ==================== Queries ====================

    /// Trades filtered by owner and/or status, in stored order. Numeric
    /// fields are coerced leniently at the storage boundary.
    pub fn list(
        &self,
        account_id: Option<&str>,
        status: Option<TradeStatus>,
    ) -> Result<Vec<Trade>> {
        let records = self.store.load(Table::Trades)?;

        Ok(records
            .iter()
            .map(Trade::from_record)
            .filter(|t| account_id.is_none_or(|id| t.account_id == id))
            .filter(|t| status.is_none_or(|s| t.status == s))
            .collect())
    }

    /// Look up one trade by id.
    pub fn get(&self, trade_id: i64) -> Result<Option<Trade>> {
        let records = self.store.load(Table::Trades)?;
        Ok(Self::position_of(&records, trade_id).map(|idx| Trade::from_record(&records[idx])))
    }

    /// Move every trade owned by `old_id` to `new_id`. Only reachable
    /// through the account-rename cascade; trades never change owners any
    /// other way.
    pub(crate) fn reassign_account(&self, old_id: &str, new_id: &str) -> Result<()> {
        let mut records = self.store.load(Table::Trades)?;

        let mut touched = false;
        for rec in records.iter_mut() {
            if rec.str_field("AccountID") == old_id {
                rec.set("AccountID", new_id);
                touched = true;
            }
        }

        if touched {
            self.store.save(Table::Trades, &records)?;
        }

        Ok(())
    }

    fn position_of(records: &[Record], trade_id: i64) -> Option<usize> {
        records
            .iter()
            .position(|r| r.int_field("TradeID") == trade_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    fn ledgers() -> (AccountLedger, TradeLedger) {
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        let accounts = AccountLedger::new(Arc::clone(&store), "KRW");
        let trades = TradeLedger::new(store, accounts.clone());
        (accounts, trades)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_default(trades: &TradeLedger, account: &str, qty: i64) -> i64 {
        trades
            .add(
                account,
                "005930",
                "breakout",
                3,
                dec!(10000),
                dec!(9200),
                qty,
                qty / 3,
                qty * 800,
                Some(date(2024, 3, 4)),
            )
            .unwrap()
    }

    #[test]
    fn test_add_assigns_row_count_ids() {
        let (_, trades) = ledgers();
        assert_eq!(add_default(&trades, "main", 10), 1);
        assert_eq!(add_default(&trades, "main", 20), 2);
        assert_eq!(add_default(&trades, "other", 30), 3);
    }

    #[test]
    fn test_add_records_open_trade_with_zeroed_exit_fields() {
        let (_, trades) = ledgers();
        let id = add_default(&trades, "main", 100);

        let trade = trades.get(id).unwrap().unwrap();
        assert_eq!(trade.status, TradeStatus::Open);
        assert_eq!(trade.exit_date, None);
        assert_eq!(trade.exit_price, Decimal::ZERO);
        assert_eq!(trade.pnl, Decimal::ZERO);
        assert_eq!(trade.r_multiple, Decimal::ZERO);
        assert_eq!(trade.risk_amount, 80000);
    }

    #[test]
    fn test_add_normalizes_symbol() {
        let (_, trades) = ledgers();
        let id = trades
            .add(
                "main",
                "5930",
                "",
                3,
                dec!(10000),
                dec!(9200),
                1,
                0,
                800,
                Some(date(2024, 3, 4)),
            )
            .unwrap();
        assert_eq!(trades.get(id).unwrap().unwrap().symbol, "005930");
    }

    #[test]
    fn test_close_sets_exit_fields_and_credits_balance() {
        let (accounts, trades) = ledgers();
        accounts.create("main", "KB", dec!(10000000)).unwrap();
        let id = add_default(&trades, "main", 100);

        let found = trades
            .close_on(id, dec!(10500), date(2024, 3, 20))
            .unwrap();
        assert!(found);

        let trade = trades.get(id).unwrap().unwrap();
        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.exit_price, dec!(10500));
        assert_eq!(trade.exit_date, Some(date(2024, 3, 20)));
        assert_eq!(trade.pnl, dec!(50000));
        // (10500 - 10000) / 800 = 0.625 -> 0.62 at 2 decimals (half-even)
        assert_eq!(trade.r_multiple, dec!(0.62));

        let account = accounts.get("main").unwrap().unwrap();
        assert_eq!(account.current_balance, dec!(10050000));
    }

    #[test]
    fn test_close_unknown_trade_reports_not_found() {
        let (_, trades) = ledgers();
        assert!(!trades.close(99, dec!(10000)).unwrap());
    }

    #[test]
    fn test_close_with_zero_stop_distance_records_zero_r() {
        let (accounts, trades) = ledgers();
        accounts.create("main", "KB", dec!(1000000)).unwrap();
        let id = trades
            .add(
                "main",
                "005930",
                "",
                3,
                dec!(10000),
                dec!(10000),
                10,
                3,
                0,
                Some(date(2024, 3, 4)),
            )
            .unwrap();

        trades.close_on(id, dec!(10500), date(2024, 3, 5)).unwrap();
        let trade = trades.get(id).unwrap().unwrap();
        assert_eq!(trade.r_multiple, Decimal::ZERO);
        assert_eq!(trade.pnl, dec!(5000));
    }

    #[test]
    fn test_close_then_delete_restores_balance() {
        let (accounts, trades) = ledgers();
        accounts.create("main", "KB", dec!(10000000)).unwrap();
        let id = add_default(&trades, "main", 100);

        let before = accounts.get("main").unwrap().unwrap().current_balance;
        trades.close_on(id, dec!(9500), date(2024, 3, 20)).unwrap();
        assert_eq!(
            accounts.get("main").unwrap().unwrap().current_balance,
            before - dec!(50000)
        );

        trades.delete(id).unwrap();
        assert_eq!(
            accounts.get("main").unwrap().unwrap().current_balance,
            before
        );
        assert!(trades.get(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_open_trade_does_not_touch_balance() {
        let (accounts, trades) = ledgers();
        accounts.create("main", "KB", dec!(1000000)).unwrap();
        let id = add_default(&trades, "main", 10);

        trades.delete(id).unwrap();
        assert_eq!(
            accounts.get("main").unwrap().unwrap().current_balance,
            dec!(1000000)
        );
    }

    #[test]
    fn test_delete_unknown_trade_is_noop() {
        let (_, trades) = ledgers();
        trades.delete(42).unwrap();
        assert!(trades.list(None, None).unwrap().is_empty());
    }

    #[test]
    fn test_update_pnl_patch_moves_balance_by_difference_once() {
        let (accounts, trades) = ledgers();
        accounts.create("main", "KB", dec!(1000000)).unwrap();
        let id = add_default(&trades, "main", 10);
        trades.close_on(id, dec!(10500), date(2024, 3, 20)).unwrap();

        // Close credited 5,000
        assert_eq!(
            accounts.get("main").unwrap().unwrap().current_balance,
            dec!(1005000)
        );

        let patch = TradeUpdate {
            pnl: Some(dec!(3000)),
            ..Default::default()
        };
        assert!(trades.update(id, &patch).unwrap());

        // Balance moved by exactly 3000 - 5000 = -2000
        assert_eq!(
            accounts.get("main").unwrap().unwrap().current_balance,
            dec!(1003000)
        );
        assert_eq!(trades.get(id).unwrap().unwrap().pnl, dec!(3000));

        // Deleting the corrected trade reverses the corrected pnl
        trades.delete(id).unwrap();
        assert_eq!(
            accounts.get("main").unwrap().unwrap().current_balance,
            dec!(1000000)
        );
    }

    #[test]
    fn test_update_does_not_recompute_dependents() {
        let (_, trades) = ledgers();
        let id = add_default(&trades, "main", 100);

        let patch = TradeUpdate {
            quantity: Some(50),
            ..Default::default()
        };
        trades.update(id, &patch).unwrap();

        let trade = trades.get(id).unwrap().unwrap();
        assert_eq!(trade.quantity, 50);
        // risk_amount keeps its recorded value; the caller owns recomputation
        assert_eq!(trade.risk_amount, 80000);
    }

    #[test]
    fn test_update_unknown_trade_reports_not_found() {
        let (_, trades) = ledgers();
        let patch = TradeUpdate {
            strategy: Some("revised".to_string()),
            ..Default::default()
        };
        assert!(!trades.update(99, &patch).unwrap());
    }

    #[test]
    fn test_list_filters_by_account_and_status() {
        let (_, trades) = ledgers();
        let a1 = add_default(&trades, "alpha", 10);
        add_default(&trades, "alpha", 20);
        add_default(&trades, "beta", 30);

        trades.close_on(a1, dec!(10500), date(2024, 3, 20)).unwrap();

        assert_eq!(trades.list(None, None).unwrap().len(), 3);
        assert_eq!(trades.list(Some("alpha"), None).unwrap().len(), 2);
        assert_eq!(
            trades
                .list(Some("alpha"), Some(TradeStatus::Open))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            trades
                .list(None, Some(TradeStatus::Closed))
                .unwrap()
                .len(),
            1
        );
        assert!(trades.list(Some("ghost"), None).unwrap().is_empty());
    }

    #[test]
    fn test_id_reuse_after_delete_is_the_known_hazard() {
        let (_, trades) = ledgers();
        let first = add_default(&trades, "main", 10);
        add_default(&trades, "main", 20);

        trades.delete(first).unwrap();
        // Row count dropped to 1, so the next insert reuses id 2
        let reused = add_default(&trades, "main", 30);
        assert_eq!(reused, 2);
        assert_eq!(trades.list(None, None).unwrap().len(), 2);
    }
}
