//! In-process backend, used by tests and as a scratch journal.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use super::{Record, RecordStore, Table};

/// Memory-backed record store. Snapshot semantics match the file backend:
/// `save` replaces the whole table.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<&'static str, Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, table: Table) -> Result<Vec<Record>> {
        let tables = self.tables.lock().expect("store lock poisoned");
        Ok(tables.get(table.name()).cloned().unwrap_or_default())
    }

    fn save(&self, table: Table, records: &[Record]) -> Result<()> {
        let mut tables = self.tables.lock().expect("store lock poisoned");
        tables.insert(table.name(), records.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_loads_empty() {
        let store = MemoryStore::new();
        assert!(store.load(Table::Accounts).unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_snapshot() {
        let store = MemoryStore::new();

        let mut rec = Record::new();
        rec.set("TradeID", "1");
        store.save(Table::Trades, &[rec]).unwrap();
        assert_eq!(store.load(Table::Trades).unwrap().len(), 1);

        store.save(Table::Trades, &[]).unwrap();
        assert!(store.load(Table::Trades).unwrap().is_empty());
    }
}
