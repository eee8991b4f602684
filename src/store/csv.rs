//! Flat-file backend: one CSV per table in a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use super::{Record, RecordStore, Table};

/// CSV-file record store. Files are created lazily on first save; a table
/// whose file does not exist yet loads as empty.
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, table: Table) -> PathBuf {
        match table {
            Table::Accounts => self.dir.join("accounts.csv"),
            Table::Trades => self.dir.join("trades.csv"),
        }
    }
}

impl RecordStore for CsvStore {
    fn load(&self, table: Table) -> Result<Vec<Record>> {
        let path = self.path_for(table);
        if !path.exists() {
            return Ok(Vec::new());
        }

        debug!(table = table.name(), path = %path.display(), "loading table");

        let mut reader = csv::Reader::from_path(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("failed to read headers of {}", path.display()))?
            .clone();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.with_context(|| format!("failed to read row in {}", path.display()))?;
            let mut rec = Record::new();
            for (field, value) in headers.iter().zip(row.iter()) {
                rec.set(field, value);
            }
            records.push(rec);
        }

        Ok(records)
    }

    fn save(&self, table: Table, records: &[Record]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.path_for(table);
        debug!(table = table.name(), rows = records.len(), path = %path.display(), "saving table");

        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("failed to open {} for writing", path.display()))?;

        let columns = table.columns();
        writer
            .write_record(columns)
            .context("failed to write header row")?;
        for rec in records {
            writer
                .write_record(columns.iter().map(|c| rec.str_field(c)))
                .context("failed to write data row")?;
        }
        writer.flush().context("failed to flush table file")?;

        Ok(())
    }
}
