//! Error taxonomy for ledger operations.

use thiserror::Error;

/// Errors surfaced by account and trade ledger operations.
///
/// Missing trades are not represented here: trade lookups report them as
/// `false`/`None` results so callers can render inline feedback.
#[derive(Debug, Error)]
pub enum JournalError {
    /// An account with this id already exists (create or rename collision).
    #[error("account '{0}' already exists")]
    DuplicateAccount(String),

    /// The targeted account does not exist.
    #[error("account '{0}' not found")]
    AccountNotFound(String),

    /// The record store backend failed to load or save a table.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, JournalError>;
