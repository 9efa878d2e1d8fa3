//! Ledger error model.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::id::{AccountId, TransactionId};

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a deterministic business rejection, not a transient
/// failure: nothing here is retried, and a rejected operation leaves all
/// state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An account with this id is already present in the store.
    #[error("account {0} already exists")]
    AccountAlreadyExists(AccountId),

    /// The referenced account does not exist.
    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    /// A zero or negative amount was supplied to a transaction-creating
    /// operation.
    #[error("transaction amount must be positive")]
    InvalidAmount,

    /// The requested debit exceeds the account's current balance.
    #[error("account {account_id} has insufficient funds to debit {amount}")]
    InsufficientFunds {
        account_id: AccountId,
        amount: Decimal,
    },

    /// The transaction id is not present in the named account's log.
    #[error("transaction {0} not found")]
    TransactionNotFound(TransactionId),
}
