//! `moneta-ledger` — accounts, transactions, and balance derivation.
//!
//! The ledger is built from four pieces wired together at startup:
//!
//! - [`AccountStore`]: account records keyed by id, create-once semantics.
//! - [`TransactionLog`]: per-account append-only history.
//! - [`BalanceCalculator`]: folds a log into a balance on every read.
//! - [`TransactionProcessor`]: validates commands against current state and
//!   commits the resulting transactions.
//!
//! All state lives in process memory; there is no persistence layer.

pub mod account;
pub mod balance;
pub mod log;
pub mod processor;
pub mod transaction;

pub use account::{Account, AccountStore};
pub use balance::BalanceCalculator;
pub use log::TransactionLog;
pub use processor::TransactionProcessor;
pub use transaction::{CreateDeposit, CreateTransfer, CreateWithdraw, Transaction};
