use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use moneta_core::{AccountId, TransactionId};

use crate::transaction::Transaction;

/// In-memory append-only transaction log, partitioned by account.
///
/// A committed transaction is filed under every account it affects; both
/// sides of a transfer share one `Arc` to the same record. Each account's
/// entries stay in append order and are never rewritten.
#[derive(Debug, Default)]
pub struct TransactionLog {
    entries: RwLock<HashMap<AccountId, Vec<Arc<Transaction>>>>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `transaction` to the log of every account it affects.
    ///
    /// Both legs of a transfer land under one write guard, so no reader can
    /// observe a half-appended transfer.
    pub fn append(&self, transaction: Transaction) -> Arc<Transaction> {
        let committed = Arc::new(transaction);
        let (account, counterparty) = committed.affected_accounts();

        let mut entries = self.entries.write().unwrap();
        entries
            .entry(account)
            .or_default()
            .push(Arc::clone(&committed));
        if let Some(other) = counterparty {
            entries
                .entry(other)
                .or_default()
                .push(Arc::clone(&committed));
        }

        committed
    }

    /// The account's transactions in append order; empty if it has none.
    pub fn find_by_account(&self, account_id: AccountId) -> Vec<Arc<Transaction>> {
        self.entries
            .read()
            .unwrap()
            .get(&account_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Look up a transaction within one account's log only.
    ///
    /// An id committed under an unrelated account is not visible here.
    pub fn find_by_account_and_id(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> Option<Arc<Transaction>> {
        self.entries
            .read()
            .unwrap()
            .get(&account_id)
            .and_then(|log| log.iter().find(|tx| tx.id() == transaction_id))
            .map(Arc::clone)
    }
}
