use std::sync::Arc;

use rust_decimal::Decimal;

use moneta_core::AccountId;

use crate::log::TransactionLog;

/// Derives balances by folding the transaction log.
///
/// Balance is never stored: every call re-reads the authoritative log and
/// sums signed amounts, so the result cannot drift from the entries.
#[derive(Debug, Clone)]
pub struct BalanceCalculator {
    log: Arc<TransactionLog>,
}

impl BalanceCalculator {
    pub fn new(log: Arc<TransactionLog>) -> Self {
        Self { log }
    }

    /// The account's current balance.
    ///
    /// An account with no transactions folds to zero; whether the account
    /// exists at all is the caller's question, not this one's.
    pub fn current_balance(&self, account_id: AccountId) -> Decimal {
        self.log
            .find_by_account(account_id)
            .iter()
            .map(|tx| tx.signed_amount(account_id))
            .sum()
    }
}
