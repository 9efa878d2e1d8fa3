use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use moneta_core::{AccountId, LedgerError, LedgerResult, TransactionId};

use crate::account::AccountStore;
use crate::balance::BalanceCalculator;
use crate::log::TransactionLog;
use crate::transaction::{CreateDeposit, CreateTransfer, CreateWithdraw, Transaction};

/// Per-account serialization for balance-affecting operations.
///
/// Hands out one mutex per account; the registry only grows, since accounts
/// are never deleted.
#[derive(Debug, Default)]
struct AccountLocks {
    locks: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    fn lock_for(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        Arc::clone(self.locks.lock().unwrap().entry(account_id).or_default())
    }
}

/// Validates transaction commands against current state and commits them.
///
/// Each operation is a short pipeline: check the amount, resolve the
/// account(s), check the balance where money leaves an account, then append.
/// A rejected command never reaches the log.
#[derive(Debug)]
pub struct TransactionProcessor {
    accounts: Arc<AccountStore>,
    log: Arc<TransactionLog>,
    balances: BalanceCalculator,
    account_locks: AccountLocks,
}

impl TransactionProcessor {
    pub fn new(accounts: Arc<AccountStore>, log: Arc<TransactionLog>) -> Self {
        let balances = BalanceCalculator::new(Arc::clone(&log));
        Self {
            accounts,
            log,
            balances,
            account_locks: AccountLocks::default(),
        }
    }

    /// Deposit money into an account.
    ///
    /// Deposits never debit anyone, so the log's own write lock is all the
    /// serialization they need.
    pub fn create_deposit(&self, command: CreateDeposit) -> LedgerResult<Arc<Transaction>> {
        let amount = positive_amount(command.amount)?;
        let to = self.resolve(command.to)?;

        let committed = self.log.append(Transaction::deposit(to, amount));
        tracing::debug!(account_id = %to, %amount, "deposit committed");
        Ok(committed)
    }

    /// Withdraw money from an account.
    ///
    /// The balance read and sufficiency check run inside the account's
    /// critical section, so two concurrent debits cannot both pass against a
    /// stale balance.
    pub fn create_withdraw(&self, command: CreateWithdraw) -> LedgerResult<Arc<Transaction>> {
        let amount = positive_amount(command.amount)?;
        let from = self.resolve(command.from)?;

        let lock = self.account_locks.lock_for(from);
        let _serialized = lock.lock().unwrap();

        self.ensure_sufficient(from, amount)?;
        let committed = self.log.append(Transaction::withdraw(from, amount));
        tracing::debug!(account_id = %from, %amount, "withdrawal committed");
        Ok(committed)
    }

    /// Transfer money between two accounts.
    ///
    /// A missing `from` account is reported before a missing `to`. Both
    /// account locks are taken in ascending id order, so two transfers that
    /// name the same accounts in opposite directions cannot deadlock.
    pub fn create_transfer(&self, command: CreateTransfer) -> LedgerResult<Arc<Transaction>> {
        let amount = positive_amount(command.amount)?;
        let from = self.resolve(command.from)?;
        let to = self.resolve(command.to)?;

        let (lower, higher) = if from <= to { (from, to) } else { (to, from) };
        let first = self.account_locks.lock_for(lower);
        let second = (lower != higher).then(|| self.account_locks.lock_for(higher));
        let _serialized_first = first.lock().unwrap();
        let _serialized_second = second.as_ref().map(|lock| lock.lock().unwrap());

        self.ensure_sufficient(from, amount)?;
        let committed = self.log.append(Transaction::transfer(from, to, amount));
        tracing::debug!(from_account = %from, to_account = %to, %amount, "transfer committed");
        Ok(committed)
    }

    /// The account's transactions in append order.
    pub fn transactions_for(&self, account_id: AccountId) -> LedgerResult<Vec<Arc<Transaction>>> {
        let account_id = self.resolve(account_id)?;
        Ok(self.log.find_by_account(account_id))
    }

    /// One transaction, looked up within the account's own log.
    pub fn transaction_by_id(
        &self,
        account_id: AccountId,
        transaction_id: TransactionId,
    ) -> LedgerResult<Arc<Transaction>> {
        let account_id = self.resolve(account_id)?;
        self.log
            .find_by_account_and_id(account_id, transaction_id)
            .ok_or(LedgerError::TransactionNotFound(transaction_id))
    }

    /// The account's current balance, freshly folded from its log.
    pub fn balance_of(&self, account_id: AccountId) -> LedgerResult<Decimal> {
        let account_id = self.resolve(account_id)?;
        Ok(self.balances.current_balance(account_id))
    }

    fn resolve(&self, account_id: AccountId) -> LedgerResult<AccountId> {
        if self.accounts.find(account_id).is_some() {
            Ok(account_id)
        } else {
            Err(LedgerError::AccountNotFound(account_id))
        }
    }

    /// Reject a debit of `amount` that exceeds the account's balance.
    ///
    /// Call only while holding the account's lock.
    fn ensure_sufficient(&self, account_id: AccountId, amount: Decimal) -> LedgerResult<()> {
        if amount > self.balances.current_balance(account_id) {
            return Err(LedgerError::InsufficientFunds { account_id, amount });
        }
        Ok(())
    }
}

/// The strictly-positive amount rule shared by every transaction command.
fn positive_amount(amount: Decimal) -> LedgerResult<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(amount)
}
