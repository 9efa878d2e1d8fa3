use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use moneta_core::{AccountId, LedgerError, LedgerResult};

/// An account held by the ledger.
///
/// Created once, immutable thereafter. Identity is the `id`; no two accounts
/// may share one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a fresh account for `owner` with a new id and the current time.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_id(AccountId::new(), owner)
    }

    /// Build an account with a caller-chosen id.
    pub fn with_id(id: AccountId, owner: impl Into<String>) -> Self {
        Self {
            id,
            owner: owner.into(),
            created_at: Utc::now(),
        }
    }
}

/// In-memory account store.
///
/// The single in-process authority over account records. Safe for concurrent
/// create/find from many callers.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new account.
    ///
    /// Compare-and-insert under the write lock: of two concurrent creates
    /// with the same id, exactly one succeeds and the store retains its
    /// account.
    pub fn create(&self, account: Account) -> LedgerResult<Account> {
        let mut accounts = self.accounts.write().unwrap();
        match accounts.entry(account.id) {
            Entry::Occupied(_) => Err(LedgerError::AccountAlreadyExists(account.id)),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    pub fn find(&self, id: AccountId) -> Option<Account> {
        self.accounts.read().unwrap().get(&id).cloned()
    }

    /// Every stored account, in no significant order.
    pub fn find_all(&self) -> Vec<Account> {
        self.accounts.read().unwrap().values().cloned().collect()
    }
}
