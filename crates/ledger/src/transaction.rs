use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_core::{AccountId, TransactionId};

/// A committed movement of money.
///
/// Immutable once created; every variant carries its own unique id and the
/// timestamp at which it was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transaction {
    Deposit(Deposit),
    Withdraw(Withdraw),
    Transfer(Transfer),
}

/// Money entering `to` from outside the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: TransactionId,
    pub to: AccountId,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Money leaving `from` to outside the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdraw {
    pub id: TransactionId,
    pub from: AccountId,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Money moving between two ledger accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: TransactionId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// A fresh deposit into `to`, stamped with a new id and the current time.
    pub fn deposit(to: AccountId, amount: Decimal) -> Self {
        Self::Deposit(Deposit {
            id: TransactionId::new(),
            to,
            amount,
            timestamp: Utc::now(),
        })
    }

    /// A fresh withdrawal from `from`.
    pub fn withdraw(from: AccountId, amount: Decimal) -> Self {
        Self::Withdraw(Withdraw {
            id: TransactionId::new(),
            from,
            amount,
            timestamp: Utc::now(),
        })
    }

    /// A fresh transfer from `from` to `to`.
    pub fn transfer(from: AccountId, to: AccountId, amount: Decimal) -> Self {
        Self::Transfer(Transfer {
            id: TransactionId::new(),
            from,
            to,
            amount,
            timestamp: Utc::now(),
        })
    }

    pub fn id(&self) -> TransactionId {
        match self {
            Self::Deposit(d) => d.id,
            Self::Withdraw(w) => w.id,
            Self::Transfer(t) => t.id,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Deposit(d) => d.amount,
            Self::Withdraw(w) => w.amount,
            Self::Transfer(t) => t.amount,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Deposit(d) => d.timestamp,
            Self::Withdraw(w) => w.timestamp,
            Self::Transfer(t) => t.timestamp,
        }
    }

    /// The accounts whose logs this transaction belongs to.
    ///
    /// One account for a deposit or withdrawal, two for a transfer. A
    /// transfer whose two sides name the same account collapses to a single
    /// entry so its log never records it twice.
    pub fn affected_accounts(&self) -> (AccountId, Option<AccountId>) {
        match self {
            Self::Deposit(d) => (d.to, None),
            Self::Withdraw(w) => (w.from, None),
            Self::Transfer(t) if t.from == t.to => (t.from, None),
            Self::Transfer(t) => (t.from, Some(t.to)),
        }
    }

    /// This transaction's contribution to `account_id`'s balance.
    ///
    /// Deposits credit, withdrawals debit. A transfer leg's sign depends on
    /// which side `account_id` is on; both legs apply when the transfer is
    /// to the same account, netting it to zero.
    pub fn signed_amount(&self, account_id: AccountId) -> Decimal {
        match self {
            Self::Deposit(d) if d.to == account_id => d.amount,
            Self::Withdraw(w) if w.from == account_id => -w.amount,
            Self::Transfer(t) => {
                let mut signed = Decimal::ZERO;
                if t.to == account_id {
                    signed += t.amount;
                }
                if t.from == account_id {
                    signed -= t.amount;
                }
                signed
            }
            Self::Deposit(_) | Self::Withdraw(_) => Decimal::ZERO,
        }
    }
}

/// Command: deposit `amount` into `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDeposit {
    pub to: AccountId,
    pub amount: Decimal,
}

/// Command: withdraw `amount` from `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWithdraw {
    pub from: AccountId,
    pub amount: Decimal,
}

/// Command: transfer `amount` from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTransfer {
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Decimal,
}
