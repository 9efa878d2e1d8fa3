use rust_decimal::Decimal;
use serde::Deserialize;

use moneta_ledger::{Account, Transaction};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub owner: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateDepositRequest {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateWithdrawRequest {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub to: String,
    pub amount: Decimal,
}

// -------------------------
// Response mapping
// -------------------------

pub fn account_to_json(account: &Account) -> serde_json::Value {
    serde_json::json!({
        "id": account.id.to_string(),
        "owner": account.owner,
        "created_at": account.created_at.to_rfc3339(),
    })
}

pub fn transaction_to_json(transaction: &Transaction) -> serde_json::Value {
    match transaction {
        Transaction::Deposit(d) => serde_json::json!({
            "id": d.id.to_string(),
            "type": "deposit",
            "to": d.to.to_string(),
            "amount": d.amount,
            "timestamp": d.timestamp.to_rfc3339(),
        }),
        Transaction::Withdraw(w) => serde_json::json!({
            "id": w.id.to_string(),
            "type": "withdraw",
            "from": w.from.to_string(),
            "amount": w.amount,
            "timestamp": w.timestamp.to_rfc3339(),
        }),
        Transaction::Transfer(t) => serde_json::json!({
            "id": t.id.to_string(),
            "type": "transfer",
            "from": t.from.to_string(),
            "to": t.to.to_string(),
            "amount": t.amount,
            "timestamp": t.timestamp.to_rfc3339(),
        }),
    }
}
