use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use moneta_core::{AccountId, LedgerError, TransactionId};

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        LedgerError::AccountAlreadyExists(_) => {
            json_error(StatusCode::CONFLICT, "account_exists", message)
        }
        LedgerError::AccountNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "account_not_found", message)
        }
        LedgerError::TransactionNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "transaction_not_found", message)
        }
        LedgerError::InvalidAmount => json_error(StatusCode::BAD_REQUEST, "invalid_amount", message),
        LedgerError::InsufficientFunds { .. } => {
            json_error(StatusCode::BAD_REQUEST, "insufficient_funds", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_account_id(s: &str) -> Result<AccountId, axum::response::Response> {
    s.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            "account id must be a UUID",
        )
    })
}

pub fn parse_transaction_id(s: &str) -> Result<TransactionId, axum::response::Response> {
    s.parse().map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_id",
            "transaction id must be a UUID",
        )
    })
}
