use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use moneta_ledger::{CreateDeposit, CreateTransfer, CreateWithdraw};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:id/transactions", get(list_transactions))
        .route("/:id/transactions/:transaction_id", get(get_transaction))
        .route("/:id/balance", get(get_balance))
        .route("/:id/deposits", post(create_deposit))
        .route("/:id/withdraws", post(create_withdraw))
        .route("/:id/transfers", post(create_transfer))
}

pub async fn create_deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateDepositRequest>,
) -> axum::response::Response {
    let to = match errors::parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.processor.create_deposit(CreateDeposit {
        to,
        amount: body.amount,
    }) {
        Ok(tx) => (StatusCode::CREATED, Json(dto::transaction_to_json(&tx))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateWithdrawRequest>,
) -> axum::response::Response {
    let from = match errors::parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.processor.create_withdraw(CreateWithdraw {
        from,
        amount: body.amount,
    }) {
        Ok(tx) => (StatusCode::CREATED, Json(dto::transaction_to_json(&tx))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn create_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateTransferRequest>,
) -> axum::response::Response {
    let from = match errors::parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let to = match errors::parse_account_id(&body.to) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.processor.create_transfer(CreateTransfer {
        from,
        to,
        amount: body.amount,
    }) {
        Ok(tx) => (StatusCode::CREATED, Json(dto::transaction_to_json(&tx))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let account_id = match errors::parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.processor.transactions_for(account_id) {
        Ok(transactions) => {
            let items = transactions
                .iter()
                .map(|tx| dto::transaction_to_json(tx))
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
        }
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, transaction_id)): Path<(String, String)>,
) -> axum::response::Response {
    let account_id = match errors::parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let transaction_id = match errors::parse_transaction_id(&transaction_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services
        .processor
        .transaction_by_id(account_id, transaction_id)
    {
        Ok(tx) => (StatusCode::OK, Json(dto::transaction_to_json(&tx))).into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}

pub async fn get_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let account_id = match errors::parse_account_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.processor.balance_of(account_id) {
        Ok(balance) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "account_id": account_id.to_string(),
                "balance": balance,
            })),
        )
            .into_response(),
        Err(e) => errors::ledger_error_to_response(e),
    }
}
