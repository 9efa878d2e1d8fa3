use axum::Router;

pub mod accounts;
pub mod system;
pub mod transactions;

/// Router for all ledger endpoints.
pub fn router() -> Router {
    Router::new().nest("/accounts", accounts::router().merge(transactions::router()))
}
