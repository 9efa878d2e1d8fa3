use reqwest::StatusCode;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build the same router as prod, but bind to an ephemeral port.
        let app = moneta_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_account(client: &reqwest::Client, base_url: &str, owner: &str) -> String {
    let res = client
        .post(format!("{}/accounts", base_url))
        .json(&json!({ "owner": owner }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

async fn balance_of(client: &reqwest::Client, base_url: &str, account_id: &str) -> Decimal {
    let res = client
        .get(format!("{}/accounts/{}/balance", base_url, account_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["balance"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let srv = TestServer::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn account_lifecycle_create_get_list() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let id = create_account(&client, &srv.base_url, "alice").await;

    let res = client
        .get(format!("{}/accounts/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["id"].as_str().unwrap(), id);
    assert_eq!(body["owner"], "alice");
    assert!(body["created_at"].as_str().is_some());

    let res = client
        .get(format!("{}/accounts", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().any(|item| item["id"].as_str().unwrap() == id));
}

#[tokio::test]
async fn unknown_and_malformed_account_ids_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/accounts/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_not_found");

    let res = client
        .get(format!("{}/accounts/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn deposit_withdraw_transfer_flow_over_the_wire() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "alice").await;

    let res = client
        .post(format!("{}/accounts/{}/deposits", srv.base_url, a))
        .json(&json!({ "amount": 11 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["type"], "deposit");
    assert_eq!(body["to"].as_str().unwrap(), a);
    assert_eq!(balance_of(&client, &srv.base_url, &a).await, dec!(11));

    let res = client
        .post(format!("{}/accounts/{}/withdraws", srv.base_url, a))
        .json(&json!({ "amount": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(balance_of(&client, &srv.base_url, &a).await, dec!(8));

    let b = create_account(&client, &srv.base_url, "bob").await;
    let res = client
        .post(format!("{}/accounts/{}/transfers", srv.base_url, a))
        .json(&json!({ "to": b, "amount": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["type"], "transfer");
    assert_eq!(body["from"].as_str().unwrap(), a);
    assert_eq!(body["to"].as_str().unwrap(), b);
    assert_eq!(balance_of(&client, &srv.base_url, &a).await, dec!(3));
    assert_eq!(balance_of(&client, &srv.base_url, &b).await, dec!(5));

    // Overdraw attempt: rejected, balance untouched.
    let res = client
        .post(format!("{}/accounts/{}/withdraws", srv.base_url, a))
        .json(&json!({ "amount": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "insufficient_funds");
    assert_eq!(balance_of(&client, &srv.base_url, &a).await, dec!(3));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "alice").await;

    for (path, body) in [
        ("deposits", json!({ "amount": 0 })),
        ("withdraws", json!({ "amount": -5 })),
    ] {
        let res = client
            .post(format!("{}/accounts/{}/{}", srv.base_url, a, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_amount");
    }

    assert!(
        client
            .get(format!("{}/accounts/{}/transactions", srv.base_url, a))
            .send()
            .await
            .unwrap()
            .json::<serde_json::Value>()
            .await
            .unwrap()["items"]
            .as_array()
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn operations_against_unknown_accounts_yield_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let ghost = uuid::Uuid::now_v7().to_string();

    let res = client
        .post(format!("{}/accounts/{}/deposits", srv.base_url, ghost))
        .json(&json!({ "amount": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_not_found");

    // A transfer to a missing receiver also 404s, naming the receiver.
    let a = create_account(&client, &srv.base_url, "alice").await;
    client
        .post(format!("{}/accounts/{}/deposits", srv.base_url, a))
        .json(&json!({ "amount": 5 }))
        .send()
        .await
        .unwrap();
    let res = client
        .post(format!("{}/accounts/{}/transfers", srv.base_url, a))
        .json(&json!({ "to": ghost, "amount": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "account_not_found");
    assert!(body["message"].as_str().unwrap().contains(&ghost));

    let res = client
        .get(format!("{}/accounts/{}/balance", srv.base_url, ghost))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn transaction_listing_and_scoped_lookup() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "alice").await;
    let b = create_account(&client, &srv.base_url, "bob").await;
    let c = create_account(&client, &srv.base_url, "carol").await;

    client
        .post(format!("{}/accounts/{}/deposits", srv.base_url, a))
        .json(&json!({ "amount": 10 }))
        .send()
        .await
        .unwrap();
    let res = client
        .post(format!("{}/accounts/{}/transfers", srv.base_url, a))
        .json(&json!({ "to": b, "amount": 4 }))
        .send()
        .await
        .unwrap();
    let transfer: serde_json::Value = res.json().await.unwrap();
    let transfer_id = transfer["id"].as_str().unwrap();

    let res = client
        .get(format!("{}/accounts/{}/transactions", srv.base_url, a))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "deposit");
    assert_eq!(items[1]["type"], "transfer");

    // The transfer is visible under both participants...
    for account in [&a, &b] {
        let res = client
            .get(format!(
                "{}/accounts/{}/transactions/{}",
                srv.base_url, account, transfer_id
            ))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["id"].as_str().unwrap(), transfer_id);
    }

    // ...but not under an uninvolved account.
    let res = client
        .get(format!(
            "{}/accounts/{}/transactions/{}",
            srv.base_url, c, transfer_id
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "transaction_not_found");
}

#[tokio::test]
async fn concurrent_withdrawals_over_http_cannot_overdraw() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let a = create_account(&client, &srv.base_url, "alice").await;
    client
        .post(format!("{}/accounts/{}/deposits", srv.base_url, a))
        .json(&json!({ "amount": 10 }))
        .send()
        .await
        .unwrap();

    let withdraw = |client: reqwest::Client, base_url: String, account: String| async move {
        client
            .post(format!("{}/accounts/{}/withdraws", base_url, account))
            .json(&json!({ "amount": 6 }))
            .send()
            .await
            .unwrap()
            .status()
    };

    let (first, second) = tokio::join!(
        withdraw(client.clone(), srv.base_url.clone(), a.clone()),
        withdraw(client.clone(), srv.base_url.clone(), a.clone()),
    );

    let statuses = [first, second];
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CREATED)
            .count(),
        1,
        "exactly one withdrawal may pass"
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::BAD_REQUEST)
            .count(),
        1
    );
    assert_eq!(balance_of(&client, &srv.base_url, &a).await, dec!(4));
}
