use httpmock::prelude::*;
use ponte_core::{FinanceProvider, PonteError};
use ponte_teller::TellerConnector;
use ponte_types::{
    ConnectionState, Credentials, GetAccountsRequest, GetConnectionStatusRequest,
    GetTransactionsRequest,
};
use serde_json::{Value, json};
use url::Url;

fn connector(server: &MockServer) -> TellerConnector {
    TellerConnector::new(&Credentials::new())
        .unwrap()
        .with_base_url(Url::parse(&server.base_url()).unwrap())
}

fn txn_json(id: &str) -> Value {
    json!({
        "id": id,
        "amount": "-10.00",
        "date": "2026-02-11",
        "description": "COFFEE",
        "status": "posted",
        "type": "card_payment",
        "details": {"category": "dining"}
    })
}

#[tokio::test]
async fn health_probe_reads_the_service_endpoint() {
    let server = MockServer::start_async().await;
    let probe = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    assert!(connector(&server).health_check().await);
    probe.assert_async().await;
}

#[tokio::test]
async fn health_probe_is_false_on_outage() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(502).body("bad gateway");
        })
        .await;

    assert!(!connector(&server).health_check().await);
}

#[tokio::test]
async fn accounts_join_in_their_balances() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts")
                // Access token rides as the basic auth username.
                .header("authorization", "Basic dGVzdF90b2tlbjo=");
            then.status(200).json_body(json!([{
                "id": "acc_1",
                "name": "Everyday Checking",
                "currency": "USD",
                "type": "depository",
                "subtype": "checking",
                "enrollment_id": "enr_9",
                "institution": {"id": "chase", "name": "Chase"}
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/acc_1/balances");
            then.status(200).json_body(json!({
                "account_id": "acc_1",
                "ledger": "1024.33",
                "available": "1000.00"
            }));
        })
        .await;

    let accounts = connector(&server)
        .get_accounts(&GetAccountsRequest {
            access_token: Some("test_token".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "acc_1");
    assert_eq!(accounts[0].balance.amount.to_string(), "1024.33");
    assert_eq!(
        accounts[0].provider_refs.enrollment_id.as_deref(),
        Some("enr_9")
    );
    assert_eq!(accounts[0].institution.name, "Chase");
}

#[tokio::test]
async fn transient_transaction_pages_are_retried() {
    let server = MockServer::start_async().await;
    let outage = server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts/acc_1/transactions");
            then.status(503).body("upstream unavailable");
        })
        .await;

    let err = connector(&server)
        .get_transactions(&GetTransactionsRequest {
            account_id: "acc_1".to_string(),
            access_token: Some("test_token".to_string()),
            account_type: None,
            latest: false,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, PonteError::Status { status: 503, .. }));
    // The page fetch burns the full retry budget before giving up.
    outage.assert_hits_async(3).await;
}

#[tokio::test]
async fn transactions_follow_the_from_id_cursor() {
    let server = MockServer::start_async().await;
    let full_page: Vec<Value> = (0..50).map(|i| txn_json(&format!("txn_{i}"))).collect();
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/acc_1/transactions")
                .query_param("count", "50")
                .query_param_missing("from_id");
            then.status(200).json_body(json!(full_page));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/acc_1/transactions")
                .query_param("count", "50")
                .query_param("from_id", "txn_49");
            then.status(200).json_body(json!([txn_json("txn_50")]));
        })
        .await;

    let txns = connector(&server)
        .get_transactions(&GetTransactionsRequest {
            account_id: "acc_1".to_string(),
            access_token: Some("test_token".to_string()),
            account_type: None,
            latest: false,
        })
        .await
        .unwrap();

    assert_eq!(txns.len(), 51);
    assert_eq!(txns[50].id, "txn_50");
}

#[tokio::test]
async fn latest_fetches_a_single_page() {
    let server = MockServer::start_async().await;
    let listing = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/accounts/acc_1/transactions")
                .query_param_missing("from_id");
            then.status(200).json_body(json!([txn_json("txn_0")]));
        })
        .await;

    let txns = connector(&server)
        .get_transactions(&GetTransactionsRequest {
            account_id: "acc_1".to_string(),
            access_token: Some("test_token".to_string()),
            account_type: None,
            latest: true,
        })
        .await
        .unwrap();

    assert_eq!(txns.len(), 1);
    listing.assert_hits_async(1).await;
}

#[tokio::test]
async fn disconnected_enrollment_reads_as_disconnected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts");
            then.status(401).json_body(json!({
                "error": {
                    "code": "enrollment.disconnected",
                    "message": "The enrollment is no longer connected"
                }
            }));
        })
        .await;

    let status = connector(&server)
        .get_connection_status(&GetConnectionStatusRequest {
            connection_id: None,
            access_token: Some("test_token".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(status.status, ConnectionState::Disconnected);
}

#[tokio::test]
async fn missing_access_token_is_an_invalid_argument() {
    let server = MockServer::start_async().await;
    let err = connector(&server)
        .get_accounts(&GetAccountsRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PonteError::InvalidArg(_)));
}
