mod helpers;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use helpers::mock_connector::{MockFinanceConnector, MockTravelConnector, search_request};
use ponte::types::{
    ConnectionState, Credentials, GetAccountBalanceRequest, GetAccountsRequest,
    GetConnectionStatusRequest, GetInstitutionsRequest, GetOffersRequest, GetTransactionsRequest,
    ProviderFamily, ProviderKind, keys,
};
use ponte::{Ponte, PonteError, ProviderParams};

#[tokio::test]
async fn adapterless_facade_answers_with_neutral_defaults() {
    let ponte = Ponte::new(&ProviderParams::new()).unwrap();

    assert_eq!(ponte.provider(), None);
    assert!(ponte.search_flights(&search_request()).await.unwrap().is_empty());
    let offer = ponte
        .get_offers(&GetOffersRequest {
            offer_id: "off_1".to_string(),
        })
        .await
        .unwrap();
    assert!(offer.is_none());
    assert!(ponte
        .get_accounts(&GetAccountsRequest::default())
        .await
        .unwrap()
        .is_empty());
    let balance = ponte
        .get_account_balance(&GetAccountBalanceRequest {
            account_id: "acc_1".to_string(),
            access_token: None,
        })
        .await
        .unwrap();
    assert!(balance.is_none());
    let status = ponte
        .get_connection_status(&GetConnectionStatusRequest {
            connection_id: None,
            access_token: None,
        })
        .await
        .unwrap();
    assert_eq!(status.status, ConnectionState::Connected);
    assert!(ponte.provider_health().await);
}

#[tokio::test]
async fn finance_facade_keeps_travel_operations_neutral() {
    let mock = Arc::new(MockFinanceConnector::default());
    let ponte = Ponte::from_finance(mock.clone());

    assert_eq!(ponte.family(), Some(ProviderFamily::Finance));
    assert!(ponte.search_flights(&search_request()).await.unwrap().is_empty());
    assert!(ponte
        .get_offers(&GetOffersRequest {
            offer_id: "off_1".to_string(),
        })
        .await
        .unwrap()
        .is_none());
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn travel_facade_keeps_finance_operations_neutral() {
    let mock = Arc::new(MockTravelConnector::default());
    let ponte = Ponte::from_travel(mock.clone());

    assert_eq!(ponte.family(), Some(ProviderFamily::Travel));
    assert!(ponte
        .get_transactions(&GetTransactionsRequest {
            account_id: "acc_1".to_string(),
            access_token: None,
            account_type: None,
            latest: false,
        })
        .await
        .unwrap()
        .is_empty());
    assert!(ponte
        .get_institutions(&GetInstitutionsRequest { country_code: None })
        .await
        .unwrap()
        .is_empty());
    assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn finance_calls_forward_to_the_adapter() {
    let mock = Arc::new(MockFinanceConnector::default());
    let ponte = Ponte::from_finance(mock.clone());

    let accounts = ponte
        .get_accounts(&GetAccountsRequest::default())
        .await
        .unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "acc_1");
    assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn travel_calls_forward_to_the_adapter() {
    let mock = Arc::new(MockTravelConnector::default());
    let ponte = Ponte::from_travel(mock.clone());

    let offers = ponte.search_flights(&search_request()).await.unwrap();
    assert_eq!(offers.len(), 1);
    let offer = ponte
        .get_offers(&GetOffersRequest {
            offer_id: "off_9".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(offer.map(|o| o.id).as_deref(), Some("off_9"));
    assert_eq!(mock.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn missing_credentials_fail_at_construction() {
    let params = ProviderParams::new().with_provider(ProviderKind::Duffel);
    let err = Ponte::new(&params).unwrap_err();
    assert!(matches!(err, PonteError::InvalidArg(_)));
}

#[tokio::test]
async fn tagged_construction_resolves_the_family() {
    let params = ProviderParams::new()
        .with_provider(ProviderKind::Gocardless)
        .with_credentials(
            Credentials::new()
                .with(keys::GOCARDLESS_SECRET_ID, "id")
                .with(keys::GOCARDLESS_SECRET_KEY, "key"),
        );
    let ponte = Ponte::new(&params).unwrap();
    assert_eq!(ponte.provider(), Some(ProviderKind::Gocardless));
    assert_eq!(ponte.family(), Some(ProviderFamily::Finance));
}
