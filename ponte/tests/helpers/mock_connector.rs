#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use ponte::types::{
    Account, AccountType, AddAncillariesRequest, Balance, CancelOrderRequest, ConnectionState,
    ConnectionStatus, CreateOrderRequest, DeleteAccountsRequest, DeleteConnectionRequest,
    GetAccountBalanceRequest, GetAccountsRequest, GetConnectionStatusRequest,
    GetInstitutionsRequest, GetOffersRequest, GetPricingRequest, GetSeatMapsRequest,
    GetTransactionsRequest, Institution, ModifyOrderRequest, Offer, Order, OrderCancellation,
    OrderStatus, Price, Pricing, PricingConditions, ProviderKind, ProviderRefs,
    RetrieveOrderRequest, SearchFlightsRequest, SeatMap, Transaction,
};
use ponte::{Connector, FinanceProvider, PonteError, TravelProvider};
use rust_decimal::Decimal;

/// Simple in-memory travel connector used by integration tests.
/// Fields hold canned responses; counters record how often each entry point
/// was hit.
pub struct MockTravelConnector {
    pub kind: ProviderKind,
    pub offers: Vec<Offer>,
    pub healthy: bool,
    pub calls: AtomicU32,
}

impl Default for MockTravelConnector {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Duffel,
            offers: vec![offer("off_1")],
            healthy: true,
            calls: AtomicU32::new(0),
        }
    }
}

impl Connector for MockTravelConnector {
    fn name(&self) -> &'static str {
        "mock-travel"
    }
    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

#[async_trait]
impl TravelProvider for MockTravelConnector {
    async fn search_flights(&self, _req: &SearchFlightsRequest) -> Result<Vec<Offer>, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.offers.clone())
    }

    async fn get_offers(&self, req: &GetOffersRequest) -> Result<Offer, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(offer(&req.offer_id))
    }

    async fn get_pricing(&self, _req: &GetPricingRequest) -> Result<Pricing, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Pricing {
            price: price("199.00"),
            conditions: PricingConditions {
                change_before_departure: Some(true),
                refund_before_departure: Some(false),
            },
        })
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(order(&format!("ord_{}", req.offer_id)))
    }

    async fn retrieve_order(&self, req: &RetrieveOrderRequest) -> Result<Order, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(order(&req.order_id))
    }

    async fn cancel_order(
        &self,
        req: &CancelOrderRequest,
    ) -> Result<OrderCancellation, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(OrderCancellation {
            id: format!("can_{}", req.order_id),
            order_id: req.order_id.clone(),
            status: OrderStatus::Cancelled,
            refund: None,
        })
    }

    async fn modify_order(&self, req: &ModifyOrderRequest) -> Result<Order, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(order(&req.order_id))
    }

    async fn add_ancillaries(&self, req: &AddAncillariesRequest) -> Result<Order, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(order(&req.order_id))
    }

    async fn get_seat_maps(&self, _req: &GetSeatMapsRequest) -> Result<Vec<SeatMap>, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

/// Simple in-memory finance connector used by integration tests.
pub struct MockFinanceConnector {
    pub kind: ProviderKind,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub status: ConnectionState,
    pub healthy: bool,
    pub calls: AtomicU32,
}

impl Default for MockFinanceConnector {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Teller,
            accounts: vec![account("acc_1")],
            transactions: Vec::new(),
            status: ConnectionState::Connected,
            healthy: true,
            calls: AtomicU32::new(0),
        }
    }
}

impl Connector for MockFinanceConnector {
    fn name(&self) -> &'static str {
        "mock-finance"
    }
    fn kind(&self) -> ProviderKind {
        self.kind
    }
}

#[async_trait]
impl FinanceProvider for MockFinanceConnector {
    async fn get_transactions(
        &self,
        _req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transactions.clone())
    }

    async fn get_accounts(&self, _req: &GetAccountsRequest) -> Result<Vec<Account>, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.clone())
    }

    async fn get_account_balance(
        &self,
        _req: &GetAccountBalanceRequest,
    ) -> Result<Balance, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Balance {
            amount: Decimal::new(100, 0),
            currency: "USD".to_string(),
        })
    }

    async fn get_institutions(
        &self,
        _req: &GetInstitutionsRequest,
    ) -> Result<Vec<Institution>, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }

    async fn delete_accounts(&self, _req: &DeleteAccountsRequest) -> Result<(), PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get_connection_status(
        &self,
        _req: &GetConnectionStatusRequest,
    ) -> Result<ConnectionStatus, PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ConnectionStatus {
            status: self.status,
        })
    }

    async fn delete_connection(&self, _req: &DeleteConnectionRequest) -> Result<(), PonteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}

pub fn offer(id: &str) -> Offer {
    Offer {
        id: id.to_string(),
        origin: "LHR".to_string(),
        destination: "JFK".to_string(),
        price: price("254.70"),
    }
}

pub fn order(id: &str) -> Order {
    Order {
        id: id.to_string(),
        reference: Some("REF123".to_string()),
        status: OrderStatus::Confirmed,
        price: price("254.70"),
    }
}

pub fn account(id: &str) -> Account {
    Account {
        id: id.to_string(),
        name: "Checking".to_string(),
        currency: "USD".to_string(),
        account_type: AccountType::Depository,
        institution: Institution {
            id: "inst_1".to_string(),
            name: "First Mock Bank".to_string(),
            logo: None,
            provider: ProviderKind::Teller,
        },
        balance: Balance {
            amount: Decimal::new(100000, 2),
            currency: "USD".to_string(),
        },
        provider_refs: ProviderRefs {
            enrollment_id: Some("enr_1".to_string()),
            resource_id: None,
        },
    }
}

pub fn price(amount: &str) -> Price {
    Price {
        amount: amount.parse().unwrap(),
        currency: "GBP".to_string(),
    }
}

pub fn search_request() -> SearchFlightsRequest {
    SearchFlightsRequest {
        origin: "LHR".to_string(),
        destination: "JFK".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
        return_date: None,
        passengers: Default::default(),
        cabin_class: None,
    }
}
