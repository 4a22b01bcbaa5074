use async_trait::async_trait;
use ponte_types::{
    Account, AddAncillariesRequest, Balance, CancelOrderRequest, ConnectionStatus,
    CreateOrderRequest, DeleteAccountsRequest, DeleteConnectionRequest, GetAccountBalanceRequest,
    GetAccountsRequest, GetConnectionStatusRequest, GetInstitutionsRequest, GetOffersRequest,
    GetPricingRequest, GetSeatMapsRequest, GetTransactionsRequest, Institution,
    ModifyOrderRequest, Offer, Order, OrderCancellation, Pricing, ProviderKind,
    RetrieveOrderRequest, SearchFlightsRequest, SeatMap, Transaction,
};

use crate::error::PonteError;

/// Identity shared by every vendor connector.
pub trait Connector: Send + Sync {
    /// Stable connector name for logs, e.g. `"duffel"`.
    fn name(&self) -> &'static str;

    /// Which vendor this connector talks to.
    fn kind(&self) -> ProviderKind;
}

/// Flight search and booking capability.
///
/// A connector implements exactly one of [`TravelProvider`] and
/// [`FinanceProvider`]; the split is fixed by [`ProviderKind::family`].
#[async_trait]
pub trait TravelProvider: Connector {
    /// Searches availability and returns every offer the vendor produced,
    /// fully paginated.
    async fn search_flights(&self, req: &SearchFlightsRequest)
    -> Result<Vec<Offer>, PonteError>;

    /// Fetches a single offer by identifier.
    async fn get_offers(&self, req: &GetOffersRequest) -> Result<Offer, PonteError>;

    /// Confirms up-to-date pricing for an offer before booking.
    async fn get_pricing(&self, req: &GetPricingRequest) -> Result<Pricing, PonteError>;

    /// Books an offer into an order. Issued exactly once, never retried.
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, PonteError>;

    /// Fetches an existing order.
    async fn retrieve_order(&self, req: &RetrieveOrderRequest) -> Result<Order, PonteError>;

    /// Cancels an existing order. Issued exactly once, never retried.
    async fn cancel_order(
        &self,
        req: &CancelOrderRequest,
    ) -> Result<OrderCancellation, PonteError>;

    /// Requests flight changes on an existing order.
    async fn modify_order(&self, req: &ModifyOrderRequest) -> Result<Order, PonteError>;

    /// Attaches ancillary services to an existing order.
    async fn add_ancillaries(&self, req: &AddAncillariesRequest) -> Result<Order, PonteError>;

    /// Fetches seat maps for an offer.
    async fn get_seat_maps(&self, req: &GetSeatMapsRequest) -> Result<Vec<SeatMap>, PonteError>;

    /// Issues the vendor's cheapest probe call. Never errors; any failure
    /// reads as `false`.
    async fn health_check(&self) -> bool;
}

/// Bank account and transaction data capability.
#[async_trait]
pub trait FinanceProvider: Connector {
    /// Fetches an account's transactions, fully paginated unless the
    /// request asks for the latest page only.
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, PonteError>;

    /// Fetches the accounts behind a connection.
    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, PonteError>;

    /// Fetches one account's current balance.
    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Balance, PonteError>;

    /// Lists the institutions reachable through this vendor.
    async fn get_institutions(
        &self,
        req: &GetInstitutionsRequest,
    ) -> Result<Vec<Institution>, PonteError>;

    /// Detaches accounts from a connection.
    async fn delete_accounts(&self, req: &DeleteAccountsRequest) -> Result<(), PonteError>;

    /// Queries whether the connection's credentials are still honored.
    async fn get_connection_status(
        &self,
        req: &GetConnectionStatusRequest,
    ) -> Result<ConnectionStatus, PonteError>;

    /// Severs a connection at the vendor.
    async fn delete_connection(&self, req: &DeleteConnectionRequest) -> Result<(), PonteError>;

    /// Issues the vendor's cheapest probe call. Never errors; any failure
    /// reads as `false`.
    async fn health_check(&self) -> bool;
}
