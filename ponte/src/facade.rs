use std::sync::Arc;

use ponte_core::{FinanceProvider, PonteError, TravelProvider};
use ponte_types::{
    Account, AddAncillariesRequest, Balance, CancelOrderRequest, ConnectionState,
    ConnectionStatus, CreateOrderRequest, DeleteAccountsRequest, DeleteConnectionRequest,
    GetAccountBalanceRequest, GetAccountsRequest, GetConnectionStatusRequest,
    GetInstitutionsRequest, GetOffersRequest, GetPricingRequest, GetSeatMapsRequest,
    GetTransactionsRequest, Institution, ModifyOrderRequest, Offer, Order, OrderCancellation,
    Pricing, ProviderFamily, ProviderKind, RetrieveOrderRequest, SearchFlightsRequest, SeatMap,
    Transaction,
};

use crate::params::ProviderParams;

/// The provider facade.
///
/// Dispatch is resolved once at construction: the configured tag picks one
/// concrete connector, and every call after that forwards to it. A facade
/// with no adapter behind an operation answers with that operation's neutral
/// default instead of erroring, so callers can issue the full surface
/// unconditionally.
pub struct Ponte {
    provider: Option<ProviderKind>,
    travel: Option<Arc<dyn TravelProvider>>,
    finance: Option<Arc<dyn FinanceProvider>>,
}

impl std::fmt::Debug for Ponte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ponte")
            .field("provider", &self.provider)
            .field("travel", &self.travel.is_some())
            .field("finance", &self.finance.is_some())
            .finish()
    }
}

impl Ponte {
    /// Resolves the configured tag into a connector.
    ///
    /// `provider: None` builds an adapterless facade. A tagged vendor whose
    /// credentials are incomplete fails here, not at first use.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the selected vendor's credentials are
    /// missing from the bundle.
    pub fn new(params: &ProviderParams) -> Result<Self, PonteError> {
        let Some(kind) = params.provider else {
            return Ok(Self {
                provider: None,
                travel: None,
                finance: None,
            });
        };
        let http = params.transport.clone().unwrap_or_default();
        let creds = &params.credentials;
        let mut facade = Self {
            provider: Some(kind),
            travel: None,
            finance: None,
        };
        match kind {
            ProviderKind::Duffel => {
                facade.travel =
                    Some(Arc::new(ponte_duffel::DuffelConnector::with_http_client(creds, http)?));
            }
            ProviderKind::Amadeus => {
                facade.travel = Some(Arc::new(ponte_amadeus::AmadeusConnector::with_http_client(
                    creds, http,
                )?));
            }
            ProviderKind::Teller => {
                facade.finance =
                    Some(Arc::new(ponte_teller::TellerConnector::with_http_client(creds, http)?));
            }
            ProviderKind::Plaid => {
                facade.finance =
                    Some(Arc::new(ponte_plaid::PlaidConnector::with_http_client(creds, http)?));
            }
            ProviderKind::Gocardless => {
                facade.finance = Some(Arc::new(
                    ponte_gocardless::GocardlessConnector::with_http_client(creds, http)?,
                ));
            }
        }
        Ok(facade)
    }

    /// Wraps a caller-built travel connector.
    #[must_use]
    pub fn from_travel(connector: Arc<dyn TravelProvider>) -> Self {
        Self {
            provider: Some(connector.kind()),
            travel: Some(connector),
            finance: None,
        }
    }

    /// Wraps a caller-built finance connector.
    #[must_use]
    pub fn from_finance(connector: Arc<dyn FinanceProvider>) -> Self {
        Self {
            provider: Some(connector.kind()),
            finance: Some(connector),
            travel: None,
        }
    }

    /// The vendor this facade dispatches to, if any.
    #[must_use]
    pub fn provider(&self) -> Option<ProviderKind> {
        self.provider
    }

    /// The family the active adapter belongs to, if any.
    #[must_use]
    pub fn family(&self) -> Option<ProviderFamily> {
        self.provider.map(ProviderKind::family)
    }

    fn tag(&self) -> &'static str {
        self.provider.map_or("none", ProviderKind::as_str)
    }

    /// Searches flight availability. Neutral default: no offers.
    pub async fn search_flights(
        &self,
        req: &SearchFlightsRequest,
    ) -> Result<Vec<Offer>, PonteError> {
        tracing::info!(
            operation = "search_flights",
            provider = self.tag(),
            origin = %req.origin,
            destination = %req.destination,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.search_flights(req).await,
            None => Ok(Vec::new()),
        }
    }

    /// Fetches one offer. Neutral default: `None`.
    pub async fn get_offers(&self, req: &GetOffersRequest) -> Result<Option<Offer>, PonteError> {
        tracing::info!(
            operation = "get_offers",
            provider = self.tag(),
            offer_id = %req.offer_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.get_offers(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Confirms current pricing for an offer. Neutral default: `None`.
    pub async fn get_pricing(&self, req: &GetPricingRequest) -> Result<Option<Pricing>, PonteError> {
        tracing::info!(
            operation = "get_pricing",
            provider = self.tag(),
            offer_id = %req.offer_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.get_pricing(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Books an offer into an order. Never retried. Neutral default: `None`.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<Option<Order>, PonteError> {
        tracing::info!(
            operation = "create_order",
            provider = self.tag(),
            offer_id = %req.offer_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.create_order(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetches an existing order. Neutral default: `None`.
    pub async fn retrieve_order(
        &self,
        req: &RetrieveOrderRequest,
    ) -> Result<Option<Order>, PonteError> {
        tracing::info!(
            operation = "retrieve_order",
            provider = self.tag(),
            order_id = %req.order_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.retrieve_order(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Cancels an order. Never retried. Neutral default: `None`.
    pub async fn cancel_order(
        &self,
        req: &CancelOrderRequest,
    ) -> Result<Option<OrderCancellation>, PonteError> {
        tracing::info!(
            operation = "cancel_order",
            provider = self.tag(),
            order_id = %req.order_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.cancel_order(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Requests flight changes on an order. Neutral default: `None`.
    ///
    /// # Errors
    /// Forwards the adapter's error unchanged, including `Unsupported` from
    /// vendors without a modification API.
    pub async fn modify_order(&self, req: &ModifyOrderRequest) -> Result<Option<Order>, PonteError> {
        tracing::info!(
            operation = "modify_order",
            provider = self.tag(),
            order_id = %req.order_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.modify_order(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Attaches ancillary services to an order. Neutral default: `None`.
    ///
    /// # Errors
    /// Forwards the adapter's error unchanged, including `Unsupported` from
    /// vendors without an ancillaries API.
    pub async fn add_ancillaries(
        &self,
        req: &AddAncillariesRequest,
    ) -> Result<Option<Order>, PonteError> {
        tracing::info!(
            operation = "add_ancillaries",
            provider = self.tag(),
            order_id = %req.order_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.add_ancillaries(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetches seat maps for an offer. Neutral default: no maps.
    pub async fn get_seat_maps(&self, req: &GetSeatMapsRequest) -> Result<Vec<SeatMap>, PonteError> {
        tracing::info!(
            operation = "get_seat_maps",
            provider = self.tag(),
            offer_id = %req.offer_id,
            "dispatching"
        );
        match &self.travel {
            Some(p) => p.get_seat_maps(req).await,
            None => Ok(Vec::new()),
        }
    }

    /// Fetches an account's transactions. Neutral default: no transactions.
    pub async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, PonteError> {
        tracing::info!(
            operation = "get_transactions",
            provider = self.tag(),
            account_id = %req.account_id,
            "dispatching"
        );
        match &self.finance {
            Some(p) => p.get_transactions(req).await,
            None => Ok(Vec::new()),
        }
    }

    /// Fetches the accounts behind a connection. Neutral default: no
    /// accounts.
    pub async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, PonteError> {
        tracing::info!(operation = "get_accounts", provider = self.tag(), "dispatching");
        match &self.finance {
            Some(p) => p.get_accounts(req).await,
            None => Ok(Vec::new()),
        }
    }

    /// Fetches one account's balance. Neutral default: `None`.
    pub async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Option<Balance>, PonteError> {
        tracing::info!(
            operation = "get_account_balance",
            provider = self.tag(),
            account_id = %req.account_id,
            "dispatching"
        );
        match &self.finance {
            Some(p) => p.get_account_balance(req).await.map(Some),
            None => Ok(None),
        }
    }

    /// Lists reachable institutions. Neutral default: no institutions.
    pub async fn get_institutions(
        &self,
        req: &GetInstitutionsRequest,
    ) -> Result<Vec<Institution>, PonteError> {
        tracing::info!(operation = "get_institutions", provider = self.tag(), "dispatching");
        match &self.finance {
            Some(p) => p.get_institutions(req).await,
            None => Ok(Vec::new()),
        }
    }

    /// Detaches accounts from a connection. Neutral default: success.
    pub async fn delete_accounts(&self, req: &DeleteAccountsRequest) -> Result<(), PonteError> {
        tracing::info!(operation = "delete_accounts", provider = self.tag(), "dispatching");
        match &self.finance {
            Some(p) => p.delete_accounts(req).await,
            None => Ok(()),
        }
    }

    /// Queries whether a connection's credentials still hold. Neutral
    /// default: connected, since there is nothing to be disconnected from.
    pub async fn get_connection_status(
        &self,
        req: &GetConnectionStatusRequest,
    ) -> Result<ConnectionStatus, PonteError> {
        tracing::info!(
            operation = "get_connection_status",
            provider = self.tag(),
            "dispatching"
        );
        match &self.finance {
            Some(p) => p.get_connection_status(req).await,
            None => Ok(ConnectionStatus {
                status: ConnectionState::Connected,
            }),
        }
    }

    /// Severs a connection at the vendor. Neutral default: success.
    pub async fn delete_connection(&self, req: &DeleteConnectionRequest) -> Result<(), PonteError> {
        tracing::info!(operation = "delete_connection", provider = self.tag(), "dispatching");
        match &self.finance {
            Some(p) => p.delete_connection(req).await,
            None => Ok(()),
        }
    }

    /// Probes the active adapter. An adapterless facade reads as healthy.
    pub async fn provider_health(&self) -> bool {
        match (&self.travel, &self.finance) {
            (Some(p), _) => p.health_check().await,
            (_, Some(p)) => p.health_check().await,
            (None, None) => true,
        }
    }
}
