//! ponte-amadeus
//!
//! Connector that implements `TravelProvider` on top of the Amadeus
//! Self-Service APIs. The vendor exposes no order-change or ancillary
//! endpoints, so `modify_order` and `add_ancillaries` report unsupported.
#![warn(missing_docs)]

mod client;
mod error;
mod transform;

use async_trait::async_trait;
use ponte_core::{Connector, PonteError, RetryPolicy, TravelProvider, with_retry};
use ponte_types::{
    AddAncillariesRequest, CancelOrderRequest, CreateOrderRequest, Credentials, GetOffersRequest,
    GetPricingRequest, GetSeatMapsRequest, ModifyOrderRequest, Offer, Order, OrderCancellation,
    OrderStatus, Pricing, ProviderKind, RetrieveOrderRequest, SearchFlightsRequest, SeatMap, keys,
};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.amadeus.com";

/// Amadeus-backed travel connector.
#[derive(Debug)]
pub struct AmadeusConnector {
    client: client::AmadeusClient,
    retry: RetryPolicy,
}

impl AmadeusConnector {
    /// Build with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the client id or secret is missing.
    pub fn new(credentials: &Credentials) -> Result<Self, PonteError> {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Build on a caller-supplied `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the client id or secret is missing.
    pub fn with_http_client(
        credentials: &Credentials,
        http: reqwest::Client,
    ) -> Result<Self, PonteError> {
        let client_id = credentials.require(keys::AMADEUS_CLIENT_ID)?.to_string();
        let client_secret = credentials.require(keys::AMADEUS_CLIENT_SECRET)?.to_string();
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| PonteError::invalid_arg(format!("bad base url: {e}")))?;
        Ok(Self {
            client: client::AmadeusClient::new(client_id, client_secret, http, base_url),
            retry: RetryPolicy::default(),
        })
    }

    /// Point the connector at a different API origin (sandboxes, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.client.set_base_url(base_url);
        self
    }
}

impl Connector for AmadeusConnector {
    fn name(&self) -> &'static str {
        "amadeus"
    }
    fn kind(&self) -> ProviderKind {
        ProviderKind::Amadeus
    }
}

#[async_trait]
impl TravelProvider for AmadeusConnector {
    async fn search_flights(
        &self,
        req: &SearchFlightsRequest,
    ) -> Result<Vec<Offer>, PonteError> {
        let raw = with_retry(&self.retry, || self.client.search_offers(req)).await?;
        raw.into_iter().map(transform::offer).collect()
    }

    async fn get_offers(&self, req: &GetOffersRequest) -> Result<Offer, PonteError> {
        // There is no offer-by-id endpoint; repricing returns the offer in
        // its current state.
        let raw = with_retry(&self.retry, || self.client.price_offer(&req.offer_id)).await?;
        transform::offer(raw)
    }

    async fn get_pricing(&self, req: &GetPricingRequest) -> Result<Pricing, PonteError> {
        let raw = with_retry(&self.retry, || self.client.price_offer(&req.offer_id)).await?;
        transform::pricing(raw)
    }

    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, PonteError> {
        let raw = self.client.create_order(req).await?;
        transform::order(raw)
    }

    async fn retrieve_order(&self, req: &RetrieveOrderRequest) -> Result<Order, PonteError> {
        let raw = with_retry(&self.retry, || self.client.get_order(&req.order_id)).await?;
        transform::order(raw)
    }

    async fn cancel_order(
        &self,
        req: &CancelOrderRequest,
    ) -> Result<OrderCancellation, PonteError> {
        self.client.delete_order(&req.order_id).await?;
        // The DELETE answers with no body; the cancellation mirrors the
        // order id and carries no refund detail.
        Ok(OrderCancellation {
            id: req.order_id.clone(),
            order_id: req.order_id.clone(),
            status: OrderStatus::Cancelled,
            refund: None,
        })
    }

    async fn modify_order(&self, _req: &ModifyOrderRequest) -> Result<Order, PonteError> {
        Err(PonteError::unsupported("orders/modify"))
    }

    async fn add_ancillaries(&self, _req: &AddAncillariesRequest) -> Result<Order, PonteError> {
        Err(PonteError::unsupported("orders/ancillaries"))
    }

    async fn get_seat_maps(&self, req: &GetSeatMapsRequest) -> Result<Vec<SeatMap>, PonteError> {
        let raw = with_retry(&self.retry, || self.client.seat_maps(&req.offer_id)).await?;
        Ok(raw.into_iter().map(transform::seat_map).collect())
    }

    async fn health_check(&self) -> bool {
        match self.client.probe().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(provider = "amadeus", error = %err, "health probe failed");
                false
            }
        }
    }
}
