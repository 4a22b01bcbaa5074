//! ponte-duffel
//!
//! Connector that implements `TravelProvider` on top of the Duffel v2 API.
//! Owns its wire client; reads go through the shared retry executor, offer
//! listings through the throttled paginator, order and payment writes are
//! issued exactly once.
#![warn(missing_docs)]

mod client;
mod error;
mod transform;

use async_trait::async_trait;
use ponte_core::{
    Connector, PageConfig, PonteError, RetryPolicy, TravelProvider, paginate, with_retry,
};
use ponte_types::{
    AddAncillariesRequest, CancelOrderRequest, CreateOrderRequest, Credentials, GetOffersRequest,
    GetPricingRequest, GetSeatMapsRequest, ModifyOrderRequest, Offer, Order, OrderCancellation,
    Pricing, ProviderKind, RetrieveOrderRequest, SearchFlightsRequest, SeatMap, keys,
};
use serde_json::json;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.duffel.com";

/// Duffel-backed travel connector.
#[derive(Debug)]
pub struct DuffelConnector {
    client: client::DuffelClient,
    retry: RetryPolicy,
    pages: PageConfig,
}

impl DuffelConnector {
    /// Build with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the access token is missing from the bundle.
    pub fn new(credentials: &Credentials) -> Result<Self, PonteError> {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Build on a caller-supplied `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the access token is missing from the bundle.
    pub fn with_http_client(
        credentials: &Credentials,
        http: reqwest::Client,
    ) -> Result<Self, PonteError> {
        let token = credentials.require(keys::DUFFEL_ACCESS_TOKEN)?.to_string();
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| PonteError::invalid_arg(format!("bad base url: {e}")))?;
        Ok(Self {
            client: client::DuffelClient::new(token, http, base_url),
            retry: RetryPolicy::default(),
            pages: PageConfig::default(),
        })
    }

    /// Point the connector at a different API origin (sandboxes, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.client.set_base_url(base_url);
        self
    }
}

impl Connector for DuffelConnector {
    fn name(&self) -> &'static str {
        "duffel"
    }
    fn kind(&self) -> ProviderKind {
        ProviderKind::Duffel
    }
}

#[async_trait]
impl TravelProvider for DuffelConnector {
    async fn search_flights(
        &self,
        req: &SearchFlightsRequest,
    ) -> Result<Vec<Offer>, PonteError> {
        let offer_request =
            with_retry(&self.retry, || self.client.create_offer_request(req)).await?;
        let offer_request_id = offer_request.id.as_str();
        let raw = paginate(
            &self.pages,
            || {},
            |offset, limit| {
                with_retry(&self.retry, move || {
                    self.client.list_offers(offer_request_id, offset, limit)
                })
            },
        )
        .await?;
        raw.into_iter().map(transform::offer).collect()
    }

    async fn get_offers(&self, req: &GetOffersRequest) -> Result<Offer, PonteError> {
        let raw = with_retry(&self.retry, || self.client.get_offer(&req.offer_id)).await?;
        transform::offer(raw)
    }

    async fn get_pricing(&self, req: &GetPricingRequest) -> Result<Pricing, PonteError> {
        // Re-fetching the offer returns its current total and conditions.
        let raw = with_retry(&self.retry, || self.client.get_offer(&req.offer_id)).await?;
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
        let created = self.client.create_cancellation(&req.order_id).await?;
        let confirmed = self.client.confirm_cancellation(&created.id).await?;
        transform::cancellation(confirmed)
    }

    async fn modify_order(&self, req: &ModifyOrderRequest) -> Result<Order, PonteError> {
        let slices = req
            .modifications
            .iter()
            .map(|m| {
                let mut slice = json!({
                    "slice_id": m.slice_id,
                    "departure_date": m.departure_date,
                });
                if let Some(cabin) = m.cabin_class {
                    slice["cabin_class"] = json!(cabin);
                }
                slice
            })
            .collect();
        self.client
            .create_change_request(&req.order_id, slices)
            .await?;
        let raw = with_retry(&self.retry, || self.client.get_order(&req.order_id)).await?;
        transform::order(raw)
    }

    async fn add_ancillaries(&self, req: &AddAncillariesRequest) -> Result<Order, PonteError> {
        let raw = self
            .client
            .add_services(&req.order_id, &req.services)
            .await?;
        transform::order(raw)
    }

    async fn get_seat_maps(&self, req: &GetSeatMapsRequest) -> Result<Vec<SeatMap>, PonteError> {
        let raw = with_retry(&self.retry, || self.client.list_seat_maps(&req.offer_id)).await?;
        Ok(raw.into_iter().map(transform::seat_map).collect())
    }

    async fn health_check(&self) -> bool {
        match self.client.probe().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(provider = "duffel", error = %err, "health probe failed");
                false
            }
        }
    }
}
