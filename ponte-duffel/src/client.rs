//! Private wire client for the Duffel v2 API.

use ponte_core::PonteError;
use ponte_types::{AncillaryService, CreateOrderRequest, SearchFlightsRequest};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::error;

const API_VERSION: &str = "v2";

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OfferRequest {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Place {
    pub iata_code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Slice {
    pub origin: Place,
    pub destination: Place,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionDetail {
    pub allowed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Conditions {
    pub change_before_departure: Option<ConditionDetail>,
    pub refund_before_departure: Option<ConditionDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Offer {
    pub id: String,
    pub total_amount: String,
    pub total_currency: String,
    #[serde(default)]
    pub slices: Vec<Slice>,
    #[serde(default)]
    pub conditions: Option<Conditions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Order {
    pub id: String,
    pub booking_reference: Option<String>,
    pub total_amount: String,
    pub total_currency: String,
    #[serde(default)]
    pub cancelled_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderCancellation {
    pub id: String,
    pub order_id: String,
    #[serde(default)]
    pub refund_amount: Option<String>,
    #[serde(default)]
    pub refund_currency: Option<String>,
    #[serde(default)]
    pub confirmed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Cabin {
    pub cabin_class: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeatMap {
    pub id: String,
    pub segment_id: String,
    #[serde(default)]
    pub cabins: Vec<Cabin>,
}

#[derive(Debug)]
pub(crate) struct DuffelClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl DuffelClient {
    pub(crate) fn new(token: String, http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    pub(crate) fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, PonteError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PonteError::invalid_arg(format!("bad url path {path:?}: {e}")))?;
        let mut req = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Duffel-Version", API_VERSION)
            .header(reqwest::header::ACCEPT, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(match error::normalize(status, &text) {
                Some((code, message)) => PonteError::provider(code, message),
                None => PonteError::status(status, text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn create_offer_request(
        &self,
        req: &SearchFlightsRequest,
    ) -> Result<OfferRequest, PonteError> {
        let mut slices = vec![json!({
            "origin": req.origin,
            "destination": req.destination,
            "departure_date": req.departure_date,
        })];
        if let Some(return_date) = req.return_date {
            slices.push(json!({
                "origin": req.destination,
                "destination": req.origin,
                "departure_date": return_date,
            }));
        }
        let mut passengers = Vec::new();
        for _ in 0..req.passengers.adults {
            passengers.push(json!({"type": "adult"}));
        }
        for _ in 0..req.passengers.children {
            passengers.push(json!({"type": "child"}));
        }
        for _ in 0..req.passengers.infants {
            passengers.push(json!({"type": "infant_without_seat"}));
        }
        let mut data = json!({"slices": slices, "passengers": passengers});
        if let Some(cabin) = req.cabin_class {
            data["cabin_class"] = json!(cabin);
        }
        let env: Envelope<OfferRequest> = self
            .send(
                Method::POST,
                "/air/offer_requests",
                &[("return_offers", "false".to_string())],
                Some(json!({"data": data})),
            )
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn list_offers(
        &self,
        offer_request_id: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Offer>, PonteError> {
        let env: Envelope<Vec<Offer>> = self
            .send(
                Method::GET,
                "/air/offers",
                &[
                    ("offer_request_id", offer_request_id.to_string()),
                    ("offset", offset.to_string()),
                    ("limit", limit.to_string()),
                ],
                None,
            )
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn get_offer(&self, offer_id: &str) -> Result<Offer, PonteError> {
        let env: Envelope<Offer> = self
            .send(Method::GET, &format!("/air/offers/{offer_id}"), &[], None)
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, PonteError> {
        let passengers: Vec<Value> = req
            .passengers
            .iter()
            .map(|p| {
                json!({
                    "given_name": p.given_name,
                    "family_name": p.family_name,
                    "born_on": p.born_on,
                    "type": p.passenger_type,
                    "email": req.contact.email,
                    "phone_number": req.contact.phone_number,
                })
            })
            .collect();
        let body = json!({
            "data": {
                "type": "instant",
                "selected_offers": [req.offer_id],
                "passengers": passengers,
            }
        });
        let env: Envelope<Order> = self
            .send(Method::POST, "/air/orders", &[], Some(body))
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn get_order(&self, order_id: &str) -> Result<Order, PonteError> {
        let env: Envelope<Order> = self
            .send(Method::GET, &format!("/air/orders/{order_id}"), &[], None)
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn create_cancellation(
        &self,
        order_id: &str,
    ) -> Result<OrderCancellation, PonteError> {
        let body = json!({"data": {"order_id": order_id}});
        let env: Envelope<OrderCancellation> = self
            .send(Method::POST, "/air/order_cancellations", &[], Some(body))
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn confirm_cancellation(
        &self,
        cancellation_id: &str,
    ) -> Result<OrderCancellation, PonteError> {
        let env: Envelope<OrderCancellation> = self
            .send(
                Method::POST,
                &format!("/air/order_cancellations/{cancellation_id}/actions/confirm"),
                &[],
                None,
            )
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn create_change_request(
        &self,
        order_id: &str,
        slices: Vec<Value>,
    ) -> Result<(), PonteError> {
        let body = json!({"data": {"order_id": order_id, "slices": {"remove": [], "add": slices}}});
        let _: Value = self
            .send(Method::POST, "/air/order_change_requests", &[], Some(body))
            .await?;
        Ok(())
    }

    pub(crate) async fn add_services(
        &self,
        order_id: &str,
        services: &[AncillaryService],
    ) -> Result<Order, PonteError> {
        let add_services: Vec<Value> = services
            .iter()
            .map(|s| json!({"id": s.id, "quantity": s.quantity}))
            .collect();
        let body = json!({"data": {"add_services": add_services}});
        let env: Envelope<Order> = self
            .send(
                Method::POST,
                &format!("/air/orders/{order_id}/services"),
                &[],
                Some(body),
            )
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn list_seat_maps(&self, offer_id: &str) -> Result<Vec<SeatMap>, PonteError> {
        let env: Envelope<Vec<SeatMap>> = self
            .send(
                Method::GET,
                "/air/seat_maps",
                &[("offer_id", offer_id.to_string())],
                None,
            )
            .await?;
        Ok(env.data)
    }

    /// Cheapest authenticated call the API offers.
    pub(crate) async fn probe(&self) -> Result<(), PonteError> {
        let _: Value = self
            .send(
                Method::GET,
                "/air/offers",
                &[("limit", "1".to_string())],
                None,
            )
            .await?;
        Ok(())
    }
}
