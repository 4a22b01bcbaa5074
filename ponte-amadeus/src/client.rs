//! Private wire client for the Amadeus Self-Service APIs.
//!
//! Authentication is OAuth2 client-credentials; the bearer token is fetched
//! lazily and cached until shortly before its expiry.

use std::time::{Duration, Instant};

use ponte_core::PonteError;
use ponte_types::{CabinClass, CreateOrderRequest, PassengerType, SearchFlightsRequest};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use url::Url;

use crate::error;

// Renew ahead of the vendor's expiry to avoid racing it mid-request.
const TOKEN_LEEWAY: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    bearer: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Endpoint {
    #[serde(rename = "iataCode")]
    pub iata_code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Segment {
    pub departure: Endpoint,
    pub arrival: Endpoint,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Itinerary {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OfferPrice {
    #[serde(rename = "grandTotal")]
    pub grand_total: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlightOffer {
    pub id: String,
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
    pub price: OfferPrice,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PricedOffers {
    #[serde(rename = "flightOffers")]
    pub flight_offers: Vec<FlightOffer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssociatedRecord {
    pub reference: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlightOrder {
    pub id: String,
    #[serde(default, rename = "associatedRecords")]
    pub associated_records: Vec<AssociatedRecord>,
    #[serde(default, rename = "flightOffers")]
    pub flight_offers: Vec<FlightOffer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeatMap {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "segmentId")]
    pub segment_id: String,
    #[serde(default, rename = "class")]
    pub cabin_class: Option<String>,
}

#[derive(Debug)]
pub(crate) struct AmadeusClient {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl AmadeusClient {
    pub(crate) fn new(
        client_id: String,
        client_secret: String,
        http: reqwest::Client,
        base_url: Url,
    ) -> Self {
        Self {
            http,
            base_url,
            client_id,
            client_secret,
            token: Mutex::new(None),
        }
    }

    pub(crate) fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    fn url(&self, path: &str) -> Result<Url, PonteError> {
        self.base_url
            .join(path)
            .map_err(|e| PonteError::invalid_arg(format!("bad url path {path:?}: {e}")))
    }

    async fn bearer(&self) -> Result<String, PonteError> {
        let mut cache = self.token.lock().await;
        if let Some(token) = cache.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.bearer.clone());
        }
        let resp = self
            .http
            .post(self.url("/v1/security/oauth2/token")?)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
            ])
            .send()
            .await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(match error::normalize(status, &text) {
                Some((code, message)) => PonteError::provider(code, message),
                None => PonteError::status(status, text),
            });
        }
        let token: TokenResponse = serde_json::from_str(&text)?;
        let ttl = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_LEEWAY);
        let bearer = token.access_token.clone();
        *cache = Some(CachedToken {
            bearer: token.access_token,
            expires_at: Instant::now() + ttl,
        });
        Ok(bearer)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, PonteError> {
        let bearer = self.bearer().await?;
        let mut req = self
            .http
            .request(method, self.url(path)?)
            .bearer_auth(bearer)
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

    /// Like `send`, for endpoints answering 204 with no body.
    async fn send_no_content(&self, method: Method, path: &str) -> Result<(), PonteError> {
        let bearer = self.bearer().await?;
        let resp = self
            .http
            .request(method, self.url(path)?)
            .bearer_auth(bearer)
            .send()
            .await?;
        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let text = resp.text().await?;
            return Err(match error::normalize(status, &text) {
                Some((code, message)) => PonteError::provider(code, message),
                None => PonteError::status(status, text),
            });
        }
        Ok(())
    }

    pub(crate) async fn search_offers(
        &self,
        req: &SearchFlightsRequest,
    ) -> Result<Vec<FlightOffer>, PonteError> {
        let mut query = vec![
            ("originLocationCode", req.origin.clone()),
            ("destinationLocationCode", req.destination.clone()),
            ("departureDate", req.departure_date.to_string()),
            ("adults", req.passengers.adults.to_string()),
            ("max", "50".to_string()),
        ];
        if let Some(return_date) = req.return_date {
            query.push(("returnDate", return_date.to_string()));
        }
        if req.passengers.children > 0 {
            query.push(("children", req.passengers.children.to_string()));
        }
        if req.passengers.infants > 0 {
            query.push(("infants", req.passengers.infants.to_string()));
        }
        if let Some(cabin) = req.cabin_class {
            query.push(("travelClass", travel_class(cabin).to_string()));
        }
        let env: Envelope<Vec<FlightOffer>> = self
            .send(Method::GET, "/v2/shopping/flight-offers", &query, None)
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn price_offer(&self, offer_id: &str) -> Result<FlightOffer, PonteError> {
        let body = json!({
            "data": {
                "type": "flight-offers-pricing",
                "flightOffers": [{"type": "flight-offer", "id": offer_id}],
            }
        });
        let env: Envelope<PricedOffers> = self
            .send(
                Method::POST,
                "/v1/shopping/flight-offers/pricing",
                &[],
                Some(body),
            )
            .await?;
        env.data
            .flight_offers
            .into_iter()
            .next()
            .ok_or_else(|| PonteError::data(format!("pricing for {offer_id} returned no offers")))
    }

    pub(crate) async fn create_order(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<FlightOrder, PonteError> {
        let travelers: Vec<Value> = req
            .passengers
            .iter()
            .enumerate()
            .map(|(i, p)| {
                json!({
                    "id": (i + 1).to_string(),
                    "dateOfBirth": p.born_on,
                    "name": {"firstName": p.given_name, "lastName": p.family_name},
                    "travelerType": traveler_type(p.passenger_type),
                    "contact": {
                        "emailAddress": req.contact.email,
                        "phones": [{"deviceType": "MOBILE", "number": req.contact.phone_number}],
                    },
                })
            })
            .collect();
        let body = json!({
            "data": {
                "type": "flight-order",
                "flightOffers": [{"type": "flight-offer", "id": req.offer_id}],
                "travelers": travelers,
            }
        });
        let env: Envelope<FlightOrder> = self
            .send(Method::POST, "/v1/booking/flight-orders", &[], Some(body))
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn get_order(&self, order_id: &str) -> Result<FlightOrder, PonteError> {
        let env: Envelope<FlightOrder> = self
            .send(
                Method::GET,
                &format!("/v1/booking/flight-orders/{order_id}"),
                &[],
                None,
            )
            .await?;
        Ok(env.data)
    }

    pub(crate) async fn delete_order(&self, order_id: &str) -> Result<(), PonteError> {
        self.send_no_content(
            Method::DELETE,
            &format!("/v1/booking/flight-orders/{order_id}"),
        )
        .await
    }

    pub(crate) async fn seat_maps(&self, offer_id: &str) -> Result<Vec<SeatMap>, PonteError> {
        let body = json!({"data": [{"type": "flight-offer", "id": offer_id}]});
        let env: Envelope<Vec<SeatMap>> = self
            .send(Method::POST, "/v1/shopping/seatmaps", &[], Some(body))
            .await?;
        Ok(env.data)
    }

    /// Cheapest authenticated call: a city lookup.
    pub(crate) async fn probe(&self) -> Result<(), PonteError> {
        let _: Value = self
            .send(
                Method::GET,
                "/v1/reference-data/locations",
                &[
                    ("subType", "CITY".to_string()),
                    ("keyword", "LON".to_string()),
                ],
                None,
            )
            .await?;
        Ok(())
    }
}

fn travel_class(cabin: CabinClass) -> &'static str {
    match cabin {
        CabinClass::Economy => "ECONOMY",
        CabinClass::PremiumEconomy => "PREMIUM_ECONOMY",
        CabinClass::Business => "BUSINESS",
        CabinClass::First => "FIRST",
    }
}

fn traveler_type(pt: PassengerType) -> &'static str {
    match pt {
        PassengerType::Adult => "ADULT",
        PassengerType::Child => "CHILD",
        PassengerType::InfantWithoutSeat => "HELD_INFANT",
    }
}
