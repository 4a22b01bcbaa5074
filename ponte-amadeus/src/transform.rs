//! Pure conversions from Amadeus wire payloads to canonical types.

use std::str::FromStr;

use ponte_core::PonteError;
use ponte_types::{
    CabinClass, Offer, Order, OrderStatus, Price, Pricing, PricingConditions, SeatMap,
};
use rust_decimal::Decimal;

use crate::client;

fn price(raw: &client::OfferPrice) -> Result<Price, PonteError> {
    let amount = Decimal::from_str(&raw.grand_total)
        .map_err(|e| PonteError::data(format!("unparseable amount {:?}: {e}", raw.grand_total)))?;
    Ok(Price {
        amount,
        currency: raw.currency.clone(),
    })
}

pub(crate) fn offer(raw: client::FlightOffer) -> Result<Offer, PonteError> {
    let price = price(&raw.price)?;
    let outbound = raw
        .itineraries
        .first()
        .ok_or_else(|| PonteError::data(format!("offer {} has no itineraries", raw.id)))?;
    let origin = outbound
        .segments
        .first()
        .map(|s| s.departure.iata_code.clone())
        .ok_or_else(|| PonteError::data(format!("offer {} has no segments", raw.id)))?;
    let destination = outbound
        .segments
        .last()
        .map(|s| s.arrival.iata_code.clone())
        .ok_or_else(|| PonteError::data(format!("offer {} has no segments", raw.id)))?;
    Ok(Offer {
        id: raw.id,
        origin,
        destination,
        price,
    })
}

pub(crate) fn pricing(raw: client::FlightOffer) -> Result<Pricing, PonteError> {
    Ok(Pricing {
        price: price(&raw.price)?,
        // The pricing endpoint does not state fare conditions.
        conditions: PricingConditions::default(),
    })
}

pub(crate) fn order(raw: client::FlightOrder) -> Result<Order, PonteError> {
    let priced = raw
        .flight_offers
        .first()
        .ok_or_else(|| PonteError::data(format!("order {} carries no offers", raw.id)))?;
    let price = price(&priced.price)?;
    let reference = raw
        .associated_records
        .into_iter()
        .next()
        .map(|r| r.reference);
    Ok(Order {
        id: raw.id,
        reference,
        status: OrderStatus::Confirmed,
        price,
    })
}

pub(crate) fn seat_map(raw: client::SeatMap) -> SeatMap {
    let cabin_class = raw.cabin_class.as_deref().and_then(cabin_class);
    SeatMap {
        id: raw.id.unwrap_or_else(|| raw.segment_id.clone()),
        segment_id: raw.segment_id,
        cabin_class,
    }
}

fn cabin_class(s: &str) -> Option<CabinClass> {
    match s {
        "ECONOMY" => Some(CabinClass::Economy),
        "PREMIUM_ECONOMY" => Some(CabinClass::PremiumEconomy),
        "BUSINESS" => Some(CabinClass::Business),
        "FIRST" => Some(CabinClass::First),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_offer() -> client::FlightOffer {
        serde_json::from_str(
            r#"{
                "id": "1",
                "itineraries": [{
                    "segments": [
                        {"departure": {"iataCode": "MXP"}, "arrival": {"iataCode": "CDG"}},
                        {"departure": {"iataCode": "CDG"}, "arrival": {"iataCode": "JFK"}}
                    ]
                }],
                "price": {"grandTotal": "843.20", "currency": "EUR"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn offer_spans_the_whole_outbound_itinerary() {
        let canonical = offer(sample_offer()).unwrap();
        assert_eq!(canonical.id, "1");
        assert_eq!(canonical.origin, "MXP");
        assert_eq!(canonical.destination, "JFK");
        assert_eq!(canonical.price.amount, Decimal::new(84320, 2));
        assert_eq!(canonical.price.currency, "EUR");
    }

    #[test]
    fn empty_itineraries_are_a_data_error() {
        let mut raw = sample_offer();
        raw.itineraries.clear();
        assert!(matches!(offer(raw).unwrap_err(), PonteError::Data(_)));
    }

    #[test]
    fn order_takes_reference_from_associated_records() {
        let raw: client::FlightOrder = serde_json::from_str(
            r#"{
                "id": "eJzTd9f3",
                "associatedRecords": [{"reference": "QVXXYZ", "creationDate": "2026-03-01"}],
                "flightOffers": [{
                    "id": "1",
                    "itineraries": [],
                    "price": {"grandTotal": "843.20", "currency": "EUR"}
                }]
            }"#,
        )
        .unwrap();
        let canonical = order(raw).unwrap();
        assert_eq!(canonical.reference.as_deref(), Some("QVXXYZ"));
        assert_eq!(canonical.status, OrderStatus::Confirmed);
    }
}
