//! Pure conversions from Duffel wire payloads to canonical types.

use std::str::FromStr;

use ponte_core::PonteError;
use ponte_types::{
    CabinClass, Offer, Order, OrderCancellation, OrderStatus, Price, Pricing, PricingConditions,
    SeatMap,
};
use rust_decimal::Decimal;

use crate::client;

pub(crate) fn price(amount: &str, currency: &str) -> Result<Price, PonteError> {
    let amount = Decimal::from_str(amount)
        .map_err(|e| PonteError::data(format!("unparseable amount {amount:?}: {e}")))?;
    Ok(Price {
        amount,
        currency: currency.to_string(),
    })
}

pub(crate) fn offer(raw: client::Offer) -> Result<Offer, PonteError> {
    let price = price(&raw.total_amount, &raw.total_currency)?;
    let slice = raw
        .slices
        .first()
        .ok_or_else(|| PonteError::data(format!("offer {} has no slices", raw.id)))?;
    let origin = slice.origin.iata_code.clone();
    let destination = slice.destination.iata_code.clone();
    Ok(Offer {
        id: raw.id,
        origin,
        destination,
        price,
    })
}

pub(crate) fn pricing(raw: client::Offer) -> Result<Pricing, PonteError> {
    let price = price(&raw.total_amount, &raw.total_currency)?;
    let conditions = raw.conditions.unwrap_or_default();
    Ok(Pricing {
        price,
        conditions: PricingConditions {
            change_before_departure: conditions.change_before_departure.map(|c| c.allowed),
            refund_before_departure: conditions.refund_before_departure.map(|c| c.allowed),
        },
    })
}

pub(crate) fn order(raw: client::Order) -> Result<Order, PonteError> {
    let price = price(&raw.total_amount, &raw.total_currency)?;
    let status = if raw.cancelled_at.is_some() {
        OrderStatus::Cancelled
    } else {
        OrderStatus::Confirmed
    };
    Ok(Order {
        id: raw.id,
        reference: raw.booking_reference,
        status,
        price,
    })
}

pub(crate) fn cancellation(raw: client::OrderCancellation) -> Result<OrderCancellation, PonteError> {
    let refund = match (raw.refund_amount.as_deref(), raw.refund_currency.as_deref()) {
        (Some(amount), Some(currency)) => Some(price(amount, currency)?),
        _ => None,
    };
    let status = if raw.confirmed_at.is_some() {
        OrderStatus::Cancelled
    } else {
        OrderStatus::Pending
    };
    Ok(OrderCancellation {
        id: raw.id,
        order_id: raw.order_id,
        status,
        refund,
    })
}

pub(crate) fn seat_map(raw: client::SeatMap) -> SeatMap {
    let cabin_class = raw.cabins.first().and_then(|c| cabin_class(&c.cabin_class));
    SeatMap {
        id: raw.id,
        segment_id: raw.segment_id,
        cabin_class,
    }
}

fn cabin_class(s: &str) -> Option<CabinClass> {
    match s {
        "economy" => Some(CabinClass::Economy),
        "premium_economy" => Some(CabinClass::PremiumEconomy),
        "business" => Some(CabinClass::Business),
        "first" => Some(CabinClass::First),
        _ => None,
    }
}
