//! Canonical travel entities and request shapes.
//!
//! Field sets are the intersection the travel vendors can all populate;
//! vendor-specific extras stay inside the connector crates' wire types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its ISO 4217 currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Decimal amount, exact as quoted by the vendor.
    pub amount: Decimal,
    /// ISO 4217 currency code, e.g. `"EUR"`.
    pub currency: String,
}

/// Cabin class for a flight search or seat map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    /// Economy cabin.
    Economy,
    /// Premium economy cabin.
    PremiumEconomy,
    /// Business cabin.
    Business,
    /// First class cabin.
    First,
}

/// Passenger age category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassengerType {
    /// 12 years or older.
    Adult,
    /// 2 to 11 years.
    Child,
    /// Under 2, travelling on an adult's lap.
    InfantWithoutSeat,
}

/// Passenger counts for a flight search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passengers {
    /// Number of adults. Must be at least one.
    pub adults: u32,
    /// Number of children.
    #[serde(default)]
    pub children: u32,
    /// Number of lap infants.
    #[serde(default)]
    pub infants: u32,
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

/// Parameters for a flight availability search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFlightsRequest {
    /// Origin IATA code, e.g. `"LHR"`.
    pub origin: String,
    /// Destination IATA code.
    pub destination: String,
    /// Outbound date.
    pub departure_date: NaiveDate,
    /// Inbound date for a round trip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    /// Who is travelling.
    #[serde(default)]
    pub passengers: Passengers,
    /// Requested cabin, if the caller cares.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<CabinClass>,
}

/// A bookable flight offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Vendor offer identifier, usable in pricing and order creation.
    pub id: String,
    /// Origin IATA code of the first slice.
    pub origin: String,
    /// Destination IATA code of the first slice.
    pub destination: String,
    /// Total price across all passengers.
    pub price: Price,
}

/// Fetch a single offer by identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOffersRequest {
    /// The offer to fetch.
    pub offer_id: String,
}

/// Confirm up-to-date pricing for an offer before booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetPricingRequest {
    /// The offer to price.
    pub offer_id: String,
}

/// Fare conditions attached to a priced offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PricingConditions {
    /// Whether the fare may be changed before departure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_before_departure: Option<bool>,
    /// Whether the fare may be refunded before departure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_before_departure: Option<bool>,
}

/// A confirmed price quote for an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Current total price.
    pub price: Price,
    /// Fare conditions, where the vendor states them.
    #[serde(default)]
    pub conditions: PricingConditions,
}

/// Identity document supplied for a passenger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelDocument {
    /// Document number.
    pub number: String,
    /// ISO 3166-1 alpha-2 issuing country.
    pub issuing_country: String,
    /// Expiry date.
    pub expires_on: NaiveDate,
}

/// One passenger on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerDetails {
    /// Given name as on the travel document.
    pub given_name: String,
    /// Family name as on the travel document.
    pub family_name: String,
    /// Date of birth.
    pub born_on: NaiveDate,
    /// Age category.
    pub passenger_type: PassengerType,
    /// Travel document, when the route requires one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<TravelDocument>,
}

/// Postal address for booking contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// First address line.
    pub line1: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// Contact details for an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Booking contact email.
    pub email: String,
    /// Booking contact phone number in E.164 form.
    pub phone_number: String,
    /// Billing or contact address, when required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Book an offer into an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// The offer to book.
    pub offer_id: String,
    /// One entry per passenger counted in the search.
    pub passengers: Vec<PassengerDetails>,
    /// Booking contact.
    pub contact: ContactInfo,
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Ticketed and live.
    Confirmed,
    /// Accepted but not yet ticketed.
    Pending,
    /// Cancelled.
    Cancelled,
}

/// A booked order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Vendor order identifier.
    pub id: String,
    /// Airline booking reference (PNR), once assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Total charged price.
    pub price: Price,
}

/// Fetch an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveOrderRequest {
    /// The order to fetch.
    pub order_id: String,
}

/// Cancel an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderRequest {
    /// The order to cancel.
    pub order_id: String,
}

/// Outcome of an order cancellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCancellation {
    /// Vendor cancellation identifier.
    pub id: String,
    /// The order that was cancelled.
    pub order_id: String,
    /// Order state after cancellation. `Pending` when the vendor has
    /// accepted but not yet confirmed the cancellation.
    pub status: OrderStatus,
    /// Refund due, when the fare allows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<Price>,
}

/// One requested change to a flight slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderModification {
    /// Vendor slice identifier within the order.
    pub slice_id: String,
    /// New departure date for the slice.
    pub departure_date: NaiveDate,
    /// New cabin, when also changing class.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<CabinClass>,
}

/// Change flights on an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyOrderRequest {
    /// The order to change.
    pub order_id: String,
    /// The slice changes to request.
    pub modifications: Vec<OrderModification>,
}

/// Category of a purchasable ancillary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AncillaryKind {
    /// Checked baggage.
    Bag,
    /// Seat selection.
    Seat,
    /// Cancel-for-any-reason cover.
    CancelForAnyReason,
}

/// One ancillary service to attach to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncillaryService {
    /// Vendor service identifier from the offer.
    pub id: String,
    /// What is being purchased.
    pub kind: AncillaryKind,
    /// How many units.
    pub quantity: u32,
}

/// Attach ancillary services to an existing order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddAncillariesRequest {
    /// The order to amend.
    pub order_id: String,
    /// Services to add.
    pub services: Vec<AncillaryService>,
}

/// Fetch seat maps for an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetSeatMapsRequest {
    /// The offer whose cabins to map.
    pub offer_id: String,
}

/// Seat layout for one flight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatMap {
    /// Vendor seat map identifier.
    pub id: String,
    /// The segment this map covers.
    pub segment_id: String,
    /// Cabin the map describes, when the vendor says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cabin_class: Option<CabinClass>,
}
