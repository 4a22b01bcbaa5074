//! Canonical data types shared across the ponte provider ecosystem.
//!
//! Everything in this crate is vendor-independent: connector crates produce
//! these types from their own private wire formats, and nothing here carries
//! a vendor enum value or identifier format that has not been re-expressed
//! in ponte's own vocabulary.
#![warn(missing_docs)]

mod credentials;
mod finance;
mod health;
mod provider;
mod travel;

pub use credentials::{Credentials, MissingCredential, keys};
pub use finance::{
    Account, AccountType, Balance, ConnectionState, ConnectionStatus, DeleteAccountsRequest,
    DeleteConnectionRequest, GetAccountBalanceRequest, GetAccountsRequest,
    GetConnectionStatusRequest, GetInstitutionsRequest, GetTransactionsRequest, Institution,
    ProviderRefs, Transaction, TransactionMethod, TransactionStatus,
};
pub use health::{HealthReport, ProviderHealth};
pub use provider::{ParseProviderKindError, ProviderFamily, ProviderKind};
pub use travel::{
    AddAncillariesRequest, Address, AncillaryKind, AncillaryService, CabinClass,
    CancelOrderRequest, ContactInfo, CreateOrderRequest, GetOffersRequest, GetPricingRequest,
    GetSeatMapsRequest, ModifyOrderRequest, Offer, Order, OrderCancellation, OrderModification,
    OrderStatus, PassengerDetails, PassengerType, Passengers, Price, Pricing, PricingConditions,
    RetrieveOrderRequest, SearchFlightsRequest, SeatMap, TravelDocument,
};
