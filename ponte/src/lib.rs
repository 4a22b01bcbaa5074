//! ponte
//!
//! One facade over five data vendors: Duffel and Amadeus for flight search
//! and booking, Teller, Plaid and GoCardless for bank account data.
//!
//! A [`Ponte`] is built from [`ProviderParams`] and resolves its vendor tag
//! exactly once; every call then forwards to that connector. Operations the
//! active adapter cannot serve answer with neutral defaults (empty lists,
//! `None`, success for deletes) so callers never branch on which vendor is
//! behind the facade. [`health_check`] builds all five connectors from one
//! credentials bundle and probes them concurrently.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use ponte::{Ponte, ProviderParams};
//! use ponte::types::{Credentials, Passengers, ProviderKind, SearchFlightsRequest, keys};
//!
//! # async fn run() -> Result<(), ponte::PonteError> {
//! let params = ProviderParams::new()
//!     .with_provider(ProviderKind::Duffel)
//!     .with_credentials(Credentials::new().with(keys::DUFFEL_ACCESS_TOKEN, "token"));
//! let ponte = Ponte::new(&params)?;
//! let offers = ponte
//!     .search_flights(&SearchFlightsRequest {
//!         origin: "LHR".into(),
//!         destination: "JFK".into(),
//!         departure_date: NaiveDate::from_ymd_opt(2026, 9, 18).unwrap(),
//!         return_date: None,
//!         passengers: Passengers::default(),
//!         cabin_class: None,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

mod facade;
mod health;
mod params;

pub use facade::Ponte;
pub use health::health_check;
pub use params::ProviderParams;
pub use ponte_core::{Connector, FinanceProvider, PonteError, TravelProvider};
/// Canonical request and response types shared by every connector.
pub use ponte_types as types;
