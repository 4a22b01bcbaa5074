//! Core abstractions of the ponte provider layer.
//!
//! This crate defines what every vendor connector has in common: the
//! [`PonteError`] taxonomy, the [`TravelProvider`] and [`FinanceProvider`]
//! capability traits, and the two primitives connectors lean on for vendor
//! I/O discipline, [`with_retry`] and [`paginate`].
#![warn(missing_docs)]

mod connector;
mod error;
mod paginate;
mod retry;

pub use connector::{Connector, FinanceProvider, TravelProvider};
pub use error::PonteError;
pub use paginate::{Page, PageConfig, paginate, paginate_cursor};
pub use retry::{RetryPolicy, with_retry};
