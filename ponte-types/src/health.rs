//! Aggregate health reporting across all vendors.

use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Health of a single vendor as seen by its cheapest probe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Whether the probe call succeeded.
    pub healthy: bool,
}

/// One entry per supported vendor, always all five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Duffel probe result.
    pub duffel: ProviderHealth,
    /// Amadeus probe result.
    pub amadeus: ProviderHealth,
    /// Teller probe result.
    pub teller: ProviderHealth,
    /// Plaid probe result.
    pub plaid: ProviderHealth,
    /// GoCardless probe result.
    pub gocardless: ProviderHealth,
}

impl HealthReport {
    /// Probe result for one vendor.
    #[must_use]
    pub fn get(&self, kind: ProviderKind) -> ProviderHealth {
        match kind {
            ProviderKind::Duffel => self.duffel,
            ProviderKind::Amadeus => self.amadeus,
            ProviderKind::Teller => self.teller,
            ProviderKind::Plaid => self.plaid,
            ProviderKind::Gocardless => self.gocardless,
        }
    }

    /// True when every vendor probe succeeded.
    #[must_use]
    pub fn all_healthy(&self) -> bool {
        ProviderKind::ALL.iter().all(|k| self.get(*k).healthy)
    }
}
