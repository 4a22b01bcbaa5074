//! Aggregate health probing across every supported vendor.

use ponte_core::{FinanceProvider, PonteError, TravelProvider};
use ponte_types::{HealthReport, ProviderHealth};

use crate::params::ProviderParams;

/// Probes all five vendors concurrently and reports per-vendor results.
///
/// One unhealthy vendor never fails the call; its entry simply reads
/// `healthy: false`. The credentials bundle must carry every vendor's keys,
/// since each connector is built before probing.
///
/// # Errors
/// Returns `InvalidArg` when any connector cannot be built from the bundle.
pub async fn health_check(params: &ProviderParams) -> Result<HealthReport, PonteError> {
    let http = params.transport.clone().unwrap_or_default();
    let creds = &params.credentials;

    let duffel = ponte_duffel::DuffelConnector::with_http_client(creds, http.clone())
        .map_err(|e| PonteError::invalid_arg(format!("duffel connector: {e}")))?;
    let amadeus = ponte_amadeus::AmadeusConnector::with_http_client(creds, http.clone())
        .map_err(|e| PonteError::invalid_arg(format!("amadeus connector: {e}")))?;
    let teller = ponte_teller::TellerConnector::with_http_client(creds, http.clone())
        .map_err(|e| PonteError::invalid_arg(format!("teller connector: {e}")))?;
    let plaid = ponte_plaid::PlaidConnector::with_http_client(creds, http.clone())
        .map_err(|e| PonteError::invalid_arg(format!("plaid connector: {e}")))?;
    let gocardless = ponte_gocardless::GocardlessConnector::with_http_client(creds, http)
        .map_err(|e| PonteError::invalid_arg(format!("gocardless connector: {e}")))?;

    let report = aggregate_health(&duffel, &amadeus, &teller, &plaid, &gocardless).await;
    tracing::info!(
        duffel = report.duffel.healthy,
        amadeus = report.amadeus.healthy,
        teller = report.teller.healthy,
        plaid = report.plaid.healthy,
        gocardless = report.gocardless.healthy,
        "health probes complete"
    );
    Ok(report)
}

pub(crate) async fn aggregate_health(
    duffel: &dyn TravelProvider,
    amadeus: &dyn TravelProvider,
    teller: &dyn FinanceProvider,
    plaid: &dyn FinanceProvider,
    gocardless: &dyn FinanceProvider,
) -> HealthReport {
    let (duffel, amadeus, teller, plaid, gocardless) = futures::join!(
        duffel.health_check(),
        amadeus.health_check(),
        teller.health_check(),
        plaid.health_check(),
        gocardless.health_check(),
    );
    HealthReport {
        duffel: ProviderHealth { healthy: duffel },
        amadeus: ProviderHealth { healthy: amadeus },
        teller: ProviderHealth { healthy: teller },
        plaid: ProviderHealth { healthy: plaid },
        gocardless: ProviderHealth { healthy: gocardless },
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use ponte_core::Connector;
    use ponte_types::{
        Account, AddAncillariesRequest, Balance, CancelOrderRequest, ConnectionStatus,
        CreateOrderRequest, DeleteAccountsRequest, DeleteConnectionRequest,
        GetAccountBalanceRequest, GetAccountsRequest, GetConnectionStatusRequest,
        GetInstitutionsRequest, GetOffersRequest, GetPricingRequest, GetSeatMapsRequest,
        GetTransactionsRequest, Institution, ModifyOrderRequest, Offer, Order, OrderCancellation,
        Pricing, ProviderKind, RetrieveOrderRequest, SearchFlightsRequest, SeatMap, Transaction,
    };

    use super::*;

    struct Probe {
        kind: ProviderKind,
        healthy: bool,
    }

    impl Connector for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }
        fn kind(&self) -> ProviderKind {
            self.kind
        }
    }

    #[async_trait]
    impl TravelProvider for Probe {
        async fn search_flights(
            &self,
            _req: &SearchFlightsRequest,
        ) -> Result<Vec<Offer>, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_offers(&self, _req: &GetOffersRequest) -> Result<Offer, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_pricing(&self, _req: &GetPricingRequest) -> Result<Pricing, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn create_order(&self, _req: &CreateOrderRequest) -> Result<Order, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn retrieve_order(&self, _req: &RetrieveOrderRequest) -> Result<Order, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn cancel_order(
            &self,
            _req: &CancelOrderRequest,
        ) -> Result<OrderCancellation, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn modify_order(&self, _req: &ModifyOrderRequest) -> Result<Order, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn add_ancillaries(
            &self,
            _req: &AddAncillariesRequest,
        ) -> Result<Order, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_seat_maps(
            &self,
            _req: &GetSeatMapsRequest,
        ) -> Result<Vec<SeatMap>, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn health_check(&self) -> bool {
            self.healthy
        }
    }

    #[async_trait]
    impl FinanceProvider for Probe {
        async fn get_transactions(
            &self,
            _req: &GetTransactionsRequest,
        ) -> Result<Vec<Transaction>, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_accounts(
            &self,
            _req: &GetAccountsRequest,
        ) -> Result<Vec<Account>, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_account_balance(
            &self,
            _req: &GetAccountBalanceRequest,
        ) -> Result<Balance, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_institutions(
            &self,
            _req: &GetInstitutionsRequest,
        ) -> Result<Vec<Institution>, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn delete_accounts(&self, _req: &DeleteAccountsRequest) -> Result<(), PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn get_connection_status(
            &self,
            _req: &GetConnectionStatusRequest,
        ) -> Result<ConnectionStatus, PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn delete_connection(
            &self,
            _req: &DeleteConnectionRequest,
        ) -> Result<(), PonteError> {
            Err(PonteError::unsupported("probe"))
        }
        async fn health_check(&self) -> bool {
            self.healthy
        }
    }

    fn probe(kind: ProviderKind, healthy: bool) -> Probe {
        Probe { kind, healthy }
    }

    #[tokio::test]
    async fn one_failing_probe_never_hides_the_others() {
        let report = aggregate_health(
            &probe(ProviderKind::Duffel, true),
            &probe(ProviderKind::Amadeus, false),
            &probe(ProviderKind::Teller, true),
            &probe(ProviderKind::Plaid, true),
            &probe(ProviderKind::Gocardless, true),
        )
        .await;

        assert!(report.duffel.healthy);
        assert!(!report.amadeus.healthy);
        assert!(report.teller.healthy);
        assert!(report.plaid.healthy);
        assert!(report.gocardless.healthy);
        assert!(!report.all_healthy());
    }

    #[tokio::test]
    async fn all_green_probes_read_as_healthy() {
        let report = aggregate_health(
            &probe(ProviderKind::Duffel, true),
            &probe(ProviderKind::Amadeus, true),
            &probe(ProviderKind::Teller, true),
            &probe(ProviderKind::Plaid, true),
            &probe(ProviderKind::Gocardless, true),
        )
        .await;
        assert!(report.all_healthy());
    }
}
