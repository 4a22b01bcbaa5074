//! ponte-gocardless
//!
//! Connector that implements `FinanceProvider` on top of the GoCardless
//! Bank Account Data API. Connections are requisitions: accounts hang off a
//! requisition id, and severing the requisition severs the connection.
#![warn(missing_docs)]

mod client;
mod error;
mod transform;

use async_trait::async_trait;
use ponte_core::{Connector, FinanceProvider, PonteError, RetryPolicy, with_retry};
use ponte_types::{
    Account, Balance, ConnectionState, ConnectionStatus, Credentials, DeleteAccountsRequest,
    DeleteConnectionRequest, GetAccountBalanceRequest, GetAccountsRequest,
    GetConnectionStatusRequest, GetInstitutionsRequest, GetTransactionsRequest, Institution,
    ProviderKind, Transaction, TransactionStatus, keys,
};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://bankaccountdata.gocardless.com";

/// GoCardless-backed finance connector.
pub struct GocardlessConnector {
    client: client::GocardlessClient,
    retry: RetryPolicy,
}

impl GocardlessConnector {
    /// Build with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the secret id or key is missing.
    pub fn new(credentials: &Credentials) -> Result<Self, PonteError> {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Build on a caller-supplied `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the secret id or key is missing.
    pub fn with_http_client(
        credentials: &Credentials,
        http: reqwest::Client,
    ) -> Result<Self, PonteError> {
        let secret_id = credentials.require(keys::GOCARDLESS_SECRET_ID)?.to_string();
        let secret_key = credentials.require(keys::GOCARDLESS_SECRET_KEY)?.to_string();
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| PonteError::invalid_arg(format!("bad base url: {e}")))?;
        Ok(Self {
            client: client::GocardlessClient::new(secret_id, secret_key, http, base_url),
            retry: RetryPolicy::default(),
        })
    }

    /// Point the connector at a different API origin (sandboxes, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.client.set_base_url(base_url);
        self
    }
}

fn requisition_id(connection_id: &Option<String>) -> Result<&str, PonteError> {
    connection_id
        .as_deref()
        .ok_or_else(|| PonteError::invalid_arg("gocardless operations require a requisition id"))
}

impl Connector for GocardlessConnector {
    fn name(&self) -> &'static str {
        "gocardless"
    }
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gocardless
    }
}

#[async_trait]
impl FinanceProvider for GocardlessConnector {
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, PonteError> {
        // The vendor serves the full statement in one response; booked and
        // pending arrive in separate lists.
        let lists = with_retry(&self.retry, || {
            self.client.account_transactions(&req.account_id)
        })
        .await?;
        let mut txns = Vec::with_capacity(lists.booked.len() + lists.pending.len());
        for raw in lists.booked {
            txns.push(transform::transaction(raw, TransactionStatus::Posted)?);
        }
        for raw in lists.pending {
            txns.push(transform::transaction(raw, TransactionStatus::Pending)?);
        }
        Ok(txns)
    }

    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, PonteError> {
        let requisition_id = requisition_id(&req.connection_id)?;
        let requisition =
            with_retry(&self.retry, || self.client.get_requisition(requisition_id)).await?;
        let institution = match requisition.institution_id.as_deref() {
            Some(id) => transform::institution(
                with_retry(&self.retry, || self.client.get_institution(id)).await?,
            ),
            None => Institution {
                id: "unknown".to_string(),
                name: "Unknown".to_string(),
                logo: None,
                provider: ProviderKind::Gocardless,
            },
        };
        let mut accounts = Vec::with_capacity(requisition.accounts.len());
        for account_id in requisition.accounts {
            let details =
                with_retry(&self.retry, || self.client.account_details(&account_id)).await?;
            let entries =
                with_retry(&self.retry, || self.client.account_balances(&account_id)).await?;
            let balance = transform::balance(&entries)?;
            accounts.push(transform::account(
                account_id,
                &requisition.id,
                details,
                balance,
                institution.clone(),
            ));
        }
        Ok(accounts)
    }

    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Balance, PonteError> {
        let entries = with_retry(&self.retry, || {
            self.client.account_balances(&req.account_id)
        })
        .await?;
        transform::balance(&entries)
    }

    async fn get_institutions(
        &self,
        req: &GetInstitutionsRequest,
    ) -> Result<Vec<Institution>, PonteError> {
        let country = req.country_code.as_deref().unwrap_or("gb");
        let raw = with_retry(&self.retry, || self.client.list_institutions(country)).await?;
        Ok(raw.into_iter().map(transform::institution).collect())
    }

    async fn delete_accounts(&self, req: &DeleteAccountsRequest) -> Result<(), PonteError> {
        // Accounts detach at requisition granularity only.
        let requisition_id = requisition_id(&req.connection_id)?;
        self.client.delete_requisition(requisition_id).await
    }

    async fn get_connection_status(
        &self,
        req: &GetConnectionStatusRequest,
    ) -> Result<ConnectionStatus, PonteError> {
        let requisition_id = requisition_id(&req.connection_id)?;
        let requisition = self.client.get_requisition(requisition_id).await?;
        // "LN" means the requisition is linked; anything else (created,
        // expired, suspended, rejected) needs the user back in the flow.
        let status = if requisition.status == "LN" {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        };
        Ok(ConnectionStatus { status })
    }

    async fn delete_connection(&self, req: &DeleteConnectionRequest) -> Result<(), PonteError> {
        let requisition_id = requisition_id(&req.connection_id)?;
        self.client.delete_requisition(requisition_id).await
    }

    async fn health_check(&self) -> bool {
        match self.client.probe().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(provider = "gocardless", error = %err, "health probe failed");
                false
            }
        }
    }
}
