//! ponte-teller
//!
//! Connector that implements `FinanceProvider` on top of the Teller API.
//! Teller holds no bundle-level secret: every data call authenticates with
//! the per-enrollment access token, and production traffic rides on a
//! caller-injected mTLS `reqwest::Client`.
#![warn(missing_docs)]

mod client;
mod error;
mod transform;

use async_trait::async_trait;
use ponte_core::{
    Connector, FinanceProvider, Page, PageConfig, PonteError, RetryPolicy, paginate_cursor,
    with_retry,
};
use ponte_types::{
    Account, Balance, ConnectionState, ConnectionStatus, Credentials, DeleteAccountsRequest,
    DeleteConnectionRequest, GetAccountBalanceRequest, GetAccountsRequest,
    GetConnectionStatusRequest, GetInstitutionsRequest, GetTransactionsRequest, Institution,
    ProviderKind, Transaction,
};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.teller.io";

/// Teller-backed finance connector.
pub struct TellerConnector {
    client: client::TellerClient,
    retry: RetryPolicy,
    pages: PageConfig,
}

impl TellerConnector {
    /// Build with a fresh HTTP client. Fine for sandbox tokens; production
    /// enrollments need [`TellerConnector::with_http_client`] and an mTLS
    /// certificate.
    ///
    /// # Errors
    /// Currently infallible; kept fallible for parity with the other
    /// connectors' constructors.
    pub fn new(credentials: &Credentials) -> Result<Self, PonteError> {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Build on a caller-supplied `reqwest::Client`, typically one loaded
    /// with the Teller client certificate.
    ///
    /// # Errors
    /// Currently infallible; kept fallible for parity with the other
    /// connectors' constructors.
    pub fn with_http_client(
        _credentials: &Credentials,
        http: reqwest::Client,
    ) -> Result<Self, PonteError> {
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| PonteError::invalid_arg(format!("bad base url: {e}")))?;
        Ok(Self {
            client: client::TellerClient::new(http, base_url),
            retry: RetryPolicy::default(),
            pages: PageConfig::default(),
        })
    }

    /// Point the connector at a different API origin (sandboxes, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.client.set_base_url(base_url);
        self
    }
}

fn token(access_token: &Option<String>) -> Result<&str, PonteError> {
    access_token
        .as_deref()
        .ok_or_else(|| PonteError::invalid_arg("teller operations require an access token"))
}

impl Connector for TellerConnector {
    fn name(&self) -> &'static str {
        "teller"
    }
    fn kind(&self) -> ProviderKind {
        ProviderKind::Teller
    }
}

#[async_trait]
impl FinanceProvider for TellerConnector {
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, PonteError> {
        let token = token(&req.access_token)?;
        let count = self.pages.page_size;
        if req.latest {
            let raw = with_retry(&self.retry, || {
                self.client
                    .list_transactions(token, &req.account_id, count, None)
            })
            .await?;
            return raw.into_iter().map(transform::transaction).collect();
        }
        let raw = paginate_cursor(&self.pages, || {}, |cursor: Option<String>| async move {
            let items = with_retry(&self.retry, || {
                self.client
                    .list_transactions(token, &req.account_id, count, cursor.as_deref())
            })
            .await?;
            // A full page means more may follow; the last id is the cursor.
            let next_cursor = if items.len() as u32 == count {
                items.last().map(|t| t.id.clone())
            } else {
                None
            };
            Ok(Page { items, next_cursor })
        })
        .await?;
        raw.into_iter().map(transform::transaction).collect()
    }

    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, PonteError> {
        let token = token(&req.access_token)?;
        let raw = with_retry(&self.retry, || self.client.list_accounts(token)).await?;
        // The account listing carries no balances; one follow-up per account.
        let mut accounts = Vec::with_capacity(raw.len());
        for account in raw {
            let balances =
                with_retry(&self.retry, || self.client.get_balances(token, &account.id)).await?;
            accounts.push(transform::account(account, &balances)?);
        }
        Ok(accounts)
    }

    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Balance, PonteError> {
        let token = token(&req.access_token)?;
        let balances = with_retry(&self.retry, || {
            self.client.get_balances(token, &req.account_id)
        })
        .await?;
        transform::balance(&balances, "USD")
    }

    async fn get_institutions(
        &self,
        _req: &GetInstitutionsRequest,
    ) -> Result<Vec<Institution>, PonteError> {
        let raw = with_retry(&self.retry, || self.client.list_institutions()).await?;
        Ok(raw.into_iter().map(transform::institution).collect())
    }

    async fn delete_accounts(&self, req: &DeleteAccountsRequest) -> Result<(), PonteError> {
        let token = token(&req.access_token)?;
        match req.account_id.as_deref() {
            Some(account_id) => self.client.delete_account(token, account_id).await,
            None => {
                for account in self.client.list_accounts(token).await? {
                    self.client.delete_account(token, &account.id).await?;
                }
                Ok(())
            }
        }
    }

    async fn get_connection_status(
        &self,
        req: &GetConnectionStatusRequest,
    ) -> Result<ConnectionStatus, PonteError> {
        let token = token(&req.access_token)?;
        let status = match self.client.list_accounts(token).await {
            Ok(_) => ConnectionState::Connected,
            Err(PonteError::Provider { code, .. }) if code.starts_with("enrollment.") => {
                ConnectionState::Disconnected
            }
            Err(PonteError::Status {
                status: 401 | 403, ..
            }) => ConnectionState::Disconnected,
            Err(err) => return Err(err),
        };
        Ok(ConnectionStatus { status })
    }

    async fn delete_connection(&self, req: &DeleteConnectionRequest) -> Result<(), PonteError> {
        // Teller has no connection-level delete; detaching every account
        // severs the enrollment.
        let token = token(&req.access_token)?;
        for account in self.client.list_accounts(token).await? {
            self.client.delete_account(token, &account.id).await?;
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self.client.probe().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(provider = "teller", error = %err, "health probe failed");
                false
            }
        }
    }
}
