//! ponte-plaid
//!
//! Connector that implements `FinanceProvider` on top of the Plaid API.
//! Institutions page through offset/count; transactions ride the
//! `/transactions/sync` cursor stream.
#![warn(missing_docs)]

mod client;
mod error;
mod transform;

use async_trait::async_trait;
use ponte_core::{
    Connector, FinanceProvider, Page, PageConfig, PonteError, RetryPolicy, paginate,
    paginate_cursor, with_retry,
};
use ponte_types::{
    Account, Balance, ConnectionState, ConnectionStatus, Credentials, DeleteAccountsRequest,
    DeleteConnectionRequest, GetAccountBalanceRequest, GetAccountsRequest,
    GetConnectionStatusRequest, GetInstitutionsRequest, GetTransactionsRequest, Institution,
    ProviderKind, Transaction, keys,
};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://production.plaid.com";
const DEFAULT_COUNTRIES: &[&str] = &["US", "CA"];

/// Plaid-backed finance connector.
pub struct PlaidConnector {
    client: client::PlaidClient,
    retry: RetryPolicy,
    pages: PageConfig,
}

impl PlaidConnector {
    /// Build with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the client id or secret is missing.
    pub fn new(credentials: &Credentials) -> Result<Self, PonteError> {
        Self::with_http_client(credentials, reqwest::Client::new())
    }

    /// Build on a caller-supplied `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the client id or secret is missing.
    pub fn with_http_client(
        credentials: &Credentials,
        http: reqwest::Client,
    ) -> Result<Self, PonteError> {
        let client_id = credentials.require(keys::PLAID_CLIENT_ID)?.to_string();
        let secret = credentials.require(keys::PLAID_SECRET)?.to_string();
        let base_url = Url::parse(DEFAULT_BASE_URL)
            .map_err(|e| PonteError::invalid_arg(format!("bad base url: {e}")))?;
        Ok(Self {
            client: client::PlaidClient::new(client_id, secret, http, base_url),
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
        .ok_or_else(|| PonteError::invalid_arg("plaid operations require an access token"))
}

impl Connector for PlaidConnector {
    fn name(&self) -> &'static str {
        "plaid"
    }
    fn kind(&self) -> ProviderKind {
        ProviderKind::Plaid
    }
}

#[async_trait]
impl FinanceProvider for PlaidConnector {
    async fn get_transactions(
        &self,
        req: &GetTransactionsRequest,
    ) -> Result<Vec<Transaction>, PonteError> {
        let token = token(&req.access_token)?;
        let count = self.pages.page_size;
        if req.latest {
            let resp = with_retry(&self.retry, || {
                self.client.transactions_sync(token, None, count)
            })
            .await?;
            return resp
                .added
                .into_iter()
                .map(transform::transaction)
                .collect();
        }
        let raw = paginate_cursor(&self.pages, || {}, |cursor: Option<String>| async move {
            let resp = with_retry(&self.retry, || {
                self.client.transactions_sync(token, cursor.as_deref(), count)
            })
            .await?;
            Ok(Page {
                items: resp.added,
                next_cursor: resp.has_more.then_some(resp.next_cursor),
            })
        })
        .await?;
        raw.into_iter().map(transform::transaction).collect()
    }

    async fn get_accounts(&self, req: &GetAccountsRequest) -> Result<Vec<Account>, PonteError> {
        let token = token(&req.access_token)?;
        let resp = with_retry(&self.retry, || self.client.accounts_get(token)).await?;
        let institution_id = resp
            .item
            .institution_id
            .clone()
            .or_else(|| req.institution_id.clone());
        let institution = match institution_id.as_deref() {
            Some(id) => transform::institution(
                with_retry(&self.retry, || {
                    self.client.institution_get_by_id(id, DEFAULT_COUNTRIES)
                })
                .await?,
            ),
            None => transform::unknown_institution(),
        };
        resp.accounts
            .into_iter()
            .map(|a| transform::account(a, &resp.item, institution.clone()))
            .collect()
    }

    async fn get_account_balance(
        &self,
        req: &GetAccountBalanceRequest,
    ) -> Result<Balance, PonteError> {
        let token = token(&req.access_token)?;
        let resp = with_retry(&self.retry, || self.client.balance_get(token)).await?;
        let account = resp
            .accounts
            .iter()
            .find(|a| a.account_id == req.account_id)
            .ok_or_else(|| {
                PonteError::data(format!(
                    "account {} not in balance response",
                    req.account_id
                ))
            })?;
        transform::balance(account)
    }

    async fn get_institutions(
        &self,
        req: &GetInstitutionsRequest,
    ) -> Result<Vec<Institution>, PonteError> {
        let countries: Vec<&str> = match req.country_code.as_deref() {
            Some(code) => vec![code],
            None => DEFAULT_COUNTRIES.to_vec(),
        };
        let countries = &countries[..];
        let raw = paginate(
            &self.pages,
            || {},
            |offset, limit| {
                with_retry(&self.retry, move || {
                    self.client.institutions_get(offset, limit, countries)
                })
            },
        )
        .await?;
        Ok(raw.into_iter().map(transform::institution).collect())
    }

    async fn delete_accounts(&self, req: &DeleteAccountsRequest) -> Result<(), PonteError> {
        // Plaid detaches at item granularity only.
        let token = token(&req.access_token)?;
        self.client.item_remove(token).await
    }

    async fn get_connection_status(
        &self,
        req: &GetConnectionStatusRequest,
    ) -> Result<ConnectionStatus, PonteError> {
        let token = token(&req.access_token)?;
        let status = match self.client.item_get(token).await {
            Ok(resp) => match resp.item.error {
                None => ConnectionState::Connected,
                Some(item_error) => {
                    tracing::warn!(
                        provider = "plaid",
                        code = %item_error.error_code,
                        "item is in an error state"
                    );
                    ConnectionState::Disconnected
                }
            },
            Err(PonteError::Provider { code, .. }) if code.starts_with("ITEM_") => {
                ConnectionState::Disconnected
            }
            Err(err) => return Err(err),
        };
        Ok(ConnectionStatus { status })
    }

    async fn delete_connection(&self, req: &DeleteConnectionRequest) -> Result<(), PonteError> {
        let token = token(&req.access_token)?;
        self.client.item_remove(token).await
    }

    async fn health_check(&self) -> bool {
        match self.client.probe().await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(provider = "plaid", error = %err, "health probe failed");
                false
            }
        }
    }
}
