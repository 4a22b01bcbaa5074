//! Private wire client for the GoCardless Bank Account Data API.
//!
//! The secret id/key pair is exchanged for a bearer token on first use and
//! cached until shortly before expiry.

use std::time::{Duration, Instant};

use ponte_core::PonteError;
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use url::Url;

use crate::error;

const TOKEN_LEEWAY: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
    access_expires: u64,
}

struct CachedToken {
    bearer: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Institution {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Requisition {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub institution_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountDetails {
    #[serde(default, rename = "resourceId")]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub currency: String,
    #[serde(default, rename = "cashAccountType")]
    pub cash_account_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountDetailsEnvelope {
    pub account: AccountDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceAmount {
    pub amount: String,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalanceEntry {
    #[serde(rename = "balanceAmount")]
    pub balance_amount: BalanceAmount,
    #[serde(rename = "balanceType")]
    pub balance_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BalancesEnvelope {
    pub balances: Vec<BalanceEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Transaction {
    #[serde(default, rename = "transactionId")]
    pub transaction_id: Option<String>,
    #[serde(default, rename = "internalTransactionId")]
    pub internal_transaction_id: Option<String>,
    #[serde(rename = "transactionAmount")]
    pub transaction_amount: BalanceAmount,
    #[serde(default, rename = "bookingDate")]
    pub booking_date: Option<String>,
    #[serde(default, rename = "valueDate")]
    pub value_date: Option<String>,
    #[serde(default, rename = "remittanceInformationUnstructured")]
    pub remittance_information: Option<String>,
    #[serde(default, rename = "creditorName")]
    pub creditor_name: Option<String>,
    #[serde(default, rename = "debtorName")]
    pub debtor_name: Option<String>,
    #[serde(default, rename = "proprietaryBankTransactionCode")]
    pub bank_transaction_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionLists {
    #[serde(default)]
    pub booked: Vec<Transaction>,
    #[serde(default)]
    pub pending: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TransactionsEnvelope {
    pub transactions: TransactionLists,
}

pub(crate) struct GocardlessClient {
    http: reqwest::Client,
    base_url: Url,
    secret_id: String,
    secret_key: String,
    token: Mutex<Option<CachedToken>>,
}

impl GocardlessClient {
    pub(crate) fn new(
        secret_id: String,
        secret_key: String,
        http: reqwest::Client,
        base_url: Url,
    ) -> Self {
        Self {
            http,
            base_url,
            secret_id,
            secret_key,
            token: Mutex::new(None),
        }
    }

    pub(crate) fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    fn url(&self, path: &str) -> Result<Url, PonteError> {
        self.base_url
            .join(path)
            .map_err(|e| PonteError::invalid_arg(format!("bad url path {path:?}: {e}")))
    }

    async fn bearer(&self) -> Result<String, PonteError> {
        let mut cache = self.token.lock().await;
        if let Some(token) = cache.as_ref()
            && token.expires_at > Instant::now()
        {
            return Ok(token.bearer.clone());
        }
        let resp = self
            .http
            .post(self.url("/api/v2/token/new/")?)
            .json(&json!({"secret_id": self.secret_id, "secret_key": self.secret_key}))
            .send()
            .await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(match error::normalize(status, &text) {
                Some((code, message)) => PonteError::provider(code, message),
                None => PonteError::status(status, text),
            });
        }
        let token: TokenResponse = serde_json::from_str(&text)?;
        let ttl = Duration::from_secs(token.access_expires).saturating_sub(TOKEN_LEEWAY);
        let bearer = token.access.clone();
        *cache = Some(CachedToken {
            bearer: token.access,
            expires_at: Instant::now() + ttl,
        });
        Ok(bearer)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PonteError> {
        let bearer = self.bearer().await?;
        let mut req = self
            .http
            .request(method, self.url(path)?)
            .bearer_auth(bearer)
            .header(reqwest::header::ACCEPT, "application/json");
        if !query.is_empty() {
            req = req.query(query);
        }
        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(match error::normalize(status, &text) {
                Some((code, message)) => PonteError::provider(code, message),
                None => PonteError::status(status, text),
            });
        }
        if text.is_empty() {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn list_institutions(
        &self,
        country: &str,
    ) -> Result<Vec<Institution>, PonteError> {
        self.send(
            Method::GET,
            "/api/v2/institutions/",
            &[("country", country.to_string())],
        )
        .await
    }

    pub(crate) async fn get_institution(&self, id: &str) -> Result<Institution, PonteError> {
        self.send(Method::GET, &format!("/api/v2/institutions/{id}/"), &[])
            .await
    }

    pub(crate) async fn get_requisition(&self, id: &str) -> Result<Requisition, PonteError> {
        self.send(Method::GET, &format!("/api/v2/requisitions/{id}/"), &[])
            .await
    }

    pub(crate) async fn delete_requisition(&self, id: &str) -> Result<(), PonteError> {
        let _: Option<Value> = self
            .send(Method::DELETE, &format!("/api/v2/requisitions/{id}/"), &[])
            .await?;
        Ok(())
    }

    pub(crate) async fn account_details(
        &self,
        account_id: &str,
    ) -> Result<AccountDetails, PonteError> {
        let env: AccountDetailsEnvelope = self
            .send(
                Method::GET,
                &format!("/api/v2/accounts/{account_id}/details/"),
                &[],
            )
            .await?;
        Ok(env.account)
    }

    pub(crate) async fn account_balances(
        &self,
        account_id: &str,
    ) -> Result<Vec<BalanceEntry>, PonteError> {
        let env: BalancesEnvelope = self
            .send(
                Method::GET,
                &format!("/api/v2/accounts/{account_id}/balances/"),
                &[],
            )
            .await?;
        Ok(env.balances)
    }

    pub(crate) async fn account_transactions(
        &self,
        account_id: &str,
    ) -> Result<TransactionLists, PonteError> {
        let env: TransactionsEnvelope = self
            .send(
                Method::GET,
                &format!("/api/v2/accounts/{account_id}/transactions/"),
                &[],
            )
            .await?;
        Ok(env.transactions)
    }

    /// Cheapest authenticated call: the GB institution catalog.
    pub(crate) async fn probe(&self) -> Result<(), PonteError> {
        let _ = self.list_institutions("gb").await?;
        Ok(())
    }
}
