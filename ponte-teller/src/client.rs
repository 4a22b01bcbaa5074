//! Private wire client for the Teller API.
//!
//! Teller authenticates with the per-enrollment access token as the basic
//! auth username. Production traffic additionally requires client mTLS,
//! which callers provide by injecting a certificate-loaded
//! `reqwest::Client`.

use ponte_core::PonteError;
use reqwest::Method;
use serde::Deserialize;
use url::Url;

use crate::error;

#[derive(Debug, Deserialize)]
pub(crate) struct InstitutionRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Account {
    pub id: String,
    pub name: String,
    pub currency: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub enrollment_id: String,
    pub institution: InstitutionRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Balances {
    pub ledger: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Counterparty {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransactionDetails {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub counterparty: Option<Counterparty>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Transaction {
    pub id: String,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub status: String,
    #[serde(rename = "type")]
    pub txn_type: String,
    #[serde(default)]
    pub running_balance: Option<String>,
    #[serde(default)]
    pub details: TransactionDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Institution {
    pub id: String,
    pub name: String,
}

pub(crate) struct TellerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TellerClient {
    pub(crate) fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub(crate) fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, PonteError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PonteError::invalid_arg(format!("bad url path {path:?}: {e}")))?;
        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = token {
            req = req.basic_auth(token, Some(""));
        }
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
            // DELETE answers 204 with an empty body.
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn list_accounts(&self, token: &str) -> Result<Vec<Account>, PonteError> {
        self.send(Method::GET, "/accounts", Some(token), &[]).await
    }

    pub(crate) async fn get_balances(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<Balances, PonteError> {
        self.send(
            Method::GET,
            &format!("/accounts/{account_id}/balances"),
            Some(token),
            &[],
        )
        .await
    }

    pub(crate) async fn list_transactions(
        &self,
        token: &str,
        account_id: &str,
        count: u32,
        from_id: Option<&str>,
    ) -> Result<Vec<Transaction>, PonteError> {
        let mut query = vec![("count", count.to_string())];
        if let Some(from_id) = from_id {
            query.push(("from_id", from_id.to_string()));
        }
        self.send(
            Method::GET,
            &format!("/accounts/{account_id}/transactions"),
            Some(token),
            &query,
        )
        .await
    }

    pub(crate) async fn list_institutions(&self) -> Result<Vec<Institution>, PonteError> {
        self.send(Method::GET, "/institutions", None, &[]).await
    }

    pub(crate) async fn delete_account(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<(), PonteError> {
        let _: Option<serde_json::Value> = self
            .send(
                Method::DELETE,
                &format!("/accounts/{account_id}"),
                Some(token),
                &[],
            )
            .await?;
        Ok(())
    }

    /// Unauthenticated service health endpoint.
    pub(crate) async fn probe(&self) -> Result<(), PonteError> {
        let _: Option<serde_json::Value> = self.send(Method::GET, "/health", None, &[]).await?;
        Ok(())
    }
}
