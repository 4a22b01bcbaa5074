//! Private wire client for the Plaid API.
//!
//! Every Plaid endpoint is a POST; the client id and secret travel in the
//! request body rather than in headers.

use ponte_core::PonteError;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use crate::error;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Balances {
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Account {
    pub account_id: String,
    pub name: String,
    #[serde(default)]
    pub balances: Balances,
    #[serde(rename = "type")]
    pub account_type: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemError {
    pub error_code: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Item {
    pub item_id: String,
    #[serde(default)]
    pub institution_id: Option<String>,
    #[serde(default)]
    pub error: Option<ItemError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountsResponse {
    pub accounts: Vec<Account>,
    pub item: Item,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Category {
    pub primary: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Transaction {
    pub transaction_id: String,
    pub amount: f64,
    #[serde(default)]
    pub iso_currency_code: Option<String>,
    pub date: String,
    pub pending: bool,
    pub name: String,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub payment_channel: Option<String>,
    #[serde(default)]
    pub personal_finance_category: Option<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SyncResponse {
    pub added: Vec<Transaction>,
    pub next_cursor: String,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Institution {
    pub institution_id: String,
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstitutionsResponse {
    pub institutions: Vec<Institution>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InstitutionResponse {
    pub institution: Institution,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemResponse {
    pub item: Item,
}

pub(crate) struct PlaidClient {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
    secret: String,
}

impl PlaidClient {
    pub(crate) fn new(
        client_id: String,
        secret: String,
        http: reqwest::Client,
        base_url: Url,
    ) -> Self {
        Self {
            http,
            base_url,
            client_id,
            secret,
        }
    }

    pub(crate) fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        mut body: Value,
    ) -> Result<T, PonteError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PonteError::invalid_arg(format!("bad url path {path:?}: {e}")))?;
        body["client_id"] = json!(self.client_id);
        body["secret"] = json!(self.secret);
        let resp = self.http.post(url).json(&body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(match error::normalize(status, &text) {
                Some((code, message)) => PonteError::provider(code, message),
                None => PonteError::status(status, text),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn accounts_get(&self, token: &str) -> Result<AccountsResponse, PonteError> {
        self.post("/accounts/get", json!({"access_token": token}))
            .await
    }

    pub(crate) async fn balance_get(&self, token: &str) -> Result<AccountsResponse, PonteError> {
        self.post("/accounts/balance/get", json!({"access_token": token}))
            .await
    }

    pub(crate) async fn transactions_sync(
        &self,
        token: &str,
        cursor: Option<&str>,
        count: u32,
    ) -> Result<SyncResponse, PonteError> {
        let mut body = json!({"access_token": token, "count": count});
        if let Some(cursor) = cursor {
            body["cursor"] = json!(cursor);
        }
        self.post("/transactions/sync", body).await
    }

    pub(crate) async fn institutions_get(
        &self,
        offset: u32,
        count: u32,
        country_codes: &[&str],
    ) -> Result<Vec<Institution>, PonteError> {
        let body = json!({
            "count": count,
            "offset": offset,
            "country_codes": country_codes,
            "options": {"include_optional_metadata": true},
        });
        let resp: InstitutionsResponse = self.post("/institutions/get", body).await?;
        Ok(resp.institutions)
    }

    pub(crate) async fn institution_get_by_id(
        &self,
        institution_id: &str,
        country_codes: &[&str],
    ) -> Result<Institution, PonteError> {
        let body = json!({
            "institution_id": institution_id,
            "country_codes": country_codes,
            "options": {"include_optional_metadata": true},
        });
        let resp: InstitutionResponse = self.post("/institutions/get_by_id", body).await?;
        Ok(resp.institution)
    }

    pub(crate) async fn item_get(&self, token: &str) -> Result<ItemResponse, PonteError> {
        self.post("/item/get", json!({"access_token": token})).await
    }

    pub(crate) async fn item_remove(&self, token: &str) -> Result<(), PonteError> {
        let _: Value = self
            .post("/item/remove", json!({"access_token": token}))
            .await?;
        Ok(())
    }

    /// Cheapest authenticated call: a one-item institutions page.
    pub(crate) async fn probe(&self) -> Result<(), PonteError> {
        let _ = self.institutions_get(0, 1, &["US"]).await?;
        Ok(())
    }
}
