//! The shared credentials bundle handed to vendor connectors.

use std::collections::HashMap;

/// Well-known credential keys.
///
/// Connectors pull their secrets from one shared [`Credentials`] bundle so a
/// single configuration source can drive any vendor (including all five at
/// once for the health aggregate).
pub mod keys {
    /// Duffel API access token.
    pub const DUFFEL_ACCESS_TOKEN: &str = "duffel_access_token";
    /// Amadeus OAuth client id.
    pub const AMADEUS_CLIENT_ID: &str = "amadeus_client_id";
    /// Amadeus OAuth client secret.
    pub const AMADEUS_CLIENT_SECRET: &str = "amadeus_client_secret";
    /// Plaid client id.
    pub const PLAID_CLIENT_ID: &str = "plaid_client_id";
    /// Plaid secret for the configured environment.
    pub const PLAID_SECRET: &str = "plaid_secret";
    /// GoCardless secret id.
    pub const GOCARDLESS_SECRET_ID: &str = "gocardless_secret_id";
    /// GoCardless secret key.
    pub const GOCARDLESS_SECRET_KEY: &str = "gocardless_secret_key";
}

/// A string-keyed secrets map.
///
/// Values are opaque to this layer; each connector validates the keys it
/// needs at construction time via [`Credentials::require`].
#[derive(Debug, Clone, Default)]
pub struct Credentials(HashMap<String, String>);

impl Credentials {
    /// An empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts or replaces a secret.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up a secret.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Looks up a secret that must be present.
    pub fn require(&self, key: &str) -> Result<&str, MissingCredential> {
        self.get(key).ok_or_else(|| MissingCredential {
            key: key.to_string(),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A connector asked for a key the bundle does not hold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing credential: {key}")]
pub struct MissingCredential {
    /// The key that was absent.
    pub key: String,
}
