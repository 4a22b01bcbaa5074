use ponte_types::{Credentials, ProviderKind};

/// Configuration for building a [`Ponte`](crate::Ponte) facade.
///
/// Tags are parsed into [`ProviderKind`] before they get here; an
/// unrecognized tag therefore arrives as `provider: None`, which builds a
/// facade with no adapter behind it.
#[derive(Debug, Clone, Default)]
pub struct ProviderParams {
    /// Which vendor to drive, if any.
    pub provider: Option<ProviderKind>,
    /// Shared secrets bundle; each connector validates the keys it needs.
    pub credentials: Credentials,
    /// Preconfigured HTTP client to run vendor traffic through, e.g. one
    /// loaded with the Teller client certificate.
    pub transport: Option<reqwest::Client>,
}

impl ProviderParams {
    /// An empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the vendor to drive.
    #[must_use]
    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the credentials bundle.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Injects the HTTP client vendor traffic should ride on.
    #[must_use]
    pub fn with_transport(mut self, transport: reqwest::Client) -> Self {
        self.transport = Some(transport);
        self
    }
}
