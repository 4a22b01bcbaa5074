use ponte_types::MissingCredential;
use thiserror::Error;

/// Unified error type for the ponte workspace.
///
/// Vendor connectors fold every failure into this enum. `Provider` is the
/// only variant built from a recognized vendor error envelope; an HTTP
/// failure no normalizer claims surfaces as `Status`, unchanged.
#[derive(Debug, Error)]
pub enum PonteError {
    /// A recognized vendor error, normalized to its code and message.
    #[error("provider error {code}: {message}")]
    Provider {
        /// Vendor error code, e.g. `"offer_no_longer_available"`.
        code: String,
        /// Human-readable message from the vendor.
        message: String,
    },

    /// An HTTP failure whose body did not match the vendor's error envelope.
    /// Carries the raw body for diagnosis.
    #[error("unexpected http status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Network-level failure (connect, timeout, TLS, mid-body disconnect).
    #[error("transport error: {0}")]
    Transport(String),

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument, including missing credentials.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested capability does not exist at the target vendor.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested
        /// (e.g. "orders/modify").
        capability: &'static str,
    },
}

impl PonteError {
    /// Helper: build a `Provider` error from a normalized envelope.
    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Helper: build a `Status` error from an unrecognized HTTP failure.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Helper: build a `Transport` error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Helper: build a `Data` error.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Whether a retry might succeed.
    ///
    /// Transport failures, 429, and 5xx are transient. Everything else is
    /// permanent: a normalized `Provider` error means the vendor understood
    /// the request and rejected it.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Provider { .. }
            | Self::Data(_)
            | Self::InvalidArg(_)
            | Self::Unsupported { .. } => false,
        }
    }
}

impl From<reqwest::Error> for PonteError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for PonteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(err.to_string())
    }
}

impl From<MissingCredential> for PonteError {
    fn from(err: MissingCredential) -> Self {
        Self::InvalidArg(err.to_string())
    }
}
