//! Vendor tags and the travel/finance capability split.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five external vendors this workspace can speak to.
///
/// The wire tag is the lowercase vendor name; parsing is the only place a
/// raw tag string is interpreted, so an unrecognized tag never travels past
/// the configuration boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Duffel flight booking.
    Duffel,
    /// Amadeus Self-Service travel APIs.
    Amadeus,
    /// Teller bank data (US).
    Teller,
    /// Plaid bank data.
    Plaid,
    /// GoCardless bank account data (EU/UK).
    Gocardless,
}

/// Which capability trait a vendor implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFamily {
    /// Flight search and booking.
    Travel,
    /// Bank accounts and transactions.
    Finance,
}

impl ProviderKind {
    /// Every supported vendor, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Duffel,
        Self::Amadeus,
        Self::Teller,
        Self::Plaid,
        Self::Gocardless,
    ];

    /// The capability family this vendor belongs to. Fixed at compile time;
    /// a vendor is never in both.
    #[must_use]
    pub const fn family(self) -> ProviderFamily {
        match self {
            Self::Duffel | Self::Amadeus => ProviderFamily::Travel,
            Self::Teller | Self::Plaid | Self::Gocardless => ProviderFamily::Finance,
        }
    }

    /// The canonical lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duffel => "duffel",
            Self::Amadeus => "amadeus",
            Self::Teller => "teller",
            Self::Plaid => "plaid",
            Self::Gocardless => "gocardless",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a tag string does not name a supported vendor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized provider tag: {0}")]
pub struct ParseProviderKindError(pub String);

impl FromStr for ProviderKind {
    type Err = ParseProviderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duffel" => Ok(Self::Duffel),
            "amadeus" => Ok(Self::Amadeus),
            "teller" => Ok(Self::Teller),
            "plaid" => Ok(Self::Plaid),
            "gocardless" => Ok(Self::Gocardless),
            other => Err(ParseProviderKindError(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Travel => "travel",
            Self::Finance => "finance",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "stripe".parse::<ProviderKind>().unwrap_err();
        assert_eq!(err.0, "stripe");
    }

    #[test]
    fn families_are_fixed() {
        assert_eq!(ProviderKind::Duffel.family(), ProviderFamily::Travel);
        assert_eq!(ProviderKind::Amadeus.family(), ProviderFamily::Travel);
        assert_eq!(ProviderKind::Teller.family(), ProviderFamily::Finance);
        assert_eq!(ProviderKind::Plaid.family(), ProviderFamily::Finance);
        assert_eq!(ProviderKind::Gocardless.family(), ProviderFamily::Finance);
    }
}
