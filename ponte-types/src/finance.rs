//! Canonical finance entities and request shapes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// Ledger category of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Checking/savings style account.
    Depository,
    /// Credit card account.
    Credit,
    /// Loan or mortgage.
    Loan,
    /// Asset account with no closer mapping.
    OtherAsset,
    /// Liability account with no closer mapping.
    OtherLiability,
}

/// Current balance of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// Signed amount; positive means funds available, negative means owed.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// A financial institution as the vendor catalogs it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    /// Vendor institution identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Logo URL, when the vendor supplies one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Which vendor this catalog entry came from.
    pub provider: ProviderKind,
}

/// Vendor-side identifiers a caller needs to address this account later.
///
/// Which field is populated depends on the vendor's linking model: Teller
/// uses enrollments, Plaid items, GoCardless requisitioned resources.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProviderRefs {
    /// Enrollment / item / requisition identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<String>,
    /// Vendor resource identifier distinct from the account id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// A linked bank account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Vendor account identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// ISO 4217 currency code of the account ledger.
    pub currency: String,
    /// Ledger category.
    pub account_type: AccountType,
    /// Institution the account lives at.
    pub institution: Institution,
    /// Balance at fetch time.
    pub balance: Balance,
    /// Vendor-side linking identifiers.
    #[serde(default)]
    pub provider_refs: ProviderRefs,
}

/// Settlement state of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Settled on the ledger.
    Posted,
    /// Authorized but not yet settled.
    Pending,
}

/// How a transaction was executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionMethod {
    /// Generic payment.
    Payment,
    /// Card purchase.
    CardPurchase,
    /// Card cash withdrawal.
    CardAtm,
    /// Account-to-account transfer.
    Transfer,
    /// ACH credit or debit.
    Ach,
    /// Interest credit.
    Interest,
    /// Cash or check deposit.
    Deposit,
    /// Wire transfer.
    Wire,
    /// Bank fee.
    Fee,
    /// Anything the vendor does not classify further.
    Other,
}

/// A single ledger transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Vendor transaction identifier.
    pub id: String,
    /// Signed amount; negative means money out.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Booking date.
    pub date: NaiveDate,
    /// Settlement state.
    pub status: TransactionStatus,
    /// Running account balance after this transaction, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    /// Normalized spending category, when derivable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Execution method.
    pub method: TransactionMethod,
    /// Counterparty or short label.
    pub name: String,
    /// Longer free-text description, when distinct from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Whether a vendor still honors a connection's credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// The link is live.
    Connected,
    /// The link requires the user to re-authenticate.
    Disconnected,
}

/// Connection status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Current link state.
    pub status: ConnectionState,
}

/// Fetch transactions for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetTransactionsRequest {
    /// The account whose ledger to read.
    pub account_id: String,
    /// Per-connection access token, for vendors that scope by token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Account category, for vendors that sign amounts by it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<AccountType>,
    /// Fetch only the most recent page instead of the full history.
    #[serde(default)]
    pub latest: bool,
}

/// Fetch the accounts behind a connection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetAccountsRequest {
    /// Vendor connection identifier (requisition), for vendors that scope
    /// accounts by connection rather than token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Per-connection access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Institution to attribute the accounts to, for vendors that do not
    /// return it inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<String>,
}

/// Fetch one account's balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAccountBalanceRequest {
    /// The account to read.
    pub account_id: String,
    /// Per-connection access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// List institutions available through a vendor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetInstitutionsRequest {
    /// ISO 3166-1 alpha-2 country filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Detach accounts from a connection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteAccountsRequest {
    /// The account to detach, for vendors that delete per account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Vendor connection identifier, for vendors that detach per connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Per-connection access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Query whether a connection's credentials are still honored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GetConnectionStatusRequest {
    /// Vendor connection identifier (item / requisition).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Per-connection access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Sever a connection at the vendor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeleteConnectionRequest {
    /// Vendor connection identifier (item / requisition).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    /// Per-connection access token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}
