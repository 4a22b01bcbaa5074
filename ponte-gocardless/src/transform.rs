//! Pure conversions from GoCardless wire payloads to canonical types.

use std::str::FromStr;

use chrono::NaiveDate;
use ponte_core::PonteError;
use ponte_types::{
    Account, AccountType, Balance, Institution, ProviderKind, ProviderRefs, Transaction,
    TransactionMethod, TransactionStatus,
};
use rust_decimal::Decimal;

use crate::client;

fn decimal(s: &str, what: &str) -> Result<Decimal, PonteError> {
    Decimal::from_str(s).map_err(|e| PonteError::data(format!("unparseable {what} {s:?}: {e}")))
}

pub(crate) fn account(
    account_id: String,
    requisition_id: &str,
    details: client::AccountDetails,
    balance: Balance,
    institution: Institution,
) -> Account {
    let name = details
        .name
        .unwrap_or_else(|| format!("Account {account_id}"));
    Account {
        name,
        currency: details.currency,
        account_type: account_type(details.cash_account_type.as_deref()),
        institution,
        balance,
        provider_refs: ProviderRefs {
            enrollment_id: Some(requisition_id.to_string()),
            resource_id: details.resource_id,
        },
        id: account_id,
    }
}

/// Prefers the interim available balance, falling back to the first entry.
pub(crate) fn balance(entries: &[client::BalanceEntry]) -> Result<Balance, PonteError> {
    let entry = entries
        .iter()
        .find(|e| e.balance_type == "interimAvailable")
        .or_else(|| entries.first())
        .ok_or_else(|| PonteError::data("balances response carries no entries"))?;
    Ok(Balance {
        amount: decimal(&entry.balance_amount.amount, "balance")?,
        currency: entry.balance_amount.currency.clone(),
    })
}

pub(crate) fn transaction(
    raw: client::Transaction,
    status: TransactionStatus,
) -> Result<Transaction, PonteError> {
    let id = raw
        .transaction_id
        .or(raw.internal_transaction_id)
        .ok_or_else(|| PonteError::data("transaction carries no identifier"))?;
    let amount = decimal(&raw.transaction_amount.amount, "amount")?;
    let date_str = raw
        .booking_date
        .or(raw.value_date)
        .ok_or_else(|| PonteError::data(format!("transaction {id} carries no date")))?;
    let date = NaiveDate::from_str(&date_str)
        .map_err(|e| PonteError::data(format!("unparseable date {date_str:?}: {e}")))?;
    let name = raw
        .creditor_name
        .or(raw.debtor_name)
        .or_else(|| raw.remittance_information.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    Ok(Transaction {
        id,
        amount,
        currency: raw.transaction_amount.currency,
        date,
        status,
        balance: None,
        category: None,
        method: method(raw.bank_transaction_code.as_deref()),
        name,
        description: raw.remittance_information,
    })
}

pub(crate) fn institution(raw: client::Institution) -> Institution {
    Institution {
        id: raw.id,
        name: raw.name,
        logo: raw.logo,
        provider: ProviderKind::Gocardless,
    }
}

fn account_type(cash_account_type: Option<&str>) -> AccountType {
    match cash_account_type {
        Some("CARD") => AccountType::Credit,
        Some("LOAN") => AccountType::Loan,
        _ => AccountType::Depository,
    }
}

fn method(code: Option<&str>) -> TransactionMethod {
    match code {
        Some("TRANSFER") => TransactionMethod::Transfer,
        Some("CARD_PAYMENT") => TransactionMethod::CardPurchase,
        Some("FEE") => TransactionMethod::Fee,
        Some("INTEREST") => TransactionMethod::Interest,
        _ => TransactionMethod::Other,
    }
}
