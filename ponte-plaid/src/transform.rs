//! Pure conversions from Plaid wire payloads to canonical types.

use std::str::FromStr;

use chrono::NaiveDate;
use ponte_core::PonteError;
use ponte_types::{
    Account, AccountType, Balance, Institution, ProviderKind, ProviderRefs, Transaction,
    TransactionMethod, TransactionStatus,
};
use rust_decimal::Decimal;

use crate::client;

fn decimal(value: f64, what: &str) -> Result<Decimal, PonteError> {
    Decimal::try_from(value)
        .map_err(|e| PonteError::data(format!("unrepresentable {what} {value}: {e}")))
}

pub(crate) fn account(
    raw: client::Account,
    item: &client::Item,
    institution: Institution,
) -> Result<Account, PonteError> {
    let currency = raw
        .balances
        .iso_currency_code
        .clone()
        .unwrap_or_else(|| "USD".to_string());
    let amount = decimal(raw.balances.current.unwrap_or(0.0), "balance")?;
    Ok(Account {
        id: raw.account_id,
        name: raw.name,
        currency: currency.clone(),
        account_type: account_type(&raw.account_type),
        institution,
        balance: Balance { amount, currency },
        provider_refs: ProviderRefs {
            enrollment_id: Some(item.item_id.clone()),
            resource_id: None,
        },
    })
}

pub(crate) fn balance(raw: &client::Account) -> Result<Balance, PonteError> {
    Ok(Balance {
        amount: decimal(raw.balances.current.unwrap_or(0.0), "balance")?,
        currency: raw
            .balances
            .iso_currency_code
            .clone()
            .unwrap_or_else(|| "USD".to_string()),
    })
}

pub(crate) fn transaction(raw: client::Transaction) -> Result<Transaction, PonteError> {
    // Plaid signs debits positive; the canonical convention is the reverse.
    let amount = -decimal(raw.amount, "amount")?;
    let date = NaiveDate::from_str(&raw.date)
        .map_err(|e| PonteError::data(format!("unparseable date {:?}: {e}", raw.date)))?;
    let name = raw.merchant_name.unwrap_or_else(|| raw.name.clone());
    Ok(Transaction {
        id: raw.transaction_id,
        amount,
        currency: raw.iso_currency_code.unwrap_or_else(|| "USD".to_string()),
        date,
        status: if raw.pending {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Posted
        },
        balance: None,
        category: raw.personal_finance_category.map(|c| c.primary),
        method: method(raw.payment_channel.as_deref()),
        name,
        description: Some(raw.name),
    })
}

pub(crate) fn institution(raw: client::Institution) -> Institution {
    Institution {
        id: raw.institution_id,
        name: raw.name,
        logo: raw.logo,
        provider: ProviderKind::Plaid,
    }
}

/// Placeholder when an item carries no institution reference.
pub(crate) fn unknown_institution() -> Institution {
    Institution {
        id: "unknown".to_string(),
        name: "Unknown".to_string(),
        logo: None,
        provider: ProviderKind::Plaid,
    }
}

fn account_type(s: &str) -> AccountType {
    match s {
        "depository" => AccountType::Depository,
        "credit" => AccountType::Credit,
        "loan" => AccountType::Loan,
        _ => AccountType::OtherAsset,
    }
}

fn method(channel: Option<&str>) -> TransactionMethod {
    match channel {
        Some("in store") => TransactionMethod::CardPurchase,
        Some("online") => TransactionMethod::Payment,
        _ => TransactionMethod::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_flips_the_sign_convention() {
        let raw: client::Transaction = serde_json::from_str(
            r#"{
                "transaction_id": "txn_1",
                "amount": 12.5,
                "iso_currency_code": "USD",
                "date": "2026-02-11",
                "pending": false,
                "name": "UBER TRIP HELP.UBER.COM",
                "merchant_name": "Uber",
                "payment_channel": "online",
                "personal_finance_category": {"primary": "TRANSPORTATION"}
            }"#,
        )
        .unwrap();
        let txn = transaction(raw).unwrap();
        assert_eq!(txn.amount, Decimal::new(-1250, 2));
        assert_eq!(txn.status, TransactionStatus::Posted);
        assert_eq!(txn.method, TransactionMethod::Payment);
        assert_eq!(txn.name, "Uber");
        assert_eq!(txn.category.as_deref(), Some("TRANSPORTATION"));
    }

    #[test]
    fn pending_refund_stays_positive() {
        let raw: client::Transaction = serde_json::from_str(
            r#"{
                "transaction_id": "txn_2",
                "amount": -30.0,
                "date": "2026-02-12",
                "pending": true,
                "name": "REFUND"
            }"#,
        )
        .unwrap();
        let txn = transaction(raw).unwrap();
        assert_eq!(txn.amount, Decimal::new(3000, 2));
        assert_eq!(txn.status, TransactionStatus::Pending);
        assert_eq!(txn.currency, "USD");
    }
}
