//! Pure conversions from Teller wire payloads to canonical types.

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

pub(crate) fn account(raw: client::Account, balances: &client::Balances) -> Result<Account, PonteError> {
    let amount = decimal(&balances.ledger, "balance")?;
    Ok(Account {
        id: raw.id,
        name: raw.name,
        currency: raw.currency.clone(),
        account_type: account_type(&raw.account_type),
        institution: Institution {
            id: raw.institution.id.clone(),
            name: raw.institution.name,
            logo: Some(format!(
                "https://teller.io/images/banks/{}.jpg",
                raw.institution.id
            )),
            provider: ProviderKind::Teller,
        },
        balance: Balance {
            amount,
            currency: raw.currency,
        },
        provider_refs: ProviderRefs {
            enrollment_id: Some(raw.enrollment_id),
            resource_id: None,
        },
    })
}

pub(crate) fn balance(raw: &client::Balances, currency: &str) -> Result<Balance, PonteError> {
    Ok(Balance {
        amount: decimal(&raw.ledger, "balance")?,
        currency: currency.to_string(),
    })
}

pub(crate) fn transaction(raw: client::Transaction) -> Result<Transaction, PonteError> {
    let amount = decimal(&raw.amount, "amount")?;
    let date = NaiveDate::from_str(&raw.date)
        .map_err(|e| PonteError::data(format!("unparseable date {:?}: {e}", raw.date)))?;
    let balance = raw
        .running_balance
        .as_deref()
        .map(|b| decimal(b, "running balance"))
        .transpose()?;
    let name = raw
        .details
        .counterparty
        .and_then(|c| c.name)
        .unwrap_or_else(|| raw.description.clone());
    Ok(Transaction {
        id: raw.id,
        amount,
        // Teller serves US accounts only.
        currency: "USD".to_string(),
        date,
        status: if raw.status == "posted" {
            TransactionStatus::Posted
        } else {
            TransactionStatus::Pending
        },
        balance,
        category: raw.details.category,
        method: method(&raw.txn_type),
        name,
        description: Some(raw.description),
    })
}

pub(crate) fn institution(raw: client::Institution) -> Institution {
    Institution {
        logo: Some(format!("https://teller.io/images/banks/{}.jpg", raw.id)),
        id: raw.id,
        name: raw.name,
        provider: ProviderKind::Teller,
    }
}

fn account_type(s: &str) -> AccountType {
    match s {
        "depository" => AccountType::Depository,
        "credit" => AccountType::Credit,
        _ => AccountType::OtherAsset,
    }
}

fn method(s: &str) -> TransactionMethod {
    match s {
        "payment" | "bill_payment" | "digital_payment" => TransactionMethod::Payment,
        "card_payment" => TransactionMethod::CardPurchase,
        "atm" => TransactionMethod::CardAtm,
        "transfer" => TransactionMethod::Transfer,
        "ach" => TransactionMethod::Ach,
        "interest" => TransactionMethod::Interest,
        "deposit" | "check" => TransactionMethod::Deposit,
        "wire" => TransactionMethod::Wire,
        "fee" => TransactionMethod::Fee,
        _ => TransactionMethod::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_maps_status_method_and_counterparty() {
        let raw: client::Transaction = serde_json::from_str(
            r#"{
                "id": "txn_1",
                "amount": "-42.17",
                "date": "2026-02-11",
                "description": "COFFEE ROASTERS 014",
                "status": "posted",
                "type": "card_payment",
                "running_balance": "812.05",
                "details": {
                    "category": "dining",
                    "counterparty": {"name": "Coffee Roasters"}
                }
            }"#,
        )
        .unwrap();
        let txn = transaction(raw).unwrap();
        assert_eq!(txn.amount, Decimal::new(-4217, 2));
        assert_eq!(txn.status, TransactionStatus::Posted);
        assert_eq!(txn.method, TransactionMethod::CardPurchase);
        assert_eq!(txn.name, "Coffee Roasters");
        assert_eq!(txn.category.as_deref(), Some("dining"));
        assert_eq!(txn.balance, Some(Decimal::new(81205, 2)));
    }

    #[test]
    fn pending_falls_back_to_the_description() {
        let raw: client::Transaction = serde_json::from_str(
            r#"{
                "id": "txn_2",
                "amount": "-5.00",
                "date": "2026-02-12",
                "description": "PENDING HOLD",
                "status": "pending",
                "type": "mystery"
            }"#,
        )
        .unwrap();
        let txn = transaction(raw).unwrap();
        assert_eq!(txn.status, TransactionStatus::Pending);
        assert_eq!(txn.method, TransactionMethod::Other);
        assert_eq!(txn.name, "PENDING HOLD");
        assert_eq!(txn.balance, None);
    }
}
