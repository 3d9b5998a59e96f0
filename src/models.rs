// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    /// Percentage of the reference index (e.g. 110 means 110% of CDI).
    pub rate: Decimal,
    pub monthly_return: Decimal,
    pub date: NaiveDate,
    /// Investment type label such as "CDB" or "LCI".
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Investment {
    /// Simple monthly yield on the principal: `amount * rate% / 12`. `None`
    /// when the product does not fit in a `Decimal`.
    pub fn estimated_monthly_return(amount: Decimal, rate: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(rate / Decimal::ONE_HUNDRED)?
            .checked_div(Decimal::from(12))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// Fields accepted when recording a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub category_id: Option<String>,
}

/// Fields accepted when recording a new investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInvestment {
    pub name: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub date: NaiveDate,
    #[serde(default, rename = "type")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!(
            TransactionKind::from_str(" Income ").unwrap(),
            TransactionKind::Income
        );
        assert!(TransactionKind::from_str("transfer").is_err());
    }

    #[test]
    fn transaction_uses_wire_names() {
        let raw = r#"{"id":"txn-1","type":"expense","description":"Rent",
            "amount":2200,"date":"2024-12-14","categoryId":"cat-4"}"#;
        let tx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.kind, TransactionKind::Expense);
        assert_eq!(tx.amount, Decimal::from(2200));
        assert_eq!(tx.category_id.as_deref(), Some("cat-4"));
    }

    #[test]
    fn monthly_return_is_rate_share_of_principal() {
        let got = Investment::estimated_monthly_return(
            Decimal::from(12000),
            Decimal::from_str("110").unwrap(),
        );
        assert_eq!(got, Some(Decimal::from(1100)));
        assert_eq!(
            Investment::estimated_monthly_return(Decimal::MAX, Decimal::from(200)),
            None
        );
    }
}
