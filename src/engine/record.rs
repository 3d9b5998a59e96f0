// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use crate::engine::{Record, SortValue};
use crate::error::Error;
use crate::models::{Investment, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionSortField {
    Description,
    Amount,
    Kind,
    Date,
    Category,
}

impl TransactionSortField {
    pub const VARIANTS: [TransactionSortField; 5] = [
        TransactionSortField::Description,
        TransactionSortField::Amount,
        TransactionSortField::Kind,
        TransactionSortField::Date,
        TransactionSortField::Category,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransactionSortField::Description => "description",
            TransactionSortField::Amount => "amount",
            TransactionSortField::Kind => "type",
            TransactionSortField::Date => "date",
            TransactionSortField::Category => "category",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvestmentSortField {
    Name,
    Amount,
    Rate,
    MonthlyReturn,
    Date,
}

impl InvestmentSortField {
    pub const VARIANTS: [InvestmentSortField; 5] = [
        InvestmentSortField::Name,
        InvestmentSortField::Amount,
        InvestmentSortField::Rate,
        InvestmentSortField::MonthlyReturn,
        InvestmentSortField::Date,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InvestmentSortField::Name => "name",
            InvestmentSortField::Amount => "amount",
            InvestmentSortField::Rate => "rate",
            InvestmentSortField::MonthlyReturn => "monthlyReturn",
            InvestmentSortField::Date => "date",
        }
    }
}

macro_rules! sort_field_impls {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            // Accepts `monthlyReturn`, `monthly-return` and `monthly_return`.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted: String = s
                    .trim()
                    .chars()
                    .filter(|c| *c != '_' && *c != '-')
                    .collect();
                <$ty>::VARIANTS
                    .into_iter()
                    .find(|v| v.name().eq_ignore_ascii_case(&wanted))
                    .ok_or_else(|| Error::InvalidSortField {
                        kind: $kind,
                        field: s.to_string(),
                    })
            }
        }
    };
}

sort_field_impls!(TransactionSortField, "transactions");
sort_field_impls!(InvestmentSortField, "investments");

impl Record for Transaction {
    type SortField = TransactionSortField;

    fn search_text(&self) -> &str {
        &self.description
    }

    fn sort_value(&self, field: TransactionSortField) -> SortValue<'_> {
        match field {
            TransactionSortField::Description => SortValue::Text(&self.description),
            TransactionSortField::Amount => SortValue::Number(self.amount),
            TransactionSortField::Kind => SortValue::Text(self.kind.as_str()),
            TransactionSortField::Date => SortValue::Date(self.date),
            TransactionSortField::Category => self
                .category_id
                .as_deref()
                .map_or(SortValue::Missing, SortValue::Text),
        }
    }
}

impl Record for Investment {
    type SortField = InvestmentSortField;

    fn search_text(&self) -> &str {
        &self.name
    }

    fn sort_value(&self, field: InvestmentSortField) -> SortValue<'_> {
        match field {
            InvestmentSortField::Name => SortValue::Text(&self.name),
            InvestmentSortField::Amount => SortValue::Number(self.amount),
            InvestmentSortField::Rate => SortValue::Number(self.rate),
            InvestmentSortField::MonthlyReturn => SortValue::Number(self.monthly_return),
            InvestmentSortField::Date => SortValue::Date(self.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_fields_parse_in_any_spelling() {
        for raw in ["monthlyReturn", "monthly_return", "monthly-return", "MONTHLYRETURN"] {
            assert_eq!(
                raw.parse::<InvestmentSortField>().unwrap(),
                InvestmentSortField::MonthlyReturn
            );
        }
        assert_eq!(
            "type".parse::<TransactionSortField>().unwrap(),
            TransactionSortField::Kind
        );
    }

    #[test]
    fn unknown_sort_field_names_the_view() {
        let err = "rate".parse::<TransactionSortField>().unwrap_err();
        assert_eq!(err.to_string(), "unknown sort field 'rate' for transactions");
    }
}
