// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregates over a record set. Callers decide whether they pass the
//! filtered set or the full one.
//!
//! Sums saturate at `Decimal::MAX` instead of overflowing.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Investment, Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTotals {
    pub total_invested: Decimal,
    pub total_monthly_return: Decimal,
    /// Zero for an empty set.
    pub average_rate: Decimal,
}

/// Record kinds that have a summary.
pub trait Summarize: Sized {
    type Totals;

    fn summarize(records: &[Self]) -> Self::Totals;
}

impl Summarize for Transaction {
    type Totals = TransactionTotals;

    fn summarize(records: &[Self]) -> TransactionTotals {
        summarize_transactions(records)
    }
}

impl Summarize for Investment {
    type Totals = InvestmentTotals;

    fn summarize(records: &[Self]) -> InvestmentTotals {
        summarize_investments(records)
    }
}

pub fn summarize_transactions(records: &[Transaction]) -> TransactionTotals {
    let mut totals = TransactionTotals::default();
    for tx in records {
        let slot = match tx.kind {
            TransactionKind::Income => &mut totals.total_income,
            TransactionKind::Expense => &mut totals.total_expenses,
        };
        *slot = slot.saturating_add(tx.amount);
    }
    totals.balance = totals.total_income.saturating_sub(totals.total_expenses);
    totals
}

pub fn summarize_investments(records: &[Investment]) -> InvestmentTotals {
    let mut totals = InvestmentTotals::default();
    let mut rate_sum = Decimal::ZERO;
    for inv in records {
        totals.total_invested = totals.total_invested.saturating_add(inv.amount);
        totals.total_monthly_return = totals
            .total_monthly_return
            .saturating_add(inv.monthly_return);
        rate_sum = rate_sum.saturating_add(inv.rate);
    }
    if !records.is_empty() {
        totals.average_rate = rate_sum / Decimal::from(records.len());
    }
    totals
}

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    /// `YYYY-MM`
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

/// Per-month cashflow for the most recent `months` months that have any
/// transactions, oldest first.
pub fn monthly_cashflow(records: &[Transaction], months: usize) -> Vec<MonthlyTotals> {
    let mut map: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for tx in records {
        let entry = map
            .entry((tx.date.year(), tx.date.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        let slot = match tx.kind {
            TransactionKind::Income => &mut entry.0,
            TransactionKind::Expense => &mut entry.1,
        };
        *slot = slot.saturating_add(tx.amount);
    }
    let skip = map.len().saturating_sub(months);
    map.into_iter()
        .skip(skip)
        .map(|((year, month), (income, expenses))| MonthlyTotals {
            month: format!("{year:04}-{month:02}"),
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        })
        .collect()
}

pub const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Expense totals per category id, largest first. Ties are ordered by name.
pub fn expenses_by_category(records: &[Transaction]) -> Vec<CategoryTotal> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for tx in records.iter().filter(|t| t.kind == TransactionKind::Expense) {
        let key = tx.category_id.as_deref().unwrap_or(UNCATEGORIZED);
        let slot = agg.entry(key).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(tx.amount);
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items
}

/// Label for investments without a type.
pub const OTHER_TYPE: &str = "Outros";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeTotal {
    pub name: String,
    pub total: Decimal,
    /// Share of all invested principal in percent; 0 when nothing is invested.
    pub percentage: Decimal,
}

/// Invested principal per investment type, largest first. Ties are ordered
/// by name.
pub fn investments_by_type(records: &[Investment]) -> Vec<TypeTotal> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for inv in records {
        let key = inv
            .category
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(OTHER_TYPE);
        let slot = agg.entry(key).or_insert(Decimal::ZERO);
        *slot = slot.saturating_add(inv.amount);
    }
    let grand_total = agg
        .values()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(*v));
    let mut items: Vec<TypeTotal> = agg
        .into_iter()
        .map(|(name, total)| TypeTotal {
            name: name.to_string(),
            percentage: percent_of(total, grand_total),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    items
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |p| {
            p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        })
}

/// Dashboard numbers across both record kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub transactions: TransactionTotals,
    pub investments: InvestmentTotals,
    /// Cash balance plus invested principal.
    pub net_worth: Decimal,
    pub monthly: Vec<MonthlyTotals>,
    pub expense_categories: Vec<CategoryTotal>,
    pub investment_types: Vec<TypeTotal>,
}

pub fn overview(
    transactions: &[Transaction],
    investments: &[Investment],
    months: usize,
) -> Overview {
    let tx_totals = summarize_transactions(transactions);
    let inv_totals = summarize_investments(investments);
    Overview {
        net_worth: tx_totals.balance.saturating_add(inv_totals.total_invested),
        transactions: tx_totals,
        investments: inv_totals,
        monthly: monthly_cashflow(transactions, months),
        expense_categories: expenses_by_category(transactions),
        investment_types: investments_by_type(investments),
    }
}
