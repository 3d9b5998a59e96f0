// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use clap::ArgMatches;

use super::months_arg;
use crate::config::Config;
use crate::engine::summary::{Overview, overview};
use crate::source::{RecordSource, all_investments, all_transactions, category_label};
use crate::utils::{fmt_money, fmt_rate, maybe_print_json, pretty_table};

pub fn build(source: &dyn RecordSource, months: usize) -> Result<Overview> {
    let transactions = all_transactions(source)?;
    let investments = all_investments(source)?;
    let categories = source.categories()?;
    let mut out = overview(&transactions, &investments, months);
    for item in &mut out.expense_categories {
        item.category = category_label(&categories, &item.category).to_string();
    }
    Ok(out)
}

pub fn handle(source: &dyn RecordSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let report = build(source, months_arg(sub, config))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = &config.currency;
    let tx = &report.transactions;
    let inv = &report.investments;
    let rows = vec![
        vec!["Income".to_string(), fmt_money(&tx.total_income, ccy)],
        vec!["Expenses".to_string(), fmt_money(&tx.total_expenses, ccy)],
        vec!["Balance".to_string(), fmt_money(&tx.balance, ccy)],
        vec!["Invested".to_string(), fmt_money(&inv.total_invested, ccy)],
        vec![
            "Monthly return".to_string(),
            fmt_money(&inv.total_monthly_return, ccy),
        ],
        vec!["Average rate".to_string(), fmt_rate(&inv.average_rate)],
        vec!["Net worth".to_string(), fmt_money(&report.net_worth, ccy)],
    ];
    println!("{}", pretty_table(&["", "Total"], rows));

    let monthly: Vec<Vec<String>> = report
        .monthly
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                fmt_money(&m.income, ccy),
                fmt_money(&m.expenses, ccy),
                fmt_money(&m.balance, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expenses", "Balance"], monthly)
    );
    let top: Vec<Vec<String>> = report
        .expense_categories
        .iter()
        .take(5)
        .map(|c| vec![c.category.clone(), fmt_money(&c.total, ccy)])
        .collect();
    println!("{}", pretty_table(&["Top categories", "Spent"], top));
    let types: Vec<Vec<String>> = report
        .investment_types
        .iter()
        .map(|t| vec![t.name.clone(), fmt_money(&t.total, ccy), fmt_rate(&t.percentage)])
        .collect();
    println!("{}", pretty_table(&["Investment type", "Invested", "Share"], types));
    Ok(())
}
