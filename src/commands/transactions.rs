// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use log::info;
use serde::Serialize;

use super::{
    Listing, date_or, months_arg, page_args, page_footer, parsed_or_default, required, search_arg,
    sort_arg, today,
};
use crate::config::Config;
use crate::engine::summary::{CategoryTotal, MonthlyTotals, expenses_by_category, monthly_cashflow};
use crate::engine::{
    FilterState, TransactionFilterState, TransactionFilters, TransactionTotals, apply_at,
    get_aggregates, paginate,
};
use crate::models::{Category, NewTransaction, Transaction};
use crate::source::{JsonFileSource, RecordSource, all_transactions, category_label};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &mut JsonFileSource, config: &Config, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, config, sub)?,
        Some(("add", sub)) => add(store, config, sub)?,
        Some(("summary", sub)) => summary(store, config, sub)?,
        Some(("import", sub)) => import(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn filter_state(sub: &ArgMatches) -> Result<TransactionFilterState> {
    let filters = TransactionFilters {
        kind: parsed_or_default(sub, "type")?,
        amount: parsed_or_default(sub, "amount")?,
        date: parsed_or_default(sub, "date")?,
    };
    Ok(FilterState::new()
        .with_search(search_arg(sub))
        .with_filters(filters)
        .with_sort(sort_arg(sub)?))
}

/// The page `tx list` shows, with totals over the whole filtered set.
pub fn query_page(
    source: &dyn RecordSource,
    config: &Config,
    sub: &ArgMatches,
    today: NaiveDate,
) -> Result<Listing<Transaction, TransactionTotals>> {
    let state = filter_state(sub)?;
    let (page, page_size) = page_args(sub, config)?;
    let records = all_transactions(source).context("could not load transactions")?;
    let visible = apply_at(&records, &state, today);
    Ok(Listing {
        totals: get_aggregates(&visible),
        page: paginate(&visible, page, page_size),
    })
}

fn list(store: &JsonFileSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let listing = query_page(store, config, sub, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &listing)? {
        return Ok(());
    }
    let categories = store.categories()?;
    let ccy = &config.currency;
    let rows: Vec<Vec<String>> = listing
        .page
        .items
        .iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.kind.to_string(),
                t.description.clone(),
                category_cell(&categories, t),
                fmt_money(&t.amount, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Description", "Category", "Amount"], rows)
    );
    println!("{}", page_footer(&listing.page, "transactions"));
    println!(
        "Income {}  Expenses {}  Balance {}",
        fmt_money(&listing.totals.total_income, ccy),
        fmt_money(&listing.totals.total_expenses, ccy),
        fmt_money(&listing.totals.balance, ccy)
    );
    Ok(())
}

fn category_cell(categories: &[Category], tx: &Transaction) -> String {
    tx.category_id
        .as_deref()
        .map(|id| category_label(categories, id).to_string())
        .unwrap_or_default()
}

pub fn new_transaction(sub: &ArgMatches, today: NaiveDate) -> Result<NewTransaction> {
    Ok(NewTransaction {
        kind: required(sub, "type")?.parse()?,
        description: required(sub, "description")?.to_string(),
        amount: parse_decimal(required(sub, "amount")?)?,
        date: date_or(sub, today)?,
        category_id: sub.get_one::<String>("category").cloned(),
    })
}

fn add(store: &mut JsonFileSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let fields = new_transaction(sub, today())?;
    let tx = store
        .create_transaction(fields)
        .context("could not record transaction")?;
    println!(
        "Recorded {} {} '{}' on {} ({})",
        tx.kind,
        fmt_money(&tx.amount, &config.currency),
        tx.description,
        tx.date,
        tx.id
    );
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub totals: TransactionTotals,
    pub monthly: Vec<MonthlyTotals>,
    pub expense_categories: Vec<CategoryTotal>,
}

/// Totals over every stored transaction, not just one page.
pub fn summary_report(source: &dyn RecordSource, months: usize) -> Result<TransactionSummary> {
    let records = all_transactions(source)?;
    let categories = source.categories()?;
    let mut expense_categories = expenses_by_category(&records);
    for item in &mut expense_categories {
        item.category = category_label(&categories, &item.category).to_string();
    }
    Ok(TransactionSummary {
        totals: get_aggregates(&records),
        monthly: monthly_cashflow(&records, months),
        expense_categories,
    })
}

fn summary(store: &JsonFileSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let report = summary_report(store, months_arg(sub, config))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &report)? {
        return Ok(());
    }
    let ccy = &config.currency;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance"],
            vec![vec![
                fmt_money(&report.totals.total_income, ccy),
                fmt_money(&report.totals.total_expenses, ccy),
                fmt_money(&report.totals.balance, ccy),
            ]],
        )
    );
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
    let by_category: Vec<Vec<String>> = report
        .expense_categories
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.total, ccy)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent"], by_category));
    Ok(())
}

fn import(store: &mut JsonFileSource, sub: &ArgMatches) -> Result<()> {
    let path = required(sub, "path")?;
    let count = store
        .import_transactions_csv(Path::new(path))
        .with_context(|| format!("failed to import {path}"))?;
    info!("data file now at {}", store.path().display());
    println!("Imported {count} transactions from {path}");
    Ok(())
}
