// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ArgMatches;
use rust_decimal::Decimal;

use super::{
    Listing, date_or, page_args, page_footer, parsed_or_default, required, search_arg, sort_arg,
    today,
};
use crate::config::Config;
use crate::engine::{
    FilterState, InvestmentFilterState, InvestmentFilters, InvestmentTotals, apply_at,
    get_aggregates, paginate,
};
use crate::error::Error;
use crate::models::{Investment, NewInvestment};
use crate::source::{JsonFileSource, RecordSource, all_investments};
use crate::utils::{fmt_money, fmt_rate, maybe_print_json, parse_decimal, pretty_table};

pub fn handle(store: &mut JsonFileSource, config: &Config, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(store, config, sub)?,
        Some(("add", sub)) => add(store, config, sub)?,
        Some(("summary", sub)) => summary(store, config, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn filter_state(sub: &ArgMatches) -> Result<InvestmentFilterState> {
    let filters = InvestmentFilters {
        amount: parsed_or_default(sub, "amount")?,
        rate: parsed_or_default(sub, "rate")?,
        date: parsed_or_default(sub, "date")?,
    };
    Ok(FilterState::new()
        .with_search(search_arg(sub))
        .with_filters(filters)
        .with_sort(sort_arg(sub)?))
}

pub fn query_page(
    source: &dyn RecordSource,
    config: &Config,
    sub: &ArgMatches,
    today: NaiveDate,
) -> Result<Listing<Investment, InvestmentTotals>> {
    let state = filter_state(sub)?;
    let (page, page_size) = page_args(sub, config)?;
    let records = all_investments(source).context("could not load investments")?;
    let visible = apply_at(&records, &state, today);
    Ok(Listing {
        totals: get_aggregates(&visible),
        page: paginate(&visible, page, page_size),
    })
}

fn totals_row(totals: &InvestmentTotals, ccy: &str) -> Vec<String> {
    vec![
        fmt_money(&totals.total_invested, ccy),
        fmt_money(&totals.total_monthly_return, ccy),
        fmt_rate(&totals.average_rate),
    ]
}

fn list(store: &JsonFileSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let listing = query_page(store, config, sub, today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &listing)? {
        return Ok(());
    }
    let ccy = &config.currency;
    let rows: Vec<Vec<String>> = listing
        .page
        .items
        .iter()
        .map(|i| {
            vec![
                i.date.to_string(),
                i.name.clone(),
                i.category.clone().unwrap_or_default(),
                fmt_money(&i.amount, ccy),
                fmt_rate(&i.rate),
                fmt_money(&i.monthly_return, ccy),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Name", "Type", "Amount", "Rate", "Monthly return"],
            rows
        )
    );
    println!("{}", page_footer(&listing.page, "investments"));
    println!(
        "{}",
        pretty_table(
            &["Invested", "Monthly return", "Average rate"],
            vec![totals_row(&listing.totals, ccy)],
        )
    );
    Ok(())
}

pub fn new_investment(sub: &ArgMatches, today: NaiveDate) -> Result<NewInvestment> {
    let raw_rate = required(sub, "rate")?;
    let rate = raw_rate
        .trim()
        .trim_end_matches('%')
        .parse::<Decimal>()
        .map_err(|_| Error::validation("rate", format!("invalid decimal '{raw_rate}'")))?;
    Ok(NewInvestment {
        name: required(sub, "name")?.to_string(),
        amount: parse_decimal(required(sub, "amount")?)?,
        rate,
        date: date_or(sub, today)?,
        category: sub.get_one::<String>("category").cloned(),
    })
}

fn add(store: &mut JsonFileSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let fields = new_investment(sub, today())?;
    let inv = store
        .create_investment(fields)
        .context("could not record investment")?;
    println!(
        "Recorded '{}' {} at {}, about {} a month ({})",
        inv.name,
        fmt_money(&inv.amount, &config.currency),
        fmt_rate(&inv.rate),
        fmt_money(&inv.monthly_return, &config.currency),
        inv.id
    );
    Ok(())
}

pub fn summary_report(source: &dyn RecordSource) -> Result<InvestmentTotals> {
    Ok(get_aggregates(&all_investments(source)?))
}

fn summary(store: &JsonFileSource, config: &Config, sub: &ArgMatches) -> Result<()> {
    let totals = summary_report(store)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        println!(
            "{}",
            pretty_table(
                &["Invested", "Monthly return", "Average rate"],
                vec![totals_row(&totals, &config.currency)],
            )
        );
    }
    Ok(())
}
