// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finview::commands::Listing;
use finview::config::Config;
use finview::engine::InvestmentTotals;
use finview::models::Investment;
use finview::source::{Dataset, MemorySource, RecordSource};
use finview::{cli, commands::investments};
use rust_decimal::Decimal;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn inv(id: &str, name: &str, amount: i64, rate: i64, date: &str) -> Investment {
    let amount = Decimal::from(amount);
    let rate = Decimal::from(rate);
    Investment {
        id: id.into(),
        name: name.into(),
        amount,
        rate,
        monthly_return: Investment::estimated_monthly_return(amount, rate).unwrap(),
        date: day(date),
        category: Some("CDB".into()),
    }
}

fn setup() -> MemorySource {
    MemorySource::new(Dataset {
        investments: vec![
            inv("inv-1", "CDB Banco Inter", 12000, 110, "2024-12-01"),
            inv("inv-2", "Tesouro Selic", 6000, 100, "2024-11-15"),
            inv("inv-3", "LCI Itau", 3000, 90, "2024-10-20"),
            inv("inv-4", "Poupanca", 800, 70, "2024-06-01"),
        ],
        ..Dataset::default()
    })
}

fn sub_matches(args: &[&str]) -> clap::ArgMatches {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    let Some(("inv", inv_m)) = matches.subcommand() else {
        panic!("no inv subcommand");
    };
    let Some((_, sub)) = inv_m.subcommand() else {
        panic!("no inv action");
    };
    sub.clone()
}

fn list(src: &MemorySource, sub: &clap::ArgMatches) -> Listing<Investment, InvestmentTotals> {
    investments::query_page(src, &Config::default(), sub, day("2024-12-20")).unwrap()
}

fn names(items: &[Investment]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn rate_filter_is_inclusive_and_totals_follow_it() {
    let src = setup();
    let sub = sub_matches(&["finview", "inv", "list", "--rate", "80-100"]);
    let listing = list(&src, &sub);
    assert_eq!(names(&listing.page.items), ["Tesouro Selic", "LCI Itau"]);
    assert_eq!(listing.totals.total_invested, Decimal::from(9000));
    assert_eq!(listing.totals.average_rate, Decimal::from(95));
}

#[test]
fn sort_by_monthly_return_accepts_snake_case() {
    let src = setup();
    let sub = sub_matches(&[
        "finview", "inv", "list", "--sort", "monthly_return", "--order", "desc",
    ]);
    let listing = list(&src, &sub);
    assert_eq!(
        names(&listing.page.items),
        ["CDB Banco Inter", "Tesouro Selic", "LCI Itau", "Poupanca"]
    );
}

#[test]
fn name_sort_places_accented_names_with_their_base_letter() {
    let src = MemorySource::new(Dataset {
        investments: vec![
            inv("inv-1", "Poupança", 800, 70, "2024-06-01"),
            inv("inv-2", "Água Previdência", 5000, 95, "2024-07-01"),
            inv("inv-3", "Bitcoin", 2000, 0, "2024-08-01"),
            inv("inv-4", "Zeta", 1000, 100, "2024-09-01"),
        ],
        ..Dataset::default()
    });
    let sub = sub_matches(&["finview", "inv", "list", "--sort", "name"]);
    let listing = list(&src, &sub);
    assert_eq!(
        names(&listing.page.items),
        ["Água Previdência", "Bitcoin", "Poupança", "Zeta"]
    );
}

#[test]
fn three_month_window_and_search() {
    let src = setup();
    let sub = sub_matches(&[
        "finview", "inv", "list", "--date", "3months", "--search", "t",
    ]);
    let listing = list(&src, &sub);
    assert_eq!(
        names(&listing.page.items),
        ["CDB Banco Inter", "Tesouro Selic", "LCI Itau"]
    );
}

#[test]
fn add_parses_percent_rate_and_records_monthly_return() {
    let sub = sub_matches(&[
        "finview", "inv", "add", "--name", "CDB Nubank", "--amount", "24000", "--rate", "105%",
        "--date", "2024-12-02", "--category", "CDB",
    ]);
    let fields = investments::new_investment(&sub, day("2024-12-20")).unwrap();
    assert_eq!(fields.rate, Decimal::from(105));
    assert_eq!(fields.date, day("2024-12-02"));

    let mut src = MemorySource::default();
    let created = src.create_investment(fields).unwrap();
    assert_eq!(created.monthly_return, Decimal::from(2100));
    assert_eq!(created.category.as_deref(), Some("CDB"));
}

#[test]
fn add_rejects_a_non_numeric_rate() {
    let sub = sub_matches(&[
        "finview", "inv", "add", "--name", "X", "--amount", "10", "--rate", "high",
    ]);
    let err = investments::new_investment(&sub, day("2024-12-20")).unwrap_err();
    assert_eq!(err.to_string(), "rate: invalid decimal 'high'");
}

#[test]
fn add_rejects_an_amount_beyond_the_limit() {
    let sub = sub_matches(&[
        "finview", "inv", "add", "--name", "Whale", "--amount",
        "79228162514264337593543950335", "--rate", "200",
    ]);
    let fields = investments::new_investment(&sub, day("2024-12-20")).unwrap();
    let err = MemorySource::default().create_investment(fields).unwrap_err();
    assert_eq!(err.to_string(), "amount: must be at most 1000000000000");
}

#[test]
fn summary_is_over_every_investment() {
    let src = setup();
    let totals = investments::summary_report(&src).unwrap();
    assert_eq!(totals.total_invested, Decimal::from(21800));
    assert_eq!(totals.average_rate, Decimal::from_str_exact("92.5").unwrap());
}
