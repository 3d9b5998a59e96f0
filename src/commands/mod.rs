// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod investments;
pub mod overview;
pub mod transactions;

use std::num::NonZeroUsize;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::ArgMatches;
use serde::Serialize;

use crate::config::Config;
use crate::engine::{Page, SortDirection, SortSpec};
use crate::utils::parse_date;

/// One page of a list view, plus totals over every page of the filtered set.
#[derive(Debug, Serialize)]
pub struct Listing<T, S> {
    #[serde(flatten)]
    pub page: Page<T>,
    pub totals: S,
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn required<'a>(sub: &'a ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

/// Parses an optional string argument, falling back to `T::default()`.
pub(crate) fn parsed_or_default<T>(sub: &ArgMatches, name: &str) -> Result<T>
where
    T: FromStr<Err = crate::Error> + Default,
{
    match sub.get_one::<String>(name) {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(T::default()),
    }
}

pub(crate) fn date_or(sub: &ArgMatches, today: NaiveDate) -> Result<NaiveDate> {
    match sub.get_one::<String>("date") {
        Some(raw) => Ok(parse_date(raw)?),
        None => Ok(today),
    }
}

pub(crate) fn search_arg(sub: &ArgMatches) -> String {
    sub.get_one::<String>("search").cloned().unwrap_or_default()
}

pub(crate) fn sort_arg<F>(sub: &ArgMatches) -> Result<Option<SortSpec<F>>>
where
    F: FromStr<Err = crate::Error> + Copy + PartialEq,
{
    let Some(field) = sub.get_one::<String>("sort") else {
        return Ok(None);
    };
    let direction: SortDirection = parsed_or_default(sub, "order")?;
    Ok(Some(SortSpec::new(field.parse()?, direction)))
}

pub(crate) fn page_args(sub: &ArgMatches, config: &Config) -> Result<(usize, NonZeroUsize)> {
    let page = sub.get_one::<usize>("page").copied().unwrap_or(1);
    let page_size = match sub.get_one::<usize>("page-size") {
        Some(&n) => NonZeroUsize::new(n).context("--page-size must be at least 1")?,
        None => config.page_size(),
    };
    Ok((page, page_size))
}

pub(crate) fn months_arg(sub: &ArgMatches, config: &Config) -> usize {
    sub.get_one::<usize>("months").copied().unwrap_or(config.months)
}

pub(crate) fn page_footer<T>(page: &Page<T>, noun: &str) -> String {
    if page.is_empty() && page.total_items > 0 {
        return format!(
            "Page {} is past the end ({} pages, {} {})",
            page.page, page.total_pages, page.total_items, noun
        );
    }
    format!(
        "Page {} of {} ({} {})",
        page.page, page.total_pages, page.total_items, noun
    )
}
