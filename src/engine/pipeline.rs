// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Local, NaiveDate};
use log::debug;

use crate::engine::search::contains_ignore_case;
use crate::engine::sort::sorted;
use crate::engine::state::{FilterSet, FilterState};
use crate::engine::Record;

/// Runs the filter, search and sort steps against today's local date.
pub fn apply<F>(records: &[F::Record], state: &FilterState<F>) -> Vec<F::Record>
where
    F: FilterSet,
    F::Record: Clone,
{
    apply_at(records, state, Local::now().date_naive())
}

/// Produces the visible record set: every range dimension ANDed, then the
/// search term if one is set, then a stable sort if a sort is selected.
/// The input is never modified.
pub fn apply_at<F>(
    records: &[F::Record],
    state: &FilterState<F>,
    today: NaiveDate,
) -> Vec<F::Record>
where
    F: FilterSet,
    F::Record: Clone,
{
    let needle = state.active_search().map(str::to_lowercase);
    let filtered: Vec<F::Record> = records
        .iter()
        .filter(|r| state.filters.matches(r, today))
        .filter(|r| match &needle {
            Some(needle) => contains_ignore_case(r.search_text(), needle),
            None => true,
        })
        .cloned()
        .collect();

    let out = match state.sort {
        Some(spec) => sorted(&filtered, spec),
        None => filtered,
    };
    debug!(
        "pipeline kept {} of {} records (search: {:?}, sort: {:?})",
        out.len(),
        records.len(),
        state.active_search(),
        state.sort
    );
    out
}
