// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Filter state for the list views.
//!
//! Each record kind has a closed set of filter dimensions, and each dimension
//! a closed set of range keys. [`FilterState`] bundles those with the search
//! term and sort selection; every transition consumes the state and returns a
//! new one.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::engine::range::{AmountRange, DateRange, RateRange};
use crate::engine::sort::SortSpec;
use crate::engine::Record;
use crate::error::Error;
use crate::models::{Investment, Transaction, TransactionKind};

/// The range dimensions configured for one record kind.
pub trait FilterSet: Clone + Default + PartialEq + fmt::Debug {
    type Record: Record;

    /// True when `record` passes every dimension.
    fn matches(&self, record: &Self::Record, today: NaiveDate) -> bool;

    /// True when every dimension is at its `all` default.
    fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl KindFilter {
    pub fn key(&self) -> &'static str {
        match self {
            KindFilter::All => "all",
            KindFilter::Only(kind) => kind.as_str(),
        }
    }

    pub fn contains(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }
}

impl FromStr for KindFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(KindFilter::All);
        }
        Ok(KindFilter::Only(s.parse()?))
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionFilters {
    pub kind: KindFilter,
    pub amount: AmountRange,
    pub date: DateRange,
}

impl FilterSet for TransactionFilters {
    type Record = Transaction;

    fn matches(&self, record: &Transaction, today: NaiveDate) -> bool {
        self.kind.contains(record.kind)
            && self.amount.contains(record.amount)
            && self.date.contains(record.date, today)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InvestmentFilters {
    pub amount: AmountRange,
    pub rate: RateRange,
    pub date: DateRange,
}

impl FilterSet for InvestmentFilters {
    type Record = Investment;

    fn matches(&self, record: &Investment, today: NaiveDate) -> bool {
        self.amount.contains(record.amount)
            && self.rate.contains(record.rate)
            && self.date.contains(record.date, today)
    }
}

pub type SortFieldOf<F> = <<F as FilterSet>::Record as Record>::SortField;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState<F: FilterSet> {
    pub search: String,
    pub filters: F,
    pub sort: Option<SortSpec<SortFieldOf<F>>>,
    pub show_filters: bool,
}

pub type TransactionFilterState = FilterState<TransactionFilters>;
pub type InvestmentFilterState = FilterState<InvestmentFilters>;

impl<F: FilterSet> FilterState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: F) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Option<SortSpec<SortFieldOf<F>>>) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn toggle_sort(mut self, field: SortFieldOf<F>) -> Self {
        self.sort = Some(SortSpec::toggle(self.sort, field));
        self
    }

    #[must_use]
    pub fn with_filters_panel(mut self, visible: bool) -> Self {
        self.show_filters = visible;
        self
    }

    /// Drops the search term and every range selection and hides the panel.
    /// The sort selection survives.
    #[must_use]
    pub fn cleared(self) -> Self {
        Self {
            search: String::new(),
            filters: F::default(),
            sort: self.sort,
            show_filters: false,
        }
    }

    /// The search term, or `None` when searching is switched off.
    pub fn active_search(&self) -> Option<&str> {
        (!self.search.is_empty()).then_some(self.search.as_str())
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty() || !self.filters.is_default()
    }
}
