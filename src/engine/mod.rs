// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory list engine: range and search predicates, sorting, pagination
//! and aggregates over already-fetched records. Every function here is pure.

pub mod pagination;
pub mod pipeline;
pub mod range;
pub mod record;
pub mod search;
pub mod sort;
pub mod state;
pub mod summary;
pub mod view;

pub use pagination::{Page, paginate};
pub use pipeline::{apply, apply_at};
pub use range::{AmountRange, DateRange, NumericRange, RateRange, in_date_range, in_range};
pub use record::{InvestmentSortField, TransactionSortField};
pub use sort::{SortDirection, SortSpec, SortValue};
pub use state::{
    FilterSet, FilterState, InvestmentFilterState, InvestmentFilters, KindFilter,
    TransactionFilterState, TransactionFilters,
};
pub use summary::{
    InvestmentTotals, Summarize, TransactionTotals, TypeTotal, investments_by_type,
};
pub use view::{ListView, get_aggregates, get_visible_page};

/// A record that can be listed: searched on one text field and sorted on a
/// closed set of fields.
pub trait Record {
    type SortField: Copy + PartialEq + std::fmt::Debug;

    /// The field the free-text search runs against.
    fn search_text(&self) -> &str;

    fn sort_value(&self, field: Self::SortField) -> SortValue<'_>;
}
