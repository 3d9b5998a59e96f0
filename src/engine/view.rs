// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::num::NonZeroUsize;

use chrono::NaiveDate;

use crate::engine::pagination::{Page, paginate};
use crate::engine::pipeline::{apply, apply_at};
use crate::engine::state::{FilterSet, FilterState, SortFieldOf};
use crate::engine::sort::SortSpec;
use crate::engine::summary::Summarize;

/// Filter, sort and search `records`, then cut out page `page`.
pub fn get_visible_page<F>(
    records: &[F::Record],
    state: &FilterState<F>,
    page: usize,
    page_size: NonZeroUsize,
) -> Page<F::Record>
where
    F: FilterSet,
    F::Record: Clone,
{
    paginate(&apply(records, state), page, page_size)
}

pub fn get_aggregates<R: Summarize>(records: &[R]) -> R::Totals {
    R::summarize(records)
}

/// The state one list view keeps between user events.
///
/// Any change to the search term, the range filters or the sort order moves
/// the view back to page 1, so a narrower result set never leaves the user
/// on a page that no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<F: FilterSet> {
    state: FilterState<F>,
    page: usize,
    page_size: NonZeroUsize,
}

impl<F: FilterSet> ListView<F> {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            state: FilterState::default(),
            page: 1,
            page_size,
        }
    }

    pub fn with_state(state: FilterState<F>, page_size: NonZeroUsize) -> Self {
        Self::first_page(state, page_size)
    }

    pub fn state(&self) -> &FilterState<F> {
        &self.state
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    fn first_page(state: FilterState<F>, page_size: NonZeroUsize) -> Self {
        Self {
            state,
            page: 1,
            page_size,
        }
    }

    #[must_use]
    pub fn set_search(self, term: impl Into<String>) -> Self {
        Self::first_page(self.state.with_search(term), self.page_size)
    }

    #[must_use]
    pub fn set_filters(self, filters: F) -> Self {
        Self::first_page(self.state.with_filters(filters), self.page_size)
    }

    #[must_use]
    pub fn set_sort(self, sort: Option<SortSpec<SortFieldOf<F>>>) -> Self {
        Self::first_page(self.state.with_sort(sort), self.page_size)
    }

    #[must_use]
    pub fn toggle_sort(self, field: SortFieldOf<F>) -> Self {
        Self::first_page(self.state.toggle_sort(field), self.page_size)
    }

    #[must_use]
    pub fn clear_filters(self) -> Self {
        Self::first_page(self.state.cleared(), self.page_size)
    }

    /// Shows or hides the filter panel; neither the filters nor the page move.
    #[must_use]
    pub fn toggle_filters_panel(mut self) -> Self {
        let visible = !self.state.show_filters;
        self.state = self.state.with_filters_panel(visible);
        self
    }

    #[must_use]
    pub fn go_to_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn visible_page(&self, records: &[F::Record]) -> Page<F::Record>
    where
        F::Record: Clone,
    {
        get_visible_page(records, &self.state, self.page, self.page_size)
    }

    /// Same as [`ListView::visible_page`] with an explicit date for the date
    /// windows.
    pub fn visible_page_at(&self, records: &[F::Record], today: NaiveDate) -> Page<F::Record>
    where
        F::Record: Clone,
    {
        paginate(&apply_at(records, &self.state, today), self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::range::AmountRange;
    use crate::engine::record::TransactionSortField;
    use crate::engine::state::TransactionFilters;
    use crate::models::{Transaction, TransactionKind};
    use rust_decimal::Decimal;

    fn records(n: i64) -> Vec<Transaction> {
        (1..=n)
            .map(|i| Transaction {
                id: i.to_string(),
                kind: if i % 2 == 0 {
                    TransactionKind::Expense
                } else {
                    TransactionKind::Income
                },
                description: format!("item {i}"),
                amount: Decimal::from(i * 50),
                date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
                category_id: None,
            })
            .collect()
    }

    fn view() -> ListView<TransactionFilters> {
        ListView::new(NonZeroUsize::new(7).unwrap()).go_to_page(3)
    }

    #[test]
    fn every_filter_change_resets_to_first_page() {
        assert_eq!(view().set_search("item").page(), 1);
        assert_eq!(
            view()
                .set_filters(TransactionFilters {
                    amount: AmountRange::Over5000,
                    ..Default::default()
                })
                .page(),
            1
        );
        assert_eq!(view().toggle_sort(TransactionSortField::Amount).page(), 1);
        assert_eq!(view().set_sort(None).page(), 1);
        assert_eq!(view().clear_filters().page(), 1);
    }

    #[test]
    fn panel_toggle_keeps_page() {
        let v = view().toggle_filters_panel();
        assert_eq!(v.page(), 3);
        assert!(v.state().show_filters);
    }

    #[test]
    fn narrowing_from_a_late_page_never_shows_an_empty_page() {
        let data = records(23);
        let today = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let v = ListView::<TransactionFilters>::new(NonZeroUsize::new(7).unwrap()).go_to_page(4);
        let page = v.visible_page_at(&data, today);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items.len(), 2);

        let narrowed = v.set_search("item 1");
        let page = narrowed.visible_page_at(&data, today);
        assert_eq!(page.page, 1);
        // "item 1" and "item 10" through "item 19"
        assert_eq!(page.total_items, 11);
        assert_eq!(page.items.len(), 7);
    }

    #[test]
    fn aggregates_dispatch_on_record_kind() {
        let totals = get_aggregates(&records(4));
        assert_eq!(totals.total_income, Decimal::from(200));
        assert_eq!(totals.total_expenses, Decimal::from(300));
        assert_eq!(totals.balance, Decimal::from(-100));
    }
}
