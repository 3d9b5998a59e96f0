// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Fixed-size pages over an already filtered and sorted record set.

use std::num::NonZeroUsize;

use serde::Serialize;

/// One page of records plus the metadata a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// Never less than 1, even for an empty set.
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get()).max(1)
}

/// Slices `records[(page-1)*page_size .. page*page_size]`. Page 0 and pages
/// past the end come back empty with the totals still filled in.
pub fn paginate<T: Clone>(records: &[T], page: usize, page_size: NonZeroUsize) -> Page<T> {
    let size = page_size.get();
    let total_items = records.len();
    let items = match page.checked_sub(1).and_then(|p| p.checked_mul(size)) {
        Some(start) if start < total_items => {
            let end = start.saturating_add(size).min(total_items);
            records[start..end].to_vec()
        }
        _ => Vec::new(),
    };
    Page {
        items,
        page,
        page_size: size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn empty_set_has_one_empty_page() {
        let page = paginate::<u32>(&[], 1, size(10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let records: Vec<u32> = (1..=23).collect();
        let page = paginate(&records, 4, size(7));
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items, vec![22, 23]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn middle_page_is_contiguous() {
        let records: Vec<u32> = (1..=23).collect();
        let page = paginate(&records, 2, size(7));
        assert_eq!(page.items, vec![8, 9, 10, 11, 12, 13, 14]);
        assert!(page.has_next());
    }

    #[test]
    fn out_of_range_pages_are_empty_not_errors() {
        let records: Vec<u32> = (1..=5).collect();
        for page_no in [0, 2, usize::MAX] {
            let page = paginate(&records, page_no, size(5));
            assert!(page.is_empty(), "page {page_no}");
            assert_eq!(page.total_items, 5);
            assert_eq!(page.total_pages, 1);
        }
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(total_pages(20, size(10)), 2);
        assert_eq!(total_pages(21, size(10)), 3);
    }
}
