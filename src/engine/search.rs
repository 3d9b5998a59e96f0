// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::Record;

/// Case-insensitive substring match of `term` against the record's search
/// field. Callers skip this entirely when the term is empty.
pub fn matches<R: Record>(record: &R, term: &str) -> bool {
    contains_ignore_case(record.search_text(), &term.to_lowercase())
}

/// `needle` must already be lowercased.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
