// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::engine::Record;
use crate::error::Error;

/// A record field value as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(Decimal),
    Date(NaiveDate),
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(Error::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortSpec<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header-click behaviour: the active field flips direction, a new field
    /// starts ascending.
    pub fn toggle(current: Option<Self>, field: F) -> Self {
        match current {
            Some(spec) if spec.field == field => Self::new(field, spec.direction.flipped()),
            _ => Self::new(field, SortDirection::Asc),
        }
    }
}

/// Orders two field values. Pairs of different kinds, and anything involving
/// `Missing`, compare equal so the stable sort leaves them where they were.
pub fn compare_values(a: SortValue<'_>, b: SortValue<'_>, direction: SortDirection) -> Ordering {
    let ord = match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => compare_text(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => a.cmp(&b),
        (SortValue::Date(a), SortValue::Date(b)) => a.cmp(&b),
        _ => return Ordering::Equal,
    };
    direction.apply(ord)
}

/// Compares `a` and `b` on `field`.
pub fn compare<R: Record>(a: &R, b: &R, field: R::SortField, direction: SortDirection) -> Ordering {
    compare_values(a.sort_value(field), b.sort_value(field), direction)
}

/// Sorts a copy of `records`; ties keep their input order.
pub fn sorted<R: Record + Clone>(records: &[R], spec: SortSpec<R::SortField>) -> Vec<R> {
    let mut out = records.to_vec();
    out.sort_by(|a, b| compare(a, b, spec.field, spec.direction));
    out
}

// Collation in three levels: base letters ignoring accents and case, then
// accents ignoring case, then code point so the order stays total.
fn compare_text(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_ignores_case_before_code_point() {
        assert_eq!(
            compare_values(SortValue::Text("apple"), SortValue::Text("Banana"), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(
                SortValue::Text("apple"),
                SortValue::Text("Banana"),
                SortDirection::Desc
            ),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(SortValue::Text("Rent"), SortValue::Text("rent"), SortDirection::Asc),
            Ordering::Less
        );
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        let text = |s| SortValue::Text(s);
        assert_eq!(
            compare_values(text("Água Previdência"), text("Bitcoin"), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(text("Ótica"), text("Poupança"), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(text("Acoes"), text("Ações"), SortDirection::Asc),
            Ordering::Less
        );
        assert_eq!(
            compare_values(text("ações"), text("Ações"), SortDirection::Asc),
            Ordering::Greater
        );
    }

    #[test]
    fn numbers_compare_numerically() {
        let nine = SortValue::Number(Decimal::from(9));
        let ten = SortValue::Number(Decimal::from(10));
        assert_eq!(compare_values(nine, ten, SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_values(nine, ten, SortDirection::Desc), Ordering::Greater);
    }

    #[test]
    fn mixed_or_missing_values_are_equal() {
        let n = SortValue::Number(Decimal::ONE);
        assert_eq!(
            compare_values(SortValue::Text("1"), n, SortDirection::Asc),
            Ordering::Equal
        );
        assert_eq!(compare_values(SortValue::Missing, n, SortDirection::Desc), Ordering::Equal);
        assert_eq!(
            compare_values(SortValue::Missing, SortValue::Missing, SortDirection::Asc),
            Ordering::Equal
        );
    }

    #[test]
    fn toggle_flips_active_field_and_resets_new_one() {
        let first = SortSpec::toggle(None, "amount");
        assert_eq!(first, SortSpec::new("amount", SortDirection::Asc));
        let second = SortSpec::toggle(Some(first), "amount");
        assert_eq!(second.direction, SortDirection::Desc);
        let third = SortSpec::toggle(Some(second), "name");
        assert_eq!(third, SortSpec::new("name", SortDirection::Asc));
    }

    #[test]
    fn direction_parses() {
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }
}
