// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Bucketed range predicates for amounts, rates and dates.
//!
//! Numeric range keys follow `all`, `<min>+` or `<min>-<max>`; both ends of a
//! bounded range are inclusive. Date range keys are named "since" windows
//! measured back from the start of today.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Parsed form of a numeric range key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericRange {
    All,
    AtLeast(Decimal),
    Between(Decimal, Decimal),
}

impl NumericRange {
    /// Parses `key`, naming `dimension` in the error when it is malformed.
    pub fn parse(dimension: &'static str, key: &str) -> Result<Self> {
        let key = key.trim();
        if key == "all" {
            return Ok(NumericRange::All);
        }
        if let Some(min) = key.strip_suffix('+') {
            return Ok(NumericRange::AtLeast(parse_bound(dimension, key, min)?));
        }
        let (min, max) = key
            .split_once('-')
            .ok_or_else(|| Error::range_key(dimension, key))?;
        let min = parse_bound(dimension, key, min)?;
        let max = parse_bound(dimension, key, max)?;
        if min > max {
            return Err(Error::range_key(dimension, key));
        }
        Ok(NumericRange::Between(min, max))
    }

    pub fn contains(&self, value: Decimal) -> bool {
        match *self {
            NumericRange::All => true,
            NumericRange::AtLeast(min) => value >= min,
            NumericRange::Between(min, max) => min <= value && value <= max,
        }
    }
}

fn parse_bound(dimension: &'static str, key: &str, raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with(['+', '-']) {
        return Err(Error::range_key(dimension, key));
    }
    raw.parse::<Decimal>()
        .map_err(|_| Error::range_key(dimension, key))
}

/// Tests `value` against an arbitrary numeric range key.
pub fn in_range(value: Decimal, key: &str) -> Result<bool> {
    Ok(NumericRange::parse("numeric", key)?.contains(value))
}

/// Amount buckets offered by the list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AmountRange {
    #[default]
    All,
    UpTo100,
    From100To500,
    From500To1000,
    From1000To5000,
    Over5000,
}

impl AmountRange {
    pub const VARIANTS: [AmountRange; 6] = [
        AmountRange::All,
        AmountRange::UpTo100,
        AmountRange::From100To500,
        AmountRange::From500To1000,
        AmountRange::From1000To5000,
        AmountRange::Over5000,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AmountRange::All => "all",
            AmountRange::UpTo100 => "0-100",
            AmountRange::From100To500 => "100-500",
            AmountRange::From500To1000 => "500-1000",
            AmountRange::From1000To5000 => "1000-5000",
            AmountRange::Over5000 => "5000+",
        }
    }

    pub fn bounds(&self) -> NumericRange {
        match self {
            AmountRange::All => NumericRange::All,
            AmountRange::UpTo100 => NumericRange::Between(Decimal::ZERO, Decimal::ONE_HUNDRED),
            AmountRange::From100To500 => {
                NumericRange::Between(Decimal::ONE_HUNDRED, Decimal::from(500))
            }
            AmountRange::From500To1000 => {
                NumericRange::Between(Decimal::from(500), Decimal::ONE_THOUSAND)
            }
            AmountRange::From1000To5000 => {
                NumericRange::Between(Decimal::ONE_THOUSAND, Decimal::from(5000))
            }
            AmountRange::Over5000 => NumericRange::AtLeast(Decimal::from(5000)),
        }
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        self.bounds().contains(amount)
    }
}

/// Rate buckets, in percent of the reference index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RateRange {
    #[default]
    All,
    UpTo50,
    From50To80,
    From80To100,
    Over100,
}

impl RateRange {
    pub const VARIANTS: [RateRange; 5] = [
        RateRange::All,
        RateRange::UpTo50,
        RateRange::From50To80,
        RateRange::From80To100,
        RateRange::Over100,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RateRange::All => "all",
            RateRange::UpTo50 => "0-50",
            RateRange::From50To80 => "50-80",
            RateRange::From80To100 => "80-100",
            RateRange::Over100 => "100+",
        }
    }

    pub fn bounds(&self) -> NumericRange {
        match self {
            RateRange::All => NumericRange::All,
            RateRange::UpTo50 => NumericRange::Between(Decimal::ZERO, Decimal::from(50)),
            RateRange::From50To80 => NumericRange::Between(Decimal::from(50), Decimal::from(80)),
            RateRange::From80To100 => {
                NumericRange::Between(Decimal::from(80), Decimal::ONE_HUNDRED)
            }
            RateRange::Over100 => NumericRange::AtLeast(Decimal::ONE_HUNDRED),
        }
    }

    pub fn contains(&self, rate: Decimal) -> bool {
        self.bounds().contains(rate)
    }
}

/// "Since" windows over record dates. None of them has an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateRange {
    #[default]
    All,
    Today,
    Week,
    Month,
    ThreeMonths,
    SixMonths,
}

impl DateRange {
    pub const VARIANTS: [DateRange; 6] = [
        DateRange::All,
        DateRange::Today,
        DateRange::Week,
        DateRange::Month,
        DateRange::ThreeMonths,
        DateRange::SixMonths,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DateRange::All => "all",
            DateRange::Today => "today",
            DateRange::Week => "week",
            DateRange::Month => "month",
            DateRange::ThreeMonths => "3months",
            DateRange::SixMonths => "6months",
        }
    }

    /// Days subtracted from today's midnight to get the window start.
    pub fn window_days(&self) -> Option<u64> {
        match self {
            DateRange::All => None,
            DateRange::Today => Some(0),
            DateRange::Week => Some(7),
            DateRange::Month => Some(30),
            DateRange::ThreeMonths => Some(90),
            DateRange::SixMonths => Some(180),
        }
    }

    /// First date inside the window, or `None` when every date passes.
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = self.window_days()?;
        today.checked_sub_days(Days::new(days))
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.start(today) {
            Some(start) => date >= start,
            None => true,
        }
    }
}

/// Tests `date` against a named date range key relative to `today`.
pub fn in_date_range(date: NaiveDate, key: &str, today: NaiveDate) -> Result<bool> {
    Ok(key.parse::<DateRange>()?.contains(date, today))
}

macro_rules! range_key_impls {
    ($ty:ty, $dimension:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let key = s.trim();
                <$ty>::VARIANTS
                    .into_iter()
                    .find(|v| v.key().eq_ignore_ascii_case(key))
                    .ok_or_else(|| Error::range_key($dimension, s))
            }
        }
    };
}

range_key_impls!(AmountRange, "amount");
range_key_impls!(RateRange, "rate");
range_key_impls!(DateRange, "date");
