//! Calendar-month bucketing.
//!
//! Buckets are keyed by [`MonthKey`], an explicit year/month pair that sorts
//! chronologically. The human-readable label (`"Jan 2024"`) is derived from the key
//! for presentation only and is never parsed back.

use crate::errors::{Error, Result};
use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Serialize;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1-12
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Months since year 0; consecutive months differ by one.
    #[must_use]
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Sortable `YYYYMM` integer, e.g. `202401`.
    #[must_use]
    pub fn sort_key(self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.month)
    }

    /// The following month.
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Display label such as `"Jan 2024"`.
    #[must_use]
    pub fn label(self) -> String {
        let index = usize::try_from(self.month.saturating_sub(1)).unwrap_or(0);
        format!("{} {}", MONTH_ABBREVIATIONS[index.min(11)], self.year)
    }
}

/// A trailing reporting window: the `months` calendar months before the month of
/// `end`, plus that month itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
    months: u32,
}

impl ReportWindow {
    /// Window ending on `end` and reaching back `months` whole months. The start is
    /// the first day of the earliest month.
    pub fn new(end: NaiveDate, months: u32) -> Result<Self> {
        let start = end
            .with_day(1)
            .and_then(|first| first.checked_sub_months(Months::new(months)))
            .ok_or_else(|| {
                Error::validation("months", format!("{months} months before {end} is out of range"))
            })?;

        Ok(Self { start, end, months })
    }

    /// Window ending today (UTC).
    pub fn trailing(months: u32) -> Result<Self> {
        Self::new(Utc::now().date_naive(), months)
    }

    /// First day covered (inclusive)
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day covered (inclusive)
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of whole months reached back
    #[must_use]
    pub const fn months(&self) -> u32 {
        self.months
    }

    /// Whether `date` lies inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every month in the window, oldest first. Always `months + 1` entries.
    #[must_use]
    pub fn month_keys(&self) -> Vec<MonthKey> {
        let last = MonthKey::of(self.end);
        let mut keys = Vec::with_capacity(self.months as usize + 1);
        let mut current = MonthKey::of(self.start);
        while current <= last {
            keys.push(current);
            current = current.next();
        }
        keys
    }
}

/// One month of aggregated metrics, ready for a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket<M> {
    /// Sortable `YYYYMM` key
    pub key: i64,
    /// Display label, e.g. `"Feb 2024"`
    pub label: String,
    /// The month's metrics
    #[serde(flatten)]
    pub metrics: M,
}

/// Month-indexed accumulator pre-seeded with `M::default()` for every month of a
/// window, so quiet months still appear. Only dates inside the window are counted.
#[derive(Debug, Clone)]
pub struct MonthlyBuckets<M> {
    window: ReportWindow,
    keys: Vec<MonthKey>,
    slots: Vec<M>,
}

impl<M: Default> MonthlyBuckets<M> {
    /// Seeds one empty bucket per month of `window`.
    #[must_use]
    pub fn new(window: &ReportWindow) -> Self {
        let keys = window.month_keys();
        let slots = keys.iter().map(|_| M::default()).collect();
        Self {
            window: *window,
            keys,
            slots,
        }
    }
}

impl<M> MonthlyBuckets<M> {
    fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.window.contains(date) {
            return None;
        }
        let first = self.keys.first()?;
        let offset = MonthKey::of(date).ordinal() - first.ordinal();
        usize::try_from(offset).ok().filter(|i| *i < self.slots.len())
    }

    /// Mutable access to the bucket holding `date`, if it is in range.
    pub fn bucket_mut(&mut self, date: NaiveDate) -> Option<&mut M> {
        let index = self.index_of(date)?;
        self.slots.get_mut(index)
    }

    /// Applies `update` to the bucket for `date`. Returns false when `date` falls
    /// outside the window.
    pub fn add<F: FnOnce(&mut M)>(&mut self, date: NaiveDate, update: F) -> bool {
        self.bucket_mut(date).map(update).is_some()
    }

    /// Number of buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the window produced no buckets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Buckets in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, &M)> {
        self.keys.iter().copied().zip(self.slots.iter())
    }

    /// Mutable iteration in chronological order, used for running totals.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (MonthKey, &mut M)> {
        self.keys.iter().copied().zip(self.slots.iter_mut())
    }

    /// Consumes the accumulator into labelled buckets, oldest first.
    #[must_use]
    pub fn into_series(self) -> Vec<Bucket<M>> {
        self.keys
            .into_iter()
            .zip(self.slots)
            .map(|(key, metrics)| Bucket {
                key: key.sort_key(),
                label: key.label(),
                metrics,
            })
            .collect()
    }
}

/// Sum and row count for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// Sum of amounts
    pub total: f64,
    /// Number of rows
    pub count: usize,
}

/// Buckets `(date, amount)` rows into monthly totals for `window`.
pub fn sum_by_month<I>(window: &ReportWindow, rows: I) -> Vec<Bucket<MonthlyTotal>>
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    let mut buckets = MonthlyBuckets::<MonthlyTotal>::new(window);
    for (date, amount) in rows {
        buckets.add(date, |slot| {
            slot.total += amount;
            slot.count += 1;
        });
    }

    let mut series = buckets.into_series();
    for bucket in &mut series {
        bucket.metrics.total = super::round2(bucket.metrics.total);
    }
    series
}
