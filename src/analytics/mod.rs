//! Reporting layer - derives dashboard views from raw rows.
//!
//! Each report runs the same pipeline from scratch: fetch the rows for a trailing
//! window, bucket them by calendar month, aggregate by category, rank the top
//! entries and compose scalar summaries. Fetch failures degrade the report (empty
//! rows plus a [`fetch::ReportIssue`]) instead of aborting it.

pub mod category;
pub mod dashboard;
pub mod events;
pub mod fetch;
pub mod financial;
pub mod growth;
pub mod period;
pub mod ranking;
pub mod session;
pub mod summary;

/// Number of entries kept by every top-N list.
pub const TOP_N: usize = 5;

/// Rounds to two decimal places.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `100 × part / whole`, rounded to two decimals; zero when `whole` is zero.
#[must_use]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 || !whole.is_finite() {
        return 0.0;
    }
    round2(100.0 * part / whole)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005_1), 1.01);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(-3.333), -3.33);
    }

    #[test]
    fn test_percent_of_zero_whole() {
        assert_eq!(percent_of(5.0, 0.0), 0.0);
        assert_eq!(percent_of(0.0, 0.0), 0.0);
        assert_eq!(percent_of(1.0, 3.0), 33.33);
    }
}
