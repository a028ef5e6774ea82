//! Category aggregation: totals and shares per category.

use super::round2;
use serde::Serialize;
use std::collections::HashMap;

/// Name used for rows without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Upper-cases the first letter and turns underscores into spaces:
/// `"building_fund"` becomes `"Building fund"`.
#[must_use]
pub fn format_category_name(raw: &str) -> String {
    let spaced = raw.trim().replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// One category's slice of a total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    /// Formatted category name
    pub name: String,
    /// Summed amount, or the row count for count aggregations
    pub value: f64,
    /// Number of rows in the category
    pub count: usize,
    /// Share of the grand total in percent, two decimals
    pub percent: f64,
}

#[derive(Default)]
struct Accumulator {
    value: f64,
    count: usize,
}

/// Hundredths of a percent in a whole.
const BASIS_POINTS: i64 = 10_000;

/// Percentages of `values` in their sum, two decimals, adding up to exactly 100.
/// Each share is floored to a hundredth and the leftover hundredths go to the
/// largest remainders (earlier index wins ties). All zeros when the sum is zero.
#[allow(clippy::cast_precision_loss)]
fn apportion_percentages(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return vec![0.0; values.len()];
    }

    let exact: Vec<f64> = values
        .iter()
        .map(|value| value / total * BASIS_POINTS as f64)
        .collect();
    // 0 <= value / total <= 1, so every floor fits in [0, BASIS_POINTS]
    #[allow(clippy::cast_possible_truncation)]
    let mut points: Vec<i64> = exact.iter().map(|e| e.floor() as i64).collect();

    let leftover = BASIS_POINTS - points.iter().sum::<i64>();
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let rem_a = exact[a] - exact[a].floor();
        let rem_b = exact[b] - exact[b].floor();
        rem_b.total_cmp(&rem_a).then(a.cmp(&b))
    });
    for &index in order.iter().take(usize::try_from(leftover).unwrap_or(0)) {
        points[index] += 1;
    }

    points.into_iter().map(|p| p as f64 / 100.0).collect()
}

fn aggregate<I, S, N>(rows: I, default_name: &str, naming: N) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = (Option<S>, f64)>,
    S: AsRef<str>,
    N: Fn(&str) -> String,
{
    let mut totals: HashMap<String, Accumulator> = HashMap::new();

    for (category, amount) in rows {
        let name = category
            .as_ref()
            .map(|raw| naming(raw.as_ref()))
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| default_name.to_string());

        let slot = totals.entry(name).or_default();
        slot.value += amount;
        slot.count += 1;
    }

    let mut entries: Vec<(String, Accumulator)> = totals.into_iter().collect();
    entries.sort_by(|(name_a, a), (name_b, b)| {
        b.value.total_cmp(&a.value).then_with(|| name_a.cmp(name_b))
    });

    let raw_values: Vec<f64> = entries.iter().map(|(_, slot)| slot.value).collect();
    let percents = apportion_percentages(&raw_values);

    entries
        .into_iter()
        .zip(percents)
        .map(|((name, slot), percent)| CategoryShare {
            name,
            value: round2(slot.value),
            count: slot.count,
            percent,
        })
        .collect()
}

/// Sums `(category, amount)` rows per category, largest first. Raw category
/// values are passed through [`format_category_name`].
pub fn aggregate_sums<I, S>(rows: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = (Option<S>, f64)>,
    S: AsRef<str>,
{
    aggregate(rows, UNCATEGORIZED, format_category_name)
}

/// Like [`aggregate_sums`] for labels that are already display names, such as
/// resolved category names or raw unknown ids. Labels are kept verbatim.
pub fn aggregate_labelled_sums<I, S>(rows: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = (Option<S>, f64)>,
    S: AsRef<str>,
{
    aggregate(rows, UNCATEGORIZED, str::to_string)
}

/// Counts rows per category, most frequent first.
pub fn aggregate_counts<I, S>(categories: I) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    aggregate_counts_or(categories, UNCATEGORIZED)
}

/// Like [`aggregate_counts`] with a custom name for missing values.
pub fn aggregate_counts_or<I, S>(categories: I, default_name: &str) -> Vec<CategoryShare>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    aggregate(
        categories.into_iter().map(|category| (category, 1.0)),
        default_name,
        format_category_name,
    )
}

/// Name of the largest category, or `"None"` when there are none.
#[must_use]
pub fn largest_category(shares: &[CategoryShare]) -> String {
    shares
        .first()
        .map_or_else(|| "None".to_string(), |share| share.name.clone())
}
