//! Top-N ranking of aggregated entities (donors, events).

use super::round2;
use serde::Serialize;
use std::collections::HashMap;

/// A ranked name/value pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    /// Entity label
    pub name: String,
    /// Metric the entry is ranked by
    pub value: f64,
}

/// Sorts entries by value descending, breaking ties by name, and keeps the first `n`.
pub fn top_n<I, K>(entries: I, n: usize) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let mut ranked: Vec<RankedEntry> = entries
        .into_iter()
        .map(|(name, value)| RankedEntry {
            name: name.into(),
            value,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.truncate(n);
    ranked
}

/// Sums values per name, then ranks the totals with [`top_n`].
pub fn rank_totals<I, K>(rows: I, n: usize) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let mut totals: HashMap<String, f64> = HashMap::new();
    for (name, value) in rows {
        *totals.entry(name.into()).or_insert(0.0) += value;
    }
    top_n(
        totals.into_iter().map(|(name, total)| (name, round2(total))),
        n,
    )
}
