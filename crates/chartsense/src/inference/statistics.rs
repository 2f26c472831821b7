//! Per-column descriptive statistics.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::input::Value;
use crate::schema::{
    ColumnStats, ColumnType, FrequencyEntry, FrequencyStats, NumericStats, StatsSummary,
    TemporalStats,
};
use super::classifier::number_bits;

/// Maximum entries kept in a frequency table.
pub const TOP_VALUES: usize = 10;

// =============================================================================
// RUNNING MOMENTS
// =============================================================================
// Welford's online algorithm: numerically stable variance in a single pass.

#[derive(Debug, Clone)]
struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
    sum: f64,
    min: f64,
    max: f64,
}

impl RunningMoments {
    fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Population variance (divides by n).
    fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0)
        }
    }
}

/// Median of an unsorted slice; sorts it in place.
pub(crate) fn median_in_place(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Compute statistics for one column's typed values.
///
/// Nulls, and values that do not fit the column type (non-finite or
/// non-numeric cells in a number column, non-dates in a date column), are
/// counted in `null_count`. A column with no valid values yields stats with
/// only `null_count`.
pub fn calculate_stats<'a, I>(values: I, column_type: ColumnType) -> ColumnStats
where
    I: IntoIterator<Item = &'a Value>,
{
    let values: Vec<&Value> = values.into_iter().collect();
    let total = values.len();

    let (valid, summary) = match column_type {
        ColumnType::Number => numeric_summary(&values),
        ColumnType::Date => temporal_summary(&values),
        ColumnType::Category | ColumnType::Text => frequency_summary(&values),
    };

    match summary {
        Some(summary) => ColumnStats {
            null_count: total - valid,
            summary: Some(summary),
        },
        None => ColumnStats::empty(total),
    }
}

fn numeric_summary(values: &[&Value]) -> (usize, Option<StatsSummary>) {
    let mut numbers: Vec<f64> = values.iter().filter_map(|v| v.as_f64()).collect();
    if numbers.is_empty() {
        return (0, None);
    }

    let mut moments = RunningMoments::new();
    let mut distinct = HashSet::new();
    for &n in &numbers {
        moments.add(n);
        distinct.insert(number_bits(n));
    }

    let valid = numbers.len();
    let variance = moments.variance();
    let median = median_in_place(&mut numbers).unwrap_or(moments.mean);

    let stats = NumericStats {
        min: moments.min,
        max: moments.max,
        mean: moments.sum / valid as f64,
        median,
        sum: moments.sum,
        std_dev: variance.sqrt(),
        variance,
        unique_count: distinct.len(),
    };

    (valid, Some(StatsSummary::Numeric(stats)))
}

fn temporal_summary(values: &[&Value]) -> (usize, Option<StatsSummary>) {
    let dates: Vec<_> = values.iter().filter_map(|v| v.as_date()).collect();
    let (Some(min), Some(max)) = (dates.iter().min(), dates.iter().max()) else {
        return (0, None);
    };

    let distinct: HashSet<_> = dates.iter().collect();
    let stats = TemporalStats {
        min: Value::Date(*min),
        max: Value::Date(*max),
        unique_count: distinct.len(),
    };

    (dates.len(), Some(StatsSummary::Temporal(stats)))
}

fn frequency_summary(values: &[&Value]) -> (usize, Option<StatsSummary>) {
    // Keyed by display text; insertion order records first appearance.
    let mut counts: IndexMap<String, (Value, usize)> = IndexMap::new();
    let mut valid = 0;

    for value in values.iter().filter(|v| !v.is_null()) {
        valid += 1;
        counts
            .entry(value.to_string())
            .and_modify(|(_, count)| *count += 1)
            .or_insert_with(|| ((*value).clone(), 1));
    }

    if valid == 0 {
        return (0, None);
    }

    let unique_count = counts.len();
    let mut entries: Vec<FrequencyEntry> = counts
        .into_values()
        .map(|(val, count)| FrequencyEntry { val, count })
        .collect();

    // Stable sort: equal counts keep first-seen order.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(TOP_VALUES);

    (
        valid,
        Some(StatsSummary::Frequency(FrequencyStats {
            unique_count,
            top: entries,
        })),
    )
}
