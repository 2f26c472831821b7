//! Group-by aggregation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::inference::median_in_place;
use crate::input::{Row, Value};
use crate::schema::AggregationMethod;

/// One aggregated group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    /// First-seen value of the group key.
    pub group: Value,
    /// Aggregated metric.
    pub value: f64,
    /// Rows that contributed to the group.
    pub size: usize,
}

#[derive(Debug)]
struct GroupAccumulator {
    group: Value,
    numbers: Vec<f64>,
    size: usize,
}

/// Group rows by `group_key` and reduce `metric_key` with `method`.
///
/// Rows where either cell is null are skipped. `count` counts the remaining
/// rows; `sum`, `mean` and `median` use the numeric metrics only, and a
/// group without any numeric metric is dropped for those methods. Buckets
/// come back sorted by value, largest first (ties keep first-seen order),
/// truncated to `limit` when it is positive.
pub fn aggregate_groups(
    rows: &[Row],
    group_key: &str,
    metric_key: &str,
    method: AggregationMethod,
    limit: Option<usize>,
) -> Vec<AggregateBucket> {
    let mut groups: IndexMap<String, GroupAccumulator> = IndexMap::new();

    for row in rows {
        let (Some(group), Some(metric)) = (row.get(group_key), row.get(metric_key)) else {
            continue;
        };
        if group.is_null() || metric.is_null() {
            continue;
        }

        let acc = groups
            .entry(group.to_string())
            .or_insert_with(|| GroupAccumulator {
                group: group.clone(),
                numbers: Vec::new(),
                size: 0,
            });
        acc.size += 1;
        if let Some(n) = metric.as_f64() {
            acc.numbers.push(n);
        }
    }

    let mut buckets: Vec<AggregateBucket> = groups
        .into_values()
        .filter_map(|mut acc| {
            let value = reduce(&mut acc.numbers, acc.size, method)?;
            Some(AggregateBucket {
                group: acc.group,
                value,
                size: acc.size,
            })
        })
        .collect();

    buckets.sort_by(|a, b| b.value.total_cmp(&a.value));

    if let Some(limit) = limit.filter(|&l| l > 0) {
        buckets.truncate(limit);
    }

    buckets
}

fn reduce(numbers: &mut [f64], size: usize, method: AggregationMethod) -> Option<f64> {
    match method {
        AggregationMethod::Count => Some(size as f64),
        _ if numbers.is_empty() => None,
        AggregationMethod::Sum => Some(numbers.iter().sum()),
        AggregationMethod::Mean => Some(numbers.iter().sum::<f64>() / numbers.len() as f64),
        AggregationMethod::Median => median_in_place(numbers),
    }
}

/// Group-by aggregation returning `{group_key: group, metric_key: value}` rows.
///
/// When both keys are the same column the row holds only the aggregate.
pub fn aggregate_data(
    rows: &[Row],
    group_key: &str,
    metric_key: &str,
    method: AggregationMethod,
    limit: Option<usize>,
) -> Vec<Row> {
    aggregate_groups(rows, group_key, metric_key, method, limit)
        .into_iter()
        .map(|bucket| {
            let mut row = Row::new();
            row.insert(group_key.to_string(), bucket.group);
            row.insert(metric_key.to_string(), Value::Number(bucket.value));
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::row;

    fn sales() -> Vec<Row> {
        vec![
            row([("region", Value::from("A")), ("sales", Value::from(10.0))]),
            row([("region", Value::from("B")), ("sales", Value::from(20.0))]),
            row([("region", Value::from("A")), ("sales", Value::from(30.0))]),
        ]
    }

    #[test]
    fn test_sum_sorted_descending() {
        let result = aggregate_data(&sales(), "region", "sales", AggregationMethod::Sum, None);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0]["region"], Value::from("A"));
        assert_eq!(result[0]["sales"], Value::Number(40.0));
        assert_eq!(result[1]["region"], Value::from("B"));
        assert_eq!(result[1]["sales"], Value::Number(20.0));
    }

    #[test]
    fn test_methods() {
        let rows = sales();
        let value = |m| aggregate_groups(&rows, "region", "sales", m, None);

        let mean = value(AggregationMethod::Mean);
        assert_eq!((mean[0].group.to_string(), mean[0].value), ("A".to_string(), 20.0));

        let count = value(AggregationMethod::Count);
        assert_eq!(count[0].value, 2.0);
        assert_eq!(count[1].value, 1.0);

        let median = value(AggregationMethod::Median);
        assert_eq!(median[0].value, 20.0);
    }

    #[test]
    fn test_skips_null_keys_and_metrics() {
        let mut rows = sales();
        rows.push(row([("region", Value::Null), ("sales", Value::from(99.0))]));
        rows.push(row([("region", Value::from("C")), ("sales", Value::Null)]));
        rows.push(row([("sales", Value::from(5.0))]));

        let result = aggregate_groups(&rows, "region", "sales", AggregationMethod::Sum, None);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_limit() {
        let rows: Vec<Row> = (0..10)
            .map(|i| row([("g", Value::from(format!("g{}", i))), ("m", Value::from(i))]))
            .collect();
        let result = aggregate_groups(&rows, "g", "m", AggregationMethod::Sum, Some(3));
        assert_eq!(result.len(), 3);
        assert_eq!(result[0].value, 9.0);

        let unlimited = aggregate_groups(&rows, "g", "m", AggregationMethod::Sum, Some(0));
        assert_eq!(unlimited.len(), 10);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = vec![
            row([("g", Value::from("x")), ("m", Value::from(1.0))]),
            row([("g", Value::from("y")), ("m", Value::from(1.0))]),
        ];
        let result = aggregate_groups(&rows, "g", "m", AggregationMethod::Sum, None);
        assert_eq!(result[0].group, Value::from("x"));
    }

    #[test]
    fn test_numeric_and_string_group_keys_merge() {
        let rows = vec![
            row([("g", Value::from(1.0)), ("m", Value::from(2.0))]),
            row([("g", Value::from("1")), ("m", Value::from(3.0))]),
        ];
        let result = aggregate_groups(&rows, "g", "m", AggregationMethod::Sum, None);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].value, 5.0);
    }
}
