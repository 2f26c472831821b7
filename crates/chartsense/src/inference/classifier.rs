//! Column type classification and value parsing.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::input::{Row, Value};
use crate::schema::{ColumnMetadata, ColumnType};
use super::dates::{DateParser, FormatDateParser};

/// Thresholds for column type classification.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Rows sampled from the start of the dataset for classification.
    pub sample_size: usize,
    /// Share of numeric-looking values required for `number`.
    pub numeric_ratio: f64,
    /// Share of date-looking values required for `date`.
    pub date_ratio: f64,
    /// At or below this many distinct values a column is `category`.
    pub category_max_distinct: usize,
    /// Distinct/valid ratio under which a column may still be `category`...
    pub category_distinct_ratio: f64,
    /// ...provided it has fewer than this many distinct values.
    pub category_ratio_max_distinct: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            sample_size: 500,
            numeric_ratio: 0.8,
            date_ratio: 0.8,
            category_max_distinct: 20,
            category_distinct_ratio: 0.2,
            category_ratio_max_distinct: 50,
        }
    }
}

/// Identity of a raw value for distinct counting.
///
/// The variant is part of the identity, so `10` and `"10"` are distinct.
#[derive(Debug, PartialEq, Eq, Hash)]
enum DistinctKey<'a> {
    Number(u64),
    Date(NaiveDateTime),
    Text(&'a str),
}

impl<'a> DistinctKey<'a> {
    fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(n) => Some(DistinctKey::Number(number_bits(*n))),
            Value::Date(d) => Some(DistinctKey::Date(*d)),
            Value::String(s) => Some(DistinctKey::Text(s)),
        }
    }
}

/// Bit pattern of a float with both zeros folded together.
pub(crate) fn number_bits(n: f64) -> u64 {
    if n == 0.0 { 0 } else { n.to_bits() }
}

/// Per-column tallies over the sampled values.
#[derive(Debug, Default)]
struct SampleTally {
    valid: usize,
    numeric: usize,
    dates: usize,
    distinct: usize,
}

/// Infers column types and parses raw values into typed values.
#[derive(Debug, Clone)]
pub struct TypeInferrer {
    config: InferenceConfig,
    dates: Arc<dyn DateParser>,
}

impl TypeInferrer {
    /// Create an inferrer with default thresholds and month-first dates.
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            dates: Arc::new(FormatDateParser::default()),
        }
    }

    /// Replace the date parsing strategy.
    pub fn with_date_parser(mut self, dates: Arc<dyn DateParser>) -> Self {
        self.dates = dates;
        self
    }

    /// Classify one column from the first `sample_size` rows.
    pub fn analyze_column_type(&self, rows: &[Row], key: &str) -> ColumnMetadata {
        let sample = rows
            .iter()
            .take(self.config.sample_size)
            .filter_map(|row| row.get(key));

        let tally = self.tally(sample);
        let column_type = self.classify(&tally);

        debug!(
            column = key,
            inferred = %column_type,
            valid = tally.valid,
            numeric = tally.numeric,
            dates = tally.dates,
            distinct = tally.distinct,
            "inferred column type"
        );

        ColumnMetadata::new(key, column_type)
    }

    fn tally<'a>(&self, values: impl Iterator<Item = &'a Value>) -> SampleTally {
        let mut tally = SampleTally::default();
        let mut distinct: HashSet<DistinctKey<'a>> = HashSet::new();

        for value in values {
            if value.is_empty() {
                continue;
            }
            tally.valid += 1;
            if is_numeric_like(value) {
                tally.numeric += 1;
            }
            if self.is_date_like(value) {
                tally.dates += 1;
            }
            if let Some(k) = DistinctKey::of(value) {
                distinct.insert(k);
            }
        }

        tally.distinct = distinct.len();
        tally
    }

    /// First matching rule wins: number, date, category, text.
    fn classify(&self, tally: &SampleTally) -> ColumnType {
        if tally.valid == 0 {
            return ColumnType::Text;
        }

        let valid = tally.valid as f64;
        if tally.numeric as f64 / valid > self.config.numeric_ratio {
            return ColumnType::Number;
        }
        if tally.dates as f64 / valid > self.config.date_ratio {
            return ColumnType::Date;
        }

        let distinct_ratio = tally.distinct as f64 / valid;
        if tally.distinct <= self.config.category_max_distinct
            || (distinct_ratio < self.config.category_distinct_ratio
                && tally.distinct < self.config.category_ratio_max_distinct)
        {
            return ColumnType::Category;
        }

        ColumnType::Text
    }

    /// Whether a value reads as a date: a date already, or a delimited
    /// string the date strategy accepts.
    pub fn is_date_like(&self, value: &Value) -> bool {
        match value {
            Value::Date(_) => true,
            Value::String(s) => {
                s.contains(['-', '/', '.']) && self.dates.parse(s).is_some()
            }
            _ => false,
        }
    }

    /// Parse a raw value according to its column type.
    ///
    /// Empty values become `Null` for every type; unparseable numbers and
    /// dates also become `Null`. Category and text values pass through.
    pub fn parse_value(&self, raw: &Value, column_type: ColumnType) -> Value {
        if raw.is_empty() {
            return Value::Null;
        }

        match column_type {
            ColumnType::Number => match raw {
                Value::Number(n) if n.is_finite() => Value::Number(*n),
                Value::String(s) => parse_number(s).map(Value::Number).unwrap_or(Value::Null),
                Value::Date(_) => raw
                    .timestamp_millis()
                    .map(|ms| Value::Number(ms as f64))
                    .unwrap_or(Value::Null),
                _ => Value::Null,
            },
            ColumnType::Date => match raw {
                Value::Date(d) => Value::Date(*d),
                Value::Number(n) if n.is_finite() => {
                    Value::from_timestamp_millis(*n as i64).unwrap_or(Value::Null)
                }
                Value::String(s) => self.dates.parse(s).map(Value::Date).unwrap_or(Value::Null),
                _ => Value::Null,
            },
            ColumnType::Category | ColumnType::Text => raw.clone(),
        }
    }
}

impl Default for TypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep only the characters that can appear in a plain decimal literal.
fn numeric_residue(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect()
}

/// Whether a value reads as a number: a number already, or a string whose
/// digit/`.`/`-` residue is a complete finite decimal (`"$1,200"` is, a
/// `2024-01-15` date is not).
pub fn is_numeric_like(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            let residue = numeric_residue(s);
            !residue.is_empty() && residue.parse::<f64>().is_ok_and(f64::is_finite)
        }
        _ => false,
    }
}

/// Clean a formatted number and read its leading decimal literal.
fn parse_number(s: &str) -> Option<f64> {
    let residue = numeric_residue(&s.replace(',', ""));
    parse_float_prefix(&residue)
}

/// Parse the longest `-?digits[.digits]` prefix, ignoring trailing junk.
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
