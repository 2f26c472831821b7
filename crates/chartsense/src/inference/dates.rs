//! Pluggable date parsing.
//!
//! Date detection is heuristic: any string with a `-`, `/` or `.` that one
//! of the configured formats accepts is a date. Numeric day/month order is
//! a policy of the parser, not something inferred from the data, so
//! `01/02/2024` is January 2nd under [`FormatDateParser::month_first`] and
//! February 1st under [`FormatDateParser::day_first`].

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Strategy for turning raw strings into dates.
pub trait DateParser: Send + Sync + fmt::Debug {
    /// Parse a trimmed string, returning `None` if it is not a date.
    fn parse(&self, raw: &str) -> Option<NaiveDateTime>;
}

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

const MONTH_FIRST_DATETIME_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"];

const MONTH_FIRST_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y", "%m/%d/%y", "%m-%d-%y",
];

const DAY_FIRST_DATETIME_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"];

const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%d-%m-%y",
];

const NAMED_MONTH_FORMATS: &[&str] = &[
    "%d-%b-%Y", "%b-%d-%Y", "%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y",
];

/// Date parser driven by an ordered list of `chrono` format strings.
#[derive(Debug, Clone)]
pub struct FormatDateParser {
    datetime_formats: Vec<String>,
    date_formats: Vec<String>,
}

impl FormatDateParser {
    /// ISO forms first, then numeric month/day/year forms.
    pub fn month_first() -> Self {
        Self::from_parts(MONTH_FIRST_DATETIME_FORMATS, MONTH_FIRST_DATE_FORMATS)
    }

    /// ISO forms first, then numeric day/month/year forms.
    pub fn day_first() -> Self {
        Self::from_parts(DAY_FIRST_DATETIME_FORMATS, DAY_FIRST_DATE_FORMATS)
    }

    /// A parser trying RFC 3339 and then exactly the given formats, in order.
    pub fn with_formats(
        datetime_formats: impl IntoIterator<Item = impl Into<String>>,
        date_formats: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            datetime_formats: datetime_formats.into_iter().map(Into::into).collect(),
            date_formats: date_formats.into_iter().map(Into::into).collect(),
        }
    }

    fn from_parts(numeric_datetime: &[&str], numeric_date: &[&str]) -> Self {
        Self::with_formats(
            ISO_DATETIME_FORMATS.iter().chain(numeric_datetime).copied(),
            ISO_DATE_FORMATS
                .iter()
                .chain(numeric_date)
                .chain(NAMED_MONTH_FORMATS)
                .copied(),
        )
    }
}

impl Default for FormatDateParser {
    fn default() -> Self {
        Self::month_first()
    }
}

impl DateParser for FormatDateParser {
    fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_utc());
        }

        for fmt in &self.datetime_formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }

        for fmt in &self.date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
                return Some(date.and_time(chrono::NaiveTime::MIN));
            }
        }

        None
    }
}
