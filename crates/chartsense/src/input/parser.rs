//! CSV/TSV/JSON ingestion with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{ChartsenseError, Result};
use super::source::{content_hash, Dataset, SourceMetadata};
use super::value::{Row, Value};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Binary formats that are recognized but not read.
const BINARY_EXTENSIONS: &[&str] = &["xlsx", "xls", "parquet", "arrow", "feather"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Convert cells that parse as numbers into `Value::Number`.
    pub dynamic_typing: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
            dynamic_typing: true,
        }
    }
}

/// Reads tabular files into row records.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the rows and source metadata.
    ///
    /// Files ending in `.json` are read as an array of objects; everything
    /// else is treated as delimited text.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| ChartsenseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| ChartsenseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let hash = content_hash(&contents);

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if BINARY_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ChartsenseError::UnsupportedFormat(format!(
                "{} files are not supported; export to CSV or JSON",
                extension
            )));
        }
        let is_json = extension == "json";

        let (dataset, format) = if is_json {
            (self.parse_json(&contents)?, "json".to_string())
        } else {
            let delimiter = match self.config.delimiter {
                Some(d) => d,
                None => detect_delimiter(&contents)?,
            };
            let format = match delimiter {
                b'\t' => "tsv",
                b',' => "csv",
                b';' => "csv-semicolon",
                b'|' => "psv",
                _ => "delimited",
            };
            (self.parse_delimited(&contents, delimiter)?, format.to_string())
        };

        info!(
            file = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            format = %format,
            "loaded dataset"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse delimited bytes, detecting the delimiter unless configured.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Dataset> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_delimited(bytes, delimiter)
    }

    /// Parse a JSON array of flat objects.
    ///
    /// Headers come from the first object; later objects may carry extra
    /// or missing keys.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<Dataset> {
        let records: Vec<serde_json::Map<String, serde_json::Value>> =
            serde_json::from_slice(bytes)?;

        let headers: Vec<String> = records
            .first()
            .map(|first| first.keys().cloned().collect())
            .ok_or_else(|| ChartsenseError::EmptyData("No records found".to_string()))?;

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let rows: Vec<Row> = records
            .into_iter()
            .take(limit)
            .map(|record| {
                record
                    .into_iter()
                    .map(|(k, v)| {
                        let value = match Value::from(v) {
                            Value::String(s) => self.convert_cell(&s),
                            other => other,
                        };
                        (k, value)
                    })
                    .collect()
            })
            .collect();

        Ok(Dataset::new(headers, rows))
    }

    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers = unique_headers(reader.headers()?.iter());
        if headers.is_empty() {
            return Err(ChartsenseError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();
        let mut ragged = 0usize;

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            if record.len() != expected_cols {
                ragged += 1;
            }

            // Short records are padded with nulls, long ones truncated.
            let row: Row = headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = record
                        .get(i)
                        .map(|cell| self.convert_cell(cell))
                        .unwrap_or(Value::Null);
                    (header.clone(), value)
                })
                .collect();

            rows.push(row);
        }

        if ragged > 0 {
            warn!(ragged, expected_cols, "records with unexpected field count were padded or truncated");
        }

        if rows.is_empty() {
            return Err(ChartsenseError::EmptyData("No data rows found".to_string()));
        }

        let delim = (delimiter as char).escape_default().to_string();
        debug!(rows = rows.len(), delimiter = %delim, "parsed delimited data");
        Ok(Dataset::new(headers, rows))
    }

    /// Convert a raw text cell into a value.
    fn convert_cell(&self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        if self.config.dynamic_typing {
            if let Ok(n) = cell.trim().parse::<f64>() {
                if n.is_finite() {
                    return Value::Number(n);
                }
            }
        }
        Value::String(cell.to_string())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a byte-order mark and suffix repeated header names.
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for (i, name) in raw.enumerate() {
        let mut name = name.trim_start_matches('\u{feff}').trim().to_string();
        if name.is_empty() {
            name = format!("column_{}", i + 1);
        }
        let base = name.clone();
        let mut suffix = 2;
        while headers.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        headers.push(name);
    }
    headers
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ChartsenseError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tabs get a small bonus.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
