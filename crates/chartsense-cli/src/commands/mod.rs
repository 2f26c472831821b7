//! CLI command implementations.

pub mod aggregate;
pub mod analyze;
pub mod recommend;
pub mod serve;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use chartsense::{Chartsense, ChartsenseConfig, FormatDateParser, Report};

/// Build an engine from command-line options.
pub fn engine(day_first: bool, sample_size: Option<usize>, limit: Option<usize>) -> Chartsense {
    let mut config = ChartsenseConfig::default();
    if let Some(size) = sample_size {
        config.inference.sample_size = size;
    }
    if let Some(limit) = limit {
        config.recommendation.max_results = limit;
    }

    let engine = Chartsense::with_config(config);
    if day_first {
        engine.with_date_parser(Arc::new(FormatDateParser::day_first()))
    } else {
        engine
    }
}

/// Analyze a file, checking it exists first.
pub fn load(engine: &Chartsense, file: &Path) -> Result<Report, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(engine.analyze_file(file)?)
}
