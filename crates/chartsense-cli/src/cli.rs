//! CLI argument definitions using clap.

use chartsense::{AggregationMethod, ChartType};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chartsense: chart recommendations for tabular data
#[derive(Parser)]
#[command(name = "chartsense")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Infer column types and statistics and recommend charts
    Analyze {
        /// Path to the data file (CSV/TSV/PSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read ambiguous numeric dates as day/month/year
        #[arg(long)]
        day_first: bool,

        /// Rows sampled for type inference
        #[arg(long)]
        sample_size: Option<usize>,
    },

    /// List recommended charts
    Recommend {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of recommendations
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check whether a chart type suits two columns
    Validate {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Chart type (bar, line, pie, doughnut, scatter, bubble)
        #[arg(short, long)]
        chart: ChartType,

        /// X-axis column key
        #[arg(short, long)]
        x: String,

        /// Y-axis column key
        #[arg(short, long)]
        y: String,
    },

    /// Group rows by one column and aggregate another
    Aggregate {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to group by
        #[arg(short, long)]
        group: String,

        /// Column to aggregate
        #[arg(short, long)]
        metric: String,

        /// Aggregation method (mean, sum, count, median)
        #[arg(long, default_value = "sum")]
        method: AggregationMethod,

        /// Keep only the top N groups
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the analysis over HTTP for interactive exploration
    Serve {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// Read ambiguous numeric dates as day/month/year
        #[arg(long)]
        day_first: bool,
    },
}
