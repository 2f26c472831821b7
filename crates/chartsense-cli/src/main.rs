//! Chartsense CLI - chart recommendations for tabular data.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            json,
            output,
            day_first,
            sample_size,
        } => commands::analyze::run(file, json, output, day_first, sample_size, cli.verbose),

        Commands::Recommend { file, json, limit } => {
            commands::recommend::run(file, json, limit, cli.verbose)
        }

        Commands::Validate { file, chart, x, y } => {
            commands::validate::run(file, chart, x, y, cli.verbose)
        }

        Commands::Aggregate {
            file,
            group,
            metric,
            method,
            limit,
            json,
        } => commands::aggregate::run(file, group, metric, method, limit, json),

        Commands::Serve {
            file,
            port,
            day_first,
        } => commands::serve::run(file, port, day_first),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
