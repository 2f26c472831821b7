//! Fuzz target for the explorer reducer.
//!
//! Any sequence of edits over any dataset yields a structured result.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use chartsense::{process_data, row, ChartConfig, ChartType, Chartsense, ExplorerUpdate, Value};

#[derive(Debug, Arbitrary)]
enum Edit {
    X(u8),
    Y(u8),
    Chart(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    cells: Vec<(Option<f64>, String)>,
    edits: Vec<Edit>,
}

fuzz_target!(|input: Input| {
    let rows: Vec<_> = input
        .cells
        .into_iter()
        .take(100)
        .map(|(n, s)| row([("n", Value::from(n)), ("s", Value::from(s))]))
        .collect();
    let Some(analysis) = process_data(&rows) else {
        return;
    };

    let keys = ["n", "s", "missing"];
    let engine = Chartsense::new();
    let mut config = ChartConfig::new(ChartType::Bar, "s", "n");

    for edit in input.edits.into_iter().take(32) {
        let update = match edit {
            Edit::X(i) => ExplorerUpdate::XAxis(keys[i as usize % keys.len()].to_string()),
            Edit::Y(i) => ExplorerUpdate::YAxis(keys[i as usize % keys.len()].to_string()),
            Edit::Chart(i) => ExplorerUpdate::ChartType(ChartType::ALL[i as usize % ChartType::ALL.len()]),
        };
        let transition = engine.explore(&analysis, &config, update);
        if transition.validation.valid {
            let _ = engine.chart_data(&analysis, &transition.config);
        }
        config = transition.config;
    }
});
