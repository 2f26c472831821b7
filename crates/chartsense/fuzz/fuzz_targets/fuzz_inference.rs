//! Fuzz target for type inference and statistics.
//!
//! Arbitrary cell text goes through numeric and date detection, parsing,
//! statistics and recommendation without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use chartsense::{get_recommendations, process_data, row, Value};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    let rows: Vec<_> = content
        .split('\n')
        .take(200)
        .map(|line| {
            let mut cells = line.splitn(3, ',');
            row([
                ("a", Value::from(cells.next().unwrap_or(""))),
                ("b", Value::from(cells.next().unwrap_or(""))),
                ("c", Value::from(cells.next().unwrap_or(""))),
            ])
        })
        .collect();

    if let Some(analysis) = process_data(&rows) {
        let _ = get_recommendations(&analysis.data, &analysis.columns);
    }
});
