//! Fuzz target for the data parser.
//!
//! The CSV/TSV/JSON parser must never panic on malformed input, whatever
//! the delimiter mix.

#![no_main]

use libfuzzer_sys::fuzz_target;
use chartsense::input::Parser;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let _ = parser.parse_bytes(data);
    let _ = parser.parse_json(data);

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            let _ = parser.parse_file(temp_file.path());
        }
    }
});
