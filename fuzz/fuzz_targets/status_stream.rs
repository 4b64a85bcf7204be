#![no_main]

use libfuzzer_sys::fuzz_target;
use solvebench::stream;

fuzz_target!(|data: &[u8]| {
    // Solver output is decoded lossily, so feed the same view here
    let output = String::from_utf8_lossy(data);
    // Must return an error for garbage, never panic
    let _ = stream::final_time(&output);
});
