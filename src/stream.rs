//! Decoder for the solver's JSON stream status protocol
//!
//! With `--json-stream` the solver writes one JSON object per stdout line.
//! Intermediate records report progress; the final record carries `time`,
//! the total elapsed solve time in milliseconds.

use serde_json::Value;

use crate::error::{BenchError, Result};

/// Name of the field holding elapsed milliseconds in the final record
pub const TIME_FIELD: &str = "time";

/// Decode every line of `output` and return the final record
///
/// Each non-blank line must be valid JSON; the first malformed line aborts
/// decoding. Blank lines are skipped.
pub fn last_record(output: &str) -> Result<Value> {
    let mut last = None;

    for (idx, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: Value = serde_json::from_str(line)
            .map_err(|source| BenchError::MalformedLine {
                line: idx + 1,
                source,
            })?;
        last = Some(record);
    }

    last.ok_or(BenchError::EmptyStream)
}

/// Extract the `time` field of a status record as whole milliseconds
///
/// Float values are truncated toward zero and must fit in a `u64`.
pub fn time_ms(record: &Value) -> Result<u64> {
    let value = record
        .get(TIME_FIELD)
        .ok_or_else(|| BenchError::MissingTime {
            record: record.to_string(),
        })?;

    if let Some(ms) = value.as_u64() {
        return Ok(ms);
    }

    match value.as_f64() {
        // u64::MAX as f64 is 2^64
        Some(ms) if ms.is_finite() && ms >= 0.0 && ms < u64::MAX as f64 => Ok(ms.trunc() as u64),
        _ => Err(BenchError::InvalidTime {
            value: value.to_string(),
        }),
    }
}

/// Decode a complete solver output and return its reported solve time
pub fn final_time(output: &str) -> Result<u64> {
    let record = last_record(output)?;
    time_ms(&record)
}
