//! Error types for solver sampling and statistics

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while sampling a solver or summarising its samples
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to spawn solver executable {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Solver process has no captured stdout")]
    StdoutUnavailable,

    #[error("Failed to drain solver stdout: {0}")]
    Drain(#[source] std::io::Error),

    #[error("Stdout drain thread panicked")]
    DrainPanicked,

    #[error("Failed to wait for solver process: {0}")]
    Wait(#[source] std::io::Error),

    #[error("Malformed status record on line {line}: {source}")]
    MalformedLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Solver emitted no status records")]
    EmptyStream,

    #[error("Final status record has no `time` field: {record}")]
    MissingTime { record: String },

    #[error("Final status record has an invalid `time` value: {value}")]
    InvalidTime { value: String },

    #[error("Cannot summarise an empty sample set")]
    EmptySamples,

    #[error("Need at least 2 samples for a standard deviation, got {0}")]
    InsufficientSamples(usize),

    #[error("Solver {solver} has {actual} samples, expected {expected}")]
    SampleCountMismatch {
        solver: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to render output: {0}")]
    Output(String),
}

/// Result type for sampling and statistics operations
pub type Result<T> = std::result::Result<T, BenchError>;
