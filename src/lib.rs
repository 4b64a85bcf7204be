//! solvebench - repeated-measurement benchmark harness for MiniZinc solvers
//!
//! Runs a solver driver many times on a fixed model/data pair, reads the
//! solve time each run reports on its JSON status stream, and summarises the
//! samples per solver as CSV (raw) and JSON (statistics).

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod harness;
pub mod json_output;
pub mod sampler;
pub mod stats;
pub mod stream;
