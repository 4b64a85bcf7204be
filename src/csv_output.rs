//! CSV output of raw solver measurements
//!
//! One row per measurement, grouped by solver in configured order.

use serde::Serialize;

use crate::error::{BenchError, Result};
use crate::harness::SampleSets;

/// CSV record for a single measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvSample {
    pub solver: String,
    pub time_ms: u64,
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    samples: Vec<CsvSample>,
}

impl CsvOutput {
    /// Create an empty CSV output formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten sample sets into rows, preserving solver and collection order
    pub fn from_sample_sets(sets: &SampleSets) -> Self {
        let mut output = Self::new();
        for (solver, samples) in sets.iter() {
            for &time_ms in samples {
                output.add_sample(CsvSample {
                    solver: solver.to_string(),
                    time_ms,
                });
            }
        }
        output
    }

    /// Add a measurement to the output
    pub fn add_sample(&mut self, sample: CsvSample) {
        self.samples.push(sample);
    }

    /// Generate CSV output as string
    ///
    /// The header row is written even when there are no samples.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer
            .write_record(["solver", "time_ms"])
            .map_err(|e| BenchError::Output(e.to_string()))?;
        for sample in &self.samples {
            writer
                .serialize(sample)
                .map_err(|e| BenchError::Output(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| BenchError::Output(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| BenchError::Output(e.to_string()))
    }
}
