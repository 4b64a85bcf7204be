//! Repeated-measurement harness
//!
//! Drives a [`Sampler`] over every configured solver, then turns the
//! collected sample sets into the raw CSV and the JSON summary. Nothing is
//! written until the whole batch and all statistics have succeeded.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::csv_output::CsvOutput;
use crate::error::BenchError;
use crate::json_output::SummaryReport;
use crate::sampler::Sampler;
use crate::stats::Statistics;

/// Samples for every solver, in configured solver order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSets {
    sets: Vec<(String, Vec<u64>)>,
}

impl SampleSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a solver's sample set
    pub fn push(&mut self, solver: impl Into<String>, samples: Vec<u64>) {
        self.sets.push((solver.into(), samples));
    }

    /// Iterate `(solver, samples)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.sets.iter().map(|(s, v)| (s.as_str(), v.as_slice()))
    }

    pub fn get(&self, solver: &str) -> Option<&[u64]> {
        self.iter().find(|(s, _)| *s == solver).map(|(_, v)| v)
    }

    /// Total number of measurements across all solvers
    pub fn total_samples(&self) -> usize {
        self.sets.iter().map(|(_, v)| v.len()).sum()
    }

    /// Check every sample set holds exactly `runs` measurements
    pub fn ensure_runs(&self, runs: usize) -> crate::error::Result<()> {
        for (solver, samples) in self.iter() {
            if samples.len() != runs {
                return Err(BenchError::SampleCountMismatch {
                    solver: solver.to_string(),
                    expected: runs,
                    actual: samples.len(),
                });
            }
        }
        Ok(())
    }
}

/// Run `sampler` `runs` times for each solver, sequentially
///
/// The first failing run aborts the batch.
pub fn collect_samples<S: Sampler + ?Sized>(
    sampler: &mut S,
    solvers: &[String],
    runs: usize,
) -> Result<SampleSets> {
    let mut sets = SampleSets::new();

    for solver in solvers {
        eprintln!("[solvebench: Testing {}]", solver);
        tracing::info!(solver = solver.as_str(), runs, "sampling solver");

        let mut samples = Vec::with_capacity(runs);
        for run in 0..runs {
            let ms = sampler
                .measure(solver)
                .with_context(|| format!("Run {} of {} failed for solver {}", run + 1, runs, solver))?;
            samples.push(ms);
        }
        sets.push(solver.clone(), samples);
    }

    Ok(sets)
}

/// Compute summary statistics for every solver
pub fn summarize(sets: &SampleSets) -> Result<SummaryReport> {
    let mut report = SummaryReport::new();
    for (solver, samples) in sets.iter() {
        let stats = Statistics::from_samples(samples)
            .with_context(|| format!("Failed to summarise samples for solver {}", solver))?;
        report.insert(solver, stats);
    }
    Ok(report)
}

/// Rendered CSV and JSON documents for one batch
#[derive(Debug, Clone)]
pub struct BatchOutputs {
    pub csv: String,
    pub json: String,
    pub report: SummaryReport,
}

/// Validate a completed batch and render both output documents in memory
pub fn render_outputs(sets: &SampleSets, runs: usize) -> Result<BatchOutputs> {
    sets.ensure_runs(runs)?;

    let csv = CsvOutput::from_sample_sets(sets).to_csv()?;
    let report = summarize(sets)?;
    let json = report.to_json()?;

    Ok(BatchOutputs { csv, json, report })
}

/// Write rendered content into a temporary file next to `path`
fn stage(path: &Path, contents: &str, what: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to write {} to {}", what, path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {} to {}", what, path.display()))?;
    Ok(file)
}

/// Write rendered outputs to their destination files
///
/// Both documents are staged before either is moved into place; on failure
/// neither destination is left holding this batch's output.
pub fn write_outputs(outputs: &BatchOutputs, csv_path: &Path, json_path: &Path) -> Result<()> {
    let csv = stage(csv_path, &outputs.csv, "raw samples")?;
    let json = stage(json_path, &outputs.json, "summary")?;

    csv.persist(csv_path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write raw samples to {}", csv_path.display()))?;
    if let Err(e) = json.persist(json_path) {
        let _ = fs::remove_file(csv_path);
        return Err(anyhow::Error::new(e.error))
            .with_context(|| format!("Failed to write summary to {}", json_path.display()));
    }

    tracing::info!(
        csv = %csv_path.display(),
        json = %json_path.display(),
        "wrote benchmark outputs"
    );
    Ok(())
}
