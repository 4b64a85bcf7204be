//! Descriptive statistics over a solver's sample set
//!
//! Integer fields (`min`, `max`, `mean`, `median`) are whole milliseconds;
//! `mean_f`, `stdev` and the confidence bounds keep float precision.

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// z-score for a two-sided 95% interval under the normal approximation
pub const Z_95: f64 = 1.96;

/// Summary statistics for one solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub min: u64,
    pub max: u64,
    /// `mean_f` truncated to whole milliseconds
    pub mean: u64,
    pub median: u64,
    /// `[lower, upper]` bounds of `mean_f ± 1.96 × stdev / sqrt(n)`
    pub confidence_95: [f64; 2],
    pub mean_f: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub stdev: f64,
}

impl Statistics {
    /// Summarise a sample set
    ///
    /// Needs at least two samples: the sample standard deviation is
    /// undefined for a single observation.
    pub fn from_samples(samples: &[u64]) -> Result<Self> {
        let n = samples.len();
        if n == 0 {
            return Err(BenchError::EmptySamples);
        }
        if n < 2 {
            return Err(BenchError::InsufficientSamples(n));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let min = sorted[0];
        let max = sorted[n - 1];
        let mean_f = mean(samples);
        let stdev = sample_stdev(samples, mean_f);
        let margin = Z_95 * standard_error(stdev, n);

        Ok(Self {
            min,
            max,
            mean: mean_f.trunc() as u64,
            median: median_sorted(&sorted),
            confidence_95: [mean_f - margin, mean_f + margin],
            mean_f,
            stdev,
        })
    }
}

/// Arithmetic mean, accumulated in integers to avoid float drift on the sum
fn mean(samples: &[u64]) -> f64 {
    let sum: u128 = samples.iter().map(|&s| u128::from(s)).sum();
    sum as f64 / samples.len() as f64
}

/// Median of sorted data; even lengths take the floor of the two middles' average
fn median_sorted(sorted: &[u64]) -> u64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        let (lo, hi) = (sorted[mid - 1], sorted[mid]);
        lo + (hi - lo) / 2
    }
}

fn sample_stdev(samples: &[u64], mean_f: f64) -> f64 {
    let sum_sq: f64 = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean_f;
            d * d
        })
        .sum();
    (sum_sq / (samples.len() - 1) as f64).sqrt()
}

fn standard_error(stdev: f64, n: usize) -> f64 {
    stdev / (n as f64).sqrt()
}
