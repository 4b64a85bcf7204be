//! JSON summary output
//!
//! A single object keyed by solver identifier, in configured solver order.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{BenchError, Result};
use crate::stats::Statistics;

/// Per-solver statistics, serialized as one JSON object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryReport {
    entries: Vec<(String, Statistics)>,
}

impl SummaryReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the statistics for a solver; solver names are unique per batch
    pub fn insert(&mut self, solver: impl Into<String>, stats: Statistics) {
        self.entries.push((solver.into(), stats));
    }

    pub fn get(&self, solver: &str) -> Option<&Statistics> {
        self.entries
            .iter()
            .find(|(s, _)| s == solver)
            .map(|(_, stats)| stats)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Statistics)> {
        self.entries.iter().map(|(s, stats)| (s.as_str(), stats))
    }

    /// Serialize to pretty-printed JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json =
            serde_json::to_string_pretty(self).map_err(|e| BenchError::Output(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    /// Render a human-readable table of the report
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{:<16} {:>10} {:>10} {:>10} {:>10} {:>10} {:>22}\n",
            "solver", "min", "median", "mean", "max", "stdev", "95% CI"
        ));
        out.push_str(&format!("{}\n", "-".repeat(94)));
        for (solver, s) in self.iter() {
            let ci = format!("[{:.1}, {:.1}]", s.confidence_95[0], s.confidence_95[1]);
            out.push_str(&format!(
                "{:<16} {:>10} {:>10} {:>10.1} {:>10} {:>10.2} {:>22}\n",
                solver, s.min, s.median, s.mean_f, s.max, s.stdev, ci
            ));
        }
        out
    }
}

impl Serialize for SummaryReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (solver, stats) in &self.entries {
            map.serialize_entry(solver, stats)?;
        }
        map.end()
    }
}
