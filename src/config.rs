//! Benchmark configuration
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and command-line overrides (highest priority).
//!
//! # Example TOML
//! ```toml
//! executable = "/opt/minizinc/bin/minizinc"
//! solvers = ["HiGHS", "COIN-BC", "Gecode"]
//! runs = 100
//! model = "stage1/mpi5-model.mzn"
//! data = "stage1/mpi5-data-10.dzn"
//! csv_output = "stage1-times.csv"
//! json_output = "statistics-stage1.json"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::BenchError;
use crate::sampler::SolverInvocation;

/// Complete configuration for one benchmark batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Solver driver executable
    pub executable: PathBuf,
    /// Extra arguments placed before the solver flags
    pub executable_args: Vec<String>,
    /// Solver identifiers passed to `--solver`, benchmarked in this order
    pub solvers: Vec<String>,
    /// Measurements per solver
    pub runs: usize,
    pub model: PathBuf,
    pub data: PathBuf,
    /// Raw samples destination
    pub csv_output: PathBuf,
    /// Summary statistics destination
    pub json_output: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("minizinc"),
            executable_args: Vec::new(),
            solvers: vec!["HiGHS".to_string(), "COIN-BC".to_string()],
            runs: 250,
            model: PathBuf::from("stage1/mpi5-model.mzn"),
            data: PathBuf::from("stage1/mpi5-data-10.dzn"),
            csv_output: PathBuf::from("stage1-times.csv"),
            json_output: PathBuf::from("statistics-stage1.json"),
        }
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file; missing keys take their defaults
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Resolve the effective configuration for a command line
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_toml(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Override fields with any values given on the command line
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(executable) = &cli.executable {
            self.executable = executable.clone();
        }
        if !cli.executable_args.is_empty() {
            self.executable_args = cli.executable_args.clone();
        }
        if !cli.solvers.is_empty() {
            self.solvers = cli.solvers.clone();
        }
        if let Some(runs) = cli.runs {
            self.runs = runs;
        }
        if let Some(model) = &cli.model {
            self.model = model.clone();
        }
        if let Some(data) = &cli.data {
            self.data = data.clone();
        }
        if let Some(path) = &cli.csv_output {
            self.csv_output = path.clone();
        }
        if let Some(path) = &cli.json_output {
            self.json_output = path.clone();
        }
    }

    /// Reject configurations that cannot produce a meaningful batch
    ///
    /// `runs = 1` is accepted here; it fails later when the standard
    /// deviation is computed.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.executable.as_os_str().is_empty() {
            return Err(BenchError::Config("executable must not be empty".into()));
        }
        if self.solvers.is_empty() {
            return Err(BenchError::Config("at least one solver is required".into()));
        }
        if self.runs == 0 {
            return Err(BenchError::Config("runs must be at least 1".into()));
        }

        let mut seen = HashSet::new();
        for solver in &self.solvers {
            if solver.trim().is_empty() {
                return Err(BenchError::Config("solver names must not be blank".into()));
            }
            if !seen.insert(solver.as_str()) {
                return Err(BenchError::Config(format!("duplicate solver: {}", solver)));
            }
        }
        Ok(())
    }

    /// Launch parameters for the sampler
    pub fn invocation(&self) -> SolverInvocation {
        SolverInvocation {
            executable: self.executable.clone(),
            executable_args: self.executable_args.clone(),
            model: self.model.clone(),
            data: self.data.clone(),
        }
    }
}
