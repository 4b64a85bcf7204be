//! CLI argument parsing for solvebench

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "solvebench")]
#[command(version)]
#[command(
    about = "Repeatedly time MiniZinc solvers and summarise their solve times",
    long_about = None
)]
pub struct Cli {
    /// TOML configuration file (command-line flags take precedence)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Solver to benchmark; repeat to benchmark several (replaces the configured list)
    #[arg(short = 's', long = "solver", value_name = "NAME")]
    pub solvers: Vec<String>,

    /// Number of runs per solver (at least 2 for a standard deviation)
    #[arg(short = 'n', long = "runs", value_name = "N")]
    pub runs: Option<usize>,

    /// Path to the MiniZinc driver executable
    #[arg(long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Argument placed before the solver flags; repeat for several (replaces the configured list)
    #[arg(long = "executable-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub executable_args: Vec<String>,

    /// Model file passed to the solver
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Data file passed to the solver
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Destination for raw samples (CSV)
    #[arg(long = "csv-output", value_name = "FILE")]
    pub csv_output: Option<PathBuf>,

    /// Destination for summary statistics (JSON)
    #[arg(long = "json-output", value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_empty() {
        let cli = Cli::parse_from(["solvebench"]);
        assert!(cli.config.is_none());
        assert!(cli.solvers.is_empty());
        assert!(cli.runs.is_none());
        assert!(cli.executable_args.is_empty());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_repeated_solver_flag() {
        let cli = Cli::parse_from(["solvebench", "-s", "HiGHS", "--solver", "COIN-BC"]);
        assert_eq!(cli.solvers, ["HiGHS", "COIN-BC"]);
    }

    #[test]
    fn test_cli_runs_short_flag() {
        let cli = Cli::parse_from(["solvebench", "-n", "20"]);
        assert_eq!(cli.runs, Some(20));
    }

    #[test]
    fn test_cli_rejects_non_numeric_runs() {
        assert!(Cli::try_parse_from(["solvebench", "--runs", "many"]).is_err());
    }

    #[test]
    fn test_cli_repeated_executable_arg() {
        let cli = Cli::parse_from([
            "solvebench",
            "--executable-arg",
            "wrapper.sh",
            "--executable-arg",
            "--no-optimize",
        ]);
        assert_eq!(cli.executable_args, ["wrapper.sh", "--no-optimize"]);
    }

    #[test]
    fn test_cli_paths() {
        let cli = Cli::parse_from([
            "solvebench",
            "--config",
            "bench.toml",
            "--executable",
            "/usr/bin/minizinc",
            "--model",
            "m.mzn",
            "--data",
            "d.dzn",
            "--csv-output",
            "t.csv",
            "--debug",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("bench.toml")));
        assert_eq!(cli.executable, Some(PathBuf::from("/usr/bin/minizinc")));
        assert_eq!(cli.model, Some(PathBuf::from("m.mzn")));
        assert_eq!(cli.data, Some(PathBuf::from("d.dzn")));
        assert_eq!(cli.csv_output, Some(PathBuf::from("t.csv")));
        assert!(cli.json_output.is_none());
        assert!(cli.debug);
    }
}
