//! End-to-end batches through the solvebench binary with a stub solver
#![cfg(unix)]
#![allow(deprecated)] // assert_cmd::Command::cargo_bin

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stub emitting 10, 20, 30, ... across calls (counter kept next to the script)
const COUNTING_STUB: &str = r#"
dir=$(dirname "$0")
n=$(cat "$dir/counter" 2>/dev/null || echo 0)
n=$((n+1))
echo $n > "$dir/counter"
echo '{"type":"status","status":"OPTIMAL_SOLUTION"}'
echo "{\"type\":\"time\",\"time\":$((n*10))}"
"#;

/// Stub reporting a fixed time per solver
const PER_SOLVER_STUB: &str = r#"
echo '{"status":"start"}'
case "$4" in
  HiGHS) echo '{"time":100}' ;;
  *) echo '{"time":7}' ;;
esac
"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(script: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stub.sh"), script).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_config(&self, solvers: &[&str], runs: usize) -> PathBuf {
        let quoted: Vec<String> = solvers.iter().map(|s| format!("\"{}\"", s)).collect();
        let config = format!(
            "executable = \"sh\"\n\
             executable_args = [\"{stub}\"]\n\
             solvers = [{solvers}]\n\
             runs = {runs}\n\
             csv_output = \"{csv}\"\n\
             json_output = \"{json}\"\n",
            stub = self.path("stub.sh").display(),
            solvers = quoted.join(", "),
            runs = runs,
            csv = self.path("times.csv").display(),
            json = self.path("stats.json").display(),
        );
        let path = self.path("solvebench.toml");
        fs::write(&path, config).unwrap();
        path
    }

    fn cmd(&self, config: &Path) -> Command {
        let mut cmd = Command::cargo_bin("solvebench").unwrap();
        cmd.arg("--config").arg(config);
        cmd
    }
}

#[test]
fn test_batch_writes_csv_and_json() {
    let fixture = Fixture::new(COUNTING_STUB);
    let config = fixture.write_config(&["HiGHS", "COIN-BC"], 3);

    fixture
        .cmd(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("[solvebench: Testing HiGHS]"))
        .stderr(predicate::str::contains("[solvebench: Testing COIN-BC]"))
        .stdout(predicate::str::contains("HiGHS"));

    let csv = fs::read_to_string(fixture.path("times.csv")).unwrap();
    assert_eq!(
        csv,
        "solver,time_ms\nHiGHS,10\nHiGHS,20\nHiGHS,30\nCOIN-BC,40\nCOIN-BC,50\nCOIN-BC,60\n"
    );

    let json: Value =
        serde_json::from_str(&fs::read_to_string(fixture.path("stats.json")).unwrap()).unwrap();
    let highs = &json["HiGHS"];
    assert_eq!(highs["min"], 10);
    assert_eq!(highs["max"], 30);
    assert_eq!(highs["median"], 20);
    assert_eq!(highs["mean"], 20);
    assert_eq!(json["COIN-BC"]["median"], 50);
}

#[test]
fn test_constant_solver_collapses_interval() {
    let fixture = Fixture::new(PER_SOLVER_STUB);
    let config = fixture.write_config(&["HiGHS", "Gecode"], 4);

    fixture.cmd(&config).assert().success();

    let json: Value =
        serde_json::from_str(&fs::read_to_string(fixture.path("stats.json")).unwrap()).unwrap();
    assert_eq!(json["HiGHS"]["stdev"], 0.0);
    assert_eq!(json["HiGHS"]["confidence_95"], serde_json::json!([100.0, 100.0]));
    assert_eq!(json["Gecode"]["min"], 7);
}

#[test]
fn test_single_run_fails_without_outputs() {
    let fixture = Fixture::new(PER_SOLVER_STUB);
    let config = fixture.write_config(&["HiGHS"], 1);

    fixture
        .cmd(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2 samples"));

    assert!(!fixture.path("times.csv").exists());
    assert!(!fixture.path("stats.json").exists());
}

#[test]
fn test_missing_time_aborts_batch() {
    let fixture = Fixture::new("echo '{\"status\":\"ERROR\"}'\n");
    let config = fixture.write_config(&["HiGHS"], 3);

    fixture
        .cmd(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Run 1 of 3 failed for solver HiGHS"))
        .stderr(predicate::str::contains("time"));

    assert!(!fixture.path("times.csv").exists());
}

#[test]
fn test_cli_flags_override_config() {
    let fixture = Fixture::new(PER_SOLVER_STUB);
    let config = fixture.write_config(&["HiGHS"], 3);
    let json_out = fixture.path("override.json");

    fixture
        .cmd(&config)
        .arg("--solver")
        .arg("Chuffed")
        .arg("--runs")
        .arg("2")
        .arg("--json-output")
        .arg(&json_out)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    assert!(json.get("HiGHS").is_none());
    assert_eq!(json["Chuffed"]["max"], 7);

    let csv = fs::read_to_string(fixture.path("times.csv")).unwrap();
    assert_eq!(csv, "solver,time_ms\nChuffed,7\nChuffed,7\n");
}

#[test]
fn test_missing_executable_fails() {
    let fixture = Fixture::new(PER_SOLVER_STUB);
    let config = fixture.write_config(&["HiGHS"], 2);

    fixture
        .cmd(&config)
        .arg("--executable")
        .arg("/nonexistent/minizinc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to spawn solver executable"));
}

#[test]
fn test_zero_runs_rejected() {
    let fixture = Fixture::new(PER_SOLVER_STUB);
    let config = fixture.write_config(&["HiGHS"], 2);

    fixture
        .cmd(&config)
        .arg("--runs")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("runs must be at least 1"));
}

#[test]
fn test_unwritable_summary_leaves_no_csv() {
    let fixture = Fixture::new("echo '{\"time\":5}'\n");
    let config = fixture.write_config(&["HiGHS"], 2);

    fixture
        .cmd(&config)
        .arg("--json-output")
        .arg(fixture.path("missing_dir").join("stats.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write summary"));

    assert!(!fixture.path("times.csv").exists());
}
