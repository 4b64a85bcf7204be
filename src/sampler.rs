//! Single-run solver measurement
//!
//! A [`ProcessSampler`] launches the solver once per call, drains its stdout
//! on a dedicated thread, and reads the solve time from the final JSON
//! stream record.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;

use crate::error::{BenchError, Result};
use crate::stream;

/// Flag enabling line-delimited JSON status output
pub const JSON_STREAM_FLAG: &str = "--json-stream";
/// Flag making the solver report elapsed time
pub const OUTPUT_TIME_FLAG: &str = "--output-time";
/// Flag selecting the solver backend
pub const SOLVER_FLAG: &str = "--solver";

/// Source of solve-time measurements for a solver backend
pub trait Sampler {
    /// Run the solver once and return its reported solve time in milliseconds
    fn measure(&mut self, solver: &str) -> Result<u64>;
}

/// How to launch the solver executable
#[derive(Debug, Clone)]
pub struct SolverInvocation {
    pub executable: PathBuf,
    /// Arguments placed before the fixed flags (e.g. for a wrapper script)
    pub executable_args: Vec<String>,
    pub model: PathBuf,
    pub data: PathBuf,
}

impl SolverInvocation {
    /// Build the command line for one run of `solver`
    pub fn command(&self, solver: &str) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.executable_args)
            .arg(JSON_STREAM_FLAG)
            .arg(OUTPUT_TIME_FLAG)
            .arg(SOLVER_FLAG)
            .arg(solver)
            .arg(&self.model)
            .arg(&self.data);
        cmd
    }
}

/// Sampler backed by a real solver subprocess
#[derive(Debug, Clone)]
pub struct ProcessSampler {
    invocation: SolverInvocation,
}

impl ProcessSampler {
    pub fn new(invocation: SolverInvocation) -> Self {
        Self { invocation }
    }

    /// Spawn the solver and return everything it wrote to stdout
    ///
    /// The drain thread is always joined before the child is reaped. On any
    /// early return the guard kills and reaps the child.
    fn run_to_completion(&self, solver: &str) -> Result<(String, ExitStatus)> {
        let mut cmd = self.invocation.command(solver);
        cmd.stdout(Stdio::piped());
        tracing::debug!(?cmd, "spawning solver");

        let child = cmd.spawn().map_err(|source| BenchError::Spawn {
            executable: self.invocation.executable.clone(),
            source,
        })?;
        let mut guard = ChildGuard::new(child);

        let stdout = guard
            .child_mut()
            .stdout
            .take()
            .ok_or(BenchError::StdoutUnavailable)?;
        let buffer = drain(stdout)?;
        let status = guard.wait()?;

        Ok((String::from_utf8_lossy(&buffer).into_owned(), status))
    }
}

impl Sampler for ProcessSampler {
    fn measure(&mut self, solver: &str) -> Result<u64> {
        let (output, status) = self.run_to_completion(solver)?;
        if !status.success() {
            tracing::warn!(solver, %status, "solver exited unsuccessfully");
        }

        let ms = stream::final_time(&output)?;
        tracing::debug!(solver, time_ms = ms, "measured run");
        Ok(ms)
    }
}

/// Read `stdout` to end-of-stream on a worker thread and wait for it
///
/// The pipe must be consumed while the child runs or a full pipe buffer
/// blocks the child forever.
fn drain(mut stdout: ChildStdout) -> Result<Vec<u8>> {
    let handle = thread::spawn(move || {
        let mut buffer = Vec::new();
        stdout.read_to_end(&mut buffer).map(|_| buffer)
    });

    handle
        .join()
        .map_err(|_| BenchError::DrainPanicked)?
        .map_err(BenchError::Drain)
}

/// Owns a child process and reaps it on every exit path
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn child_mut(&mut self) -> &mut Child {
        &mut self.child
    }

    fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait().map_err(BenchError::Wait)?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            // Already-exited children make kill() fail; wait() still reaps them
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
