//! Execution Driver: hands the job list to GNU parallel.
//!
//! Concurrency is entirely the runner's business. The driver only picks the
//! job count, points the runner at the session's `jobs` and `parallel.log`,
//! and reports the runner's exit status back.

use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use crate::error::{ParsyncError, Result};
use crate::programs;
use crate::session::Session;

/// Default job count: available parallelism capped at `ceiling`, at least 1.
pub fn default_jobs(available: usize, ceiling: usize) -> usize {
    available.min(ceiling).max(1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionDriver {
    runner: PathBuf,
    jobs: usize,
    progress_bar: bool,
}

impl ExecutionDriver {
    /// Resolves the runner on PATH. Call before any session artifact exists.
    pub fn locate(program: &str, jobs: usize, progress_bar: bool) -> Result<Self> {
        if jobs == 0 {
            return Err(ParsyncError::config("job count must be at least 1"));
        }
        let runner = programs::require(program)?;
        Ok(Self {
            runner,
            jobs,
            progress_bar,
        })
    }

    /// Runner invocation for `session`. With `resume`, jobs the job log
    /// records as successful are skipped and failed ones run again.
    pub fn command(&self, session: &Session, resume: bool) -> Command {
        let mut cmd = Command::new(&self.runner);
        cmd.arg("-j")
            .arg(self.jobs.to_string())
            .arg("--joblog")
            .arg(session.run_log_path());
        if resume {
            cmd.arg("--resume-failed");
        }
        if self.progress_bar {
            cmd.arg("--bar");
        }
        cmd.arg("-a").arg(session.jobs_path());
        cmd
    }

    /// Runs the job list to completion and returns the runner's status.
    pub fn run(&self, session: &Session, resume: bool) -> Result<ExitStatus> {
        tracing::info!(
            runner = %self.runner.display(),
            jobs = self.jobs,
            resume,
            session = %session.root().display(),
            "starting runner"
        );
        let status = self
            .command(session, resume)
            .status()
            .map_err(|source| ParsyncError::Spawn {
                program: self.runner.display().to_string(),
                source,
            })?;
        if status.success() {
            tracing::info!(%status, "runner finished");
        } else {
            tracing::warn!(%status, "runner reported failures");
        }
        Ok(status)
    }
}
