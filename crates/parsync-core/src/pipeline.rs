//! Fresh and resumed runs.
//!
//! A fresh run walks `FRESH → ENUMERATED → CHUNKED → COMPILED` and then
//! executes. A resumed run opens the session and executes its `jobs` as they
//! are, whatever happened to the source tree since.

use std::path::Path;
use std::process::ExitStatus;

use crate::chunker::{self, ChunkSize};
use crate::config::ProgramConfig;
use crate::driver::ExecutionDriver;
use crate::enumerate::{FileSource, ListingTool};
use crate::error::{ParsyncError, Result};
use crate::job::{self, TransferOptions};
use crate::locator::Locator;
use crate::runlog::{self, RunLogSummary};
use crate::session::{Session, SessionManifest, SessionState, MANIFEST_VERSION};

/// Everything a fresh run needs to build its session.
#[derive(Debug, Clone)]
pub struct FreshPlan {
    pub source: Locator,
    pub destination: Locator,
    pub filter: String,
    pub tool: ListingTool,
    pub chunk_size: ChunkSize,
    pub options: TransferOptions,
}

impl FreshPlan {
    /// Rejects locator combinations rsync cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.source.is_remote() && self.destination.is_remote() {
            return Err(ParsyncError::config(
                "source and destination cannot both be remote",
            ));
        }
        if self.filter.is_empty() {
            return Err(ParsyncError::config("filter must not be empty"));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub session: Session,
    pub state: SessionState,
    pub status: ExitStatus,
    pub summary: Option<RunLogSummary>,
}

/// Builds a new session under `base` and compiles its job list.
pub fn prepare_fresh(
    base: &Path,
    plan: &FreshPlan,
    source: &dyn FileSource,
    programs: &ProgramConfig,
) -> Result<Session> {
    plan.validate()?;
    let session = Session::create(base)?;

    let list = source.list()?;
    session.write_file_list(&list)?;
    tracing::debug!(state = ?SessionState::Enumerated, files = list.len());

    let chunks = chunker::partition(&list, plan.chunk_size);
    session.write_chunks(&chunks)?;
    tracing::debug!(state = ?SessionState::Chunked, chunks = chunks.len());

    let jobs = job::compile(
        &chunks,
        &plan.source,
        &plan.destination,
        &plan.options,
        &session,
    );
    session.write_jobs(&jobs, programs)?;
    session.write_manifest(&SessionManifest {
        version: MANIFEST_VERSION,
        source: plan.source.to_string(),
        destination: plan.destination.to_string(),
        filter: plan.filter.clone(),
        lfs: plan.tool == ListingTool::Lfs,
        chunk_size: plan.chunk_size.get(),
        files: list.len(),
        chunks: chunks.len(),
        dry_run: plan.options.dry_run,
    })?;
    tracing::info!(
        session = %session.root().display(),
        files = list.len(),
        jobs = jobs.len(),
        "compiled session"
    );
    Ok(session)
}

/// Opens an existing session for execution without touching its artifacts.
pub fn prepare_resume(path: &Path) -> Result<Session> {
    let session = Session::open(path)?;
    match session.read_manifest() {
        Ok(Some(m)) => tracing::info!(
            source = %m.source,
            destination = %m.destination,
            chunks = m.chunks,
            "resuming session"
        ),
        Ok(None) => tracing::info!("resuming session without manifest"),
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable session manifest"),
    }
    tracing::debug!(state = ?session.detect_state(), "session state on disk");
    Ok(session)
}

/// Runs a prepared session through `driver` and summarizes the run log.
///
/// `driver` is located before the session is prepared, so a missing runner
/// fails before any session directory exists.
pub fn execute(session: Session, resume: bool, driver: &ExecutionDriver) -> Result<RunOutcome> {
    tracing::debug!(state = ?SessionState::Executing);
    let status = driver.run(&session, resume)?;
    let state = if status.success() {
        SessionState::Done
    } else {
        SessionState::Failed
    };

    let summary = match runlog::read_summary(&session.run_log_path()) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!(error = %e, "could not read run log");
            None
        }
    };
    if let Some(s) = &summary {
        tracing::info!(
            recorded = s.recorded,
            succeeded = s.succeeded,
            failed = s.failed.len(),
            "run log summary"
        );
    }

    Ok(RunOutcome {
        session,
        state,
        status,
        summary,
    })
}
