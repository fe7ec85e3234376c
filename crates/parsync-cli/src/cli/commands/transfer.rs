//! `parsync SRC DST` and `parsync --resume SESSION`: build or reopen a session and run it.

use anyhow::{Context, Result};
use parsync_core::chunker::ChunkSize;
use parsync_core::config::ParsyncConfig;
use parsync_core::driver::{self, ExecutionDriver};
use parsync_core::enumerate::{CommandListing, ListingTool};
use parsync_core::job::TransferOptions;
use parsync_core::locator::Locator;
use parsync_core::pipeline::{self, FreshPlan};
use parsync_core::ParsyncError;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Validated options for a fresh run. Filesystem and network are untouched.
pub(crate) fn fresh_plan(cli: &Cli, cfg: &ParsyncConfig) -> Result<FreshPlan> {
    let (Some(source), Some(destination)) = (&cli.source, &cli.destination) else {
        return Err(ParsyncError::config("source and destination are required").into());
    };
    let plan = FreshPlan {
        source: Locator::parse(source),
        destination: Locator::parse(destination),
        filter: cli.filter.clone(),
        tool: if cli.lfs {
            ListingTool::Lfs
        } else {
            ListingTool::Find
        },
        chunk_size: ChunkSize::new(cli.chunk_size.unwrap_or(cfg.chunk_size))?,
        options: TransferOptions {
            sudo: cli.sudo,
            ssh: cli.ssh_options(cfg),
            dry_run: cli.dry,
        },
    };
    plan.validate()?;
    Ok(plan)
}

pub(crate) fn job_count(cli: &Cli, cfg: &ParsyncConfig, available: usize) -> usize {
    cli.jobs
        .unwrap_or_else(|| driver::default_jobs(available, cfg.max_jobs))
}

fn session_base(cli: &Cli, cfg: &ParsyncConfig) -> PathBuf {
    cli.tmp.clone().unwrap_or_else(|| cfg.session_base())
}

enum Mode<'a> {
    Fresh(FreshPlan),
    Resume(&'a Path),
}

pub fn run_transfer(cli: &Cli, cfg: &ParsyncConfig) -> Result<i32> {
    let mode = match &cli.resume {
        Some(path) => {
            if cli.source.is_some() || cli.destination.is_some() {
                tracing::warn!(
                    "source/destination ignored with --resume; the session's jobs are used as-is"
                );
            }
            Mode::Resume(path)
        }
        None => Mode::Fresh(fresh_plan(cli, cfg)?),
    };

    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let jobs = job_count(cli, cfg, available);
    let progress_bar = cfg.progress_bar && !cli.no_bar;
    let driver = ExecutionDriver::locate(&cfg.programs.parallel, jobs, progress_bar)?;

    let (session, resume) = match &mode {
        Mode::Resume(path) => (pipeline::prepare_resume(path)?, true),
        Mode::Fresh(plan) => {
            let listing = CommandListing {
                source: &plan.source,
                filter: &plan.filter,
                tool: plan.tool,
                programs: &cfg.programs,
                ssh: &plan.options.ssh,
                strict: cfg.strict_listing,
            };
            let base = session_base(cli, cfg);
            let session = pipeline::prepare_fresh(&base, plan, &listing, &cfg.programs)
                .with_context(|| format!("prepare session under {}", base.display()))?;
            (session, false)
        }
    };

    println!("Session: {}", session.root().display());
    println!("Resume with: parsync --resume {}", session.root().display());

    let outcome = pipeline::execute(session, resume, &driver)?;
    if let Some(summary) = &outcome.summary {
        println!(
            "{} job(s) recorded, {} succeeded, {} failed",
            summary.recorded,
            summary.succeeded,
            summary.failed.len()
        );
        for chunk in &summary.failed {
            println!(
                "  failed: chunk{chunk} (see {})",
                outcome.session.log_path(*chunk).display()
            );
        }
    }
    tracing::info!(state = ?outcome.state, status = %outcome.status, "run finished");
    Ok(outcome.status.code().unwrap_or(1))
}
