//! Integration test: list a local tree, compile a session and run it through stand-in tools.
//!
//! The runner and rsync are small shell scripts, so the tests check that the
//! session artifacts drive execution, not what rsync would copy.
#![cfg(unix)]

mod common;

use parsync_core::chunker::{ChunkIndex, ChunkSize};
use parsync_core::config::ProgramConfig;
use parsync_core::driver::ExecutionDriver;
use parsync_core::enumerate::{CommandListing, ListingTool};
use parsync_core::job::TransferOptions;
use parsync_core::locator::Locator;
use parsync_core::pipeline::{self, FreshPlan};
use parsync_core::session::SessionState;
use parsync_core::ssh::SshOptions;
use parsync_core::ParsyncError;
use std::fs;
use tempfile::tempdir;

fn make_tree(root: &std::path::Path, n: usize) {
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    for i in 0..n {
        let sub = match i % 3 {
            0 => "",
            1 => "nested/",
            _ => "nested/deeper/",
        };
        fs::write(root.join(format!("{sub}file{i}.dat")), b"x").unwrap();
    }
    fs::write(root.join("ignored.tmp"), b"x").unwrap();
}

#[test]
fn fresh_run_executes_one_job_per_chunk() {
    let _guard = common::fake_tools::serial();
    let tools_dir = tempdir().unwrap();
    let tools = common::fake_tools::install(tools_dir.path());
    let src = tempdir().unwrap();
    let dst = tempdir().unwrap();
    let base = tempdir().unwrap();
    make_tree(src.path(), 7);

    let programs = ProgramConfig {
        rsync: tools.rsync.display().to_string(),
        ..ProgramConfig::default()
    };
    let driver = ExecutionDriver::locate(&tools.parallel.display().to_string(), 2, false).unwrap();
    let plan = FreshPlan {
        source: Locator::Local(src.path().to_path_buf()),
        destination: Locator::Local(dst.path().to_path_buf()),
        filter: "*.dat".into(),
        tool: ListingTool::Find,
        chunk_size: ChunkSize::new(3).unwrap(),
        options: TransferOptions {
            dry_run: true,
            ..TransferOptions::default()
        },
    };
    let ssh = SshOptions::default();
    let listing = CommandListing {
        source: &plan.source,
        filter: &plan.filter,
        tool: plan.tool,
        programs: &programs,
        ssh: &ssh,
        strict: true,
    };

    let session = pipeline::prepare_fresh(base.path(), &plan, &listing, &programs).unwrap();
    assert_eq!(session.read_file_list().unwrap().len(), 7);
    assert_eq!(session.read_jobs().unwrap().len(), 3);

    let outcome = pipeline::execute(session, false, &driver).unwrap();
    assert!(outcome.status.success());
    assert_eq!(outcome.state, SessionState::Done);
    let summary = outcome.summary.expect("job log written");
    assert_eq!(summary.recorded, 3);
    assert!(summary.failed.is_empty());

    let mut seen = Vec::new();
    for i in 0..3 {
        let log = fs::read_to_string(outcome.session.log_path(ChunkIndex(i))).unwrap();
        assert!(log.contains("--dry-run"), "chunk {i} log: {log}");
        assert!(log.contains(&format!("chunk{:08}", i)));
        seen.extend(log.lines().filter(|l| l.ends_with(".dat")).map(str::to_string));
    }
    seen.sort();
    let mut listed: Vec<String> = outcome
        .session
        .read_file_list()
        .unwrap()
        .entries()
        .iter()
        .map(|e| e.to_string_lossy().into_owned())
        .collect();
    listed.sort();
    assert_eq!(seen, listed);
    assert!(!seen.iter().any(|f| f.contains("ignored")));
}

#[test]
fn resume_runs_existing_jobs_verbatim() {
    let _guard = common::fake_tools::serial();
    let tools_dir = tempdir().unwrap();
    let tools = common::fake_tools::install(tools_dir.path());
    let session_dir = tempdir().unwrap();
    let dir = session_dir.path();
    let marker = dir.join("marker");
    fs::write(dir.join("files"), "a\nb\n").unwrap();
    fs::write(
        dir.join("jobs"),
        format!("echo first >> {m}\necho second >> {m}\n", m = marker.display()),
    )
    .unwrap();

    let driver = ExecutionDriver::locate(&tools.parallel.display().to_string(), 1, false).unwrap();
    let session = pipeline::prepare_resume(dir).unwrap();
    let outcome = pipeline::execute(session, true, &driver).unwrap();

    assert!(outcome.status.success());
    assert_eq!(fs::read_to_string(&marker).unwrap(), "first\nsecond\n");
    assert_eq!(fs::read_to_string(dir.join("files")).unwrap(), "a\nb\n");
    assert!(!dir.join("chunk00000000").exists());
}

#[test]
fn failed_chunk_is_reported_not_retried() {
    let _guard = common::fake_tools::serial();
    let tools_dir = tempdir().unwrap();
    let tools = common::fake_tools::install(tools_dir.path());
    let session_dir = tempdir().unwrap();
    let dir = session_dir.path();
    fs::write(dir.join("files"), "a\nb\nc\n").unwrap();
    fs::write(dir.join("jobs"), "true\nexit 3\ntrue\n").unwrap();

    let driver = ExecutionDriver::locate(&tools.parallel.display().to_string(), 3, false).unwrap();
    let session = pipeline::prepare_resume(dir).unwrap();
    let outcome = pipeline::execute(session, false, &driver).unwrap();

    assert!(!outcome.status.success());
    assert_eq!(outcome.status.code(), Some(1));
    assert_eq!(outcome.state, SessionState::Failed);
    let summary = outcome.summary.unwrap();
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, vec![ChunkIndex(1)]);
}

#[test]
fn missing_resume_session_is_fatal_and_creates_nothing() {
    let base = tempdir().unwrap();
    let err = pipeline::prepare_resume(&base.path().join("no-such-session")).unwrap_err();
    assert!(matches!(err, ParsyncError::SessionNotFound { .. }));
    assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
}
