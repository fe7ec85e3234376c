//! Reads the runner's job log (`parallel.log`) to summarize a run.
//!
//! GNU parallel writes one tab-separated row per finished job:
//! `Seq Host Starttime JobRuntime Send Receive Exitval Signal Command`.
//! `Seq` is 1-based and follows line order in `jobs`, so sequence `n` is
//! chunk `n - 1`. Resumed runs append rows; the last row per sequence wins.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::chunker::ChunkIndex;
use crate::error::{ParsyncError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct JobRecord {
    pub seq: usize,
    pub runtime_secs: f64,
    pub exit_value: i32,
    pub signal: i32,
    pub command: String,
}

impl JobRecord {
    pub fn succeeded(&self) -> bool {
        self.exit_value == 0 && self.signal == 0
    }

    /// Chunk this job transferred.
    pub fn chunk(&self) -> ChunkIndex {
        ChunkIndex(self.seq.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLogSummary {
    /// Jobs with at least one row in the log.
    pub recorded: usize,
    pub succeeded: usize,
    /// Chunks whose latest row is a failure, ascending.
    pub failed: Vec<ChunkIndex>,
}

fn parse_row(line: &str) -> Option<JobRecord> {
    let mut cols = line.splitn(9, '\t');
    let seq = cols.next()?.trim().parse().ok()?;
    let _host = cols.next()?;
    let _start = cols.next()?;
    let runtime_secs = cols.next()?.trim().parse().ok()?;
    let _send = cols.next()?;
    let _receive = cols.next()?;
    let exit_value = cols.next()?.trim().parse().ok()?;
    let signal = cols.next()?.trim().parse().ok()?;
    let command = cols.next().unwrap_or("").to_string();
    Some(JobRecord {
        seq,
        runtime_secs,
        exit_value,
        signal,
        command,
    })
}

/// Parses job-log text; the header and malformed rows are skipped.
pub fn parse(text: &str) -> Vec<JobRecord> {
    text.lines().filter_map(parse_row).collect()
}

pub fn summarize(records: &[JobRecord]) -> RunLogSummary {
    let mut latest: BTreeMap<usize, &JobRecord> = BTreeMap::new();
    for record in records {
        latest.insert(record.seq, record);
    }
    let succeeded = latest.values().filter(|r| r.succeeded()).count();
    let failed = latest
        .values()
        .filter(|r| !r.succeeded())
        .map(|r| r.chunk())
        .collect();
    RunLogSummary {
        recorded: latest.len(),
        succeeded,
        failed,
    }
}

/// Summary of the job log at `path`, or None if the runner never wrote one.
pub fn read_summary(path: &Path) -> Result<Option<RunLogSummary>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(summarize(&parse(&text)))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ParsyncError::io(format!("read {}", path.display()), e)),
    }
}
