//! CLI for parsync.

mod commands;

use anyhow::Result;
use clap::Parser;
use parsync_core::config::{self, ParsyncConfig};
use parsync_core::ssh::SshOptions;
use std::ffi::OsString;
use std::path::PathBuf;

use commands::{run_probe, run_transfer};

/// Copy a large file tree as fixed-size chunks run concurrently through GNU parallel and rsync.
#[derive(Debug, Parser)]
#[command(name = "parsync")]
#[command(about = "parsync: chunked, resumable parallel rsync", long_about = None)]
pub struct Cli {
    /// Source: a local directory or [user@]host:path.
    #[arg(required_unless_present = "resume")]
    pub source: Option<String>,

    /// Destination: a local directory or [user@]host:path.
    #[arg(required_unless_present_any = ["resume", "test_ssh"])]
    pub destination: Option<String>,

    /// Maximum parallel transfers (default: available CPUs, capped at max_jobs from config).
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    pub jobs: Option<usize>,

    /// Identity file handed to ssh.
    #[arg(short = 'i', long = "identity", value_name = "PATH")]
    pub identity: Option<PathBuf>,

    /// Files per chunk (default 1000, or chunk_size from config).
    #[arg(short = 'c', long = "chunk-size", value_name = "N", allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    /// Resume an existing session directory; skips listing, chunking and compiling.
    #[arg(long, value_name = "SESSION")]
    pub resume: Option<PathBuf>,

    /// Run rsync through sudo.
    #[arg(long)]
    pub sudo: bool,

    /// Trial run: rsync changes nothing.
    #[arg(long)]
    pub dry: bool,

    /// List files with `lfs find` instead of `find`.
    #[arg(long)]
    pub lfs: bool,

    /// Ask ssh for the legacy arcfour cipher.
    #[arg(long)]
    pub arcfour: bool,

    /// Base directory for new sessions (default: system temp dir).
    #[arg(long, value_name = "DIR")]
    pub tmp: Option<PathBuf>,

    /// Only list files whose name matches this glob.
    #[arg(long, default_value = "*", value_name = "GLOB")]
    pub filter: String,

    /// Only check ssh connectivity to the remote side, then exit. Also `-ts`.
    #[arg(long = "test-ssh")]
    pub test_ssh: bool,

    /// Do not ask the runner for a progress bar.
    #[arg(long = "no-bar")]
    pub no_bar: bool,
}

/// Rewrites the historical `-ts` spelling to `--test-ssh`. Arguments after `--` are left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
        } else if arg == "-ts" {
            out.push(OsString::from("--test-ssh"));
        } else {
            out.push(arg);
        }
    }
    out
}

impl Cli {
    /// Parses the process arguments, loads config and runs. Returns the process exit code.
    pub fn run_from_args() -> Result<i32> {
        let cli = Cli::parse_from(normalize_args(std::env::args_os()));
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        cli.dispatch(&cfg)
    }

    pub fn dispatch(&self, cfg: &ParsyncConfig) -> Result<i32> {
        if self.test_ssh {
            run_probe(self, cfg)
        } else {
            run_transfer(self, cfg)
        }
    }

    /// ssh options shared by listing, transfer and probe.
    pub fn ssh_options(&self, cfg: &ParsyncConfig) -> SshOptions {
        SshOptions {
            identity_file: self.identity.clone(),
            cipher: self.arcfour.then(|| cfg.legacy_cipher.clone()),
        }
    }
}

#[cfg(test)]
mod tests;
