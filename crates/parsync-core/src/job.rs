//! Job Compiler: one rsync invocation per chunk.
//!
//! Descriptors are structured values; they become shell command lines only
//! when the job list artifact is written.

use std::path::PathBuf;

use crate::chunker::{Chunk, ChunkIndex};
use crate::config::ProgramConfig;
use crate::locator::Locator;
use crate::session::Session;
use crate::shell;
use crate::ssh::SshOptions;

/// Archive mode plus hardlinks; symlinks are copied as links, never followed.
const RSYNC_MODE: &str = "-aH";

/// Options applied to every job of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferOptions {
    /// Prefix the transfer with the privilege-escalation wrapper.
    pub sudo: bool,
    pub ssh: SshOptions,
    /// Ask rsync for a trial run that changes nothing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    pub index: ChunkIndex,
    pub source: Locator,
    pub destination: Locator,
    pub chunk_path: PathBuf,
    pub log_path: PathBuf,
    pub options: TransferOptions,
}

impl JobDescriptor {
    pub fn argv(&self, programs: &ProgramConfig) -> Vec<String> {
        let mut argv = Vec::with_capacity(10);
        if self.options.sudo {
            argv.push(programs.sudo.clone());
        }
        argv.push(programs.rsync.clone());
        argv.push(RSYNC_MODE.to_string());
        argv.push(format!("--files-from={}", self.chunk_path.display()));
        argv.push(format!("--log-file={}", self.log_path.display()));
        if self.options.dry_run {
            argv.push("--dry-run".to_string());
        }
        if !self.options.ssh.is_empty() {
            argv.push("-e".to_string());
            argv.push(self.options.ssh.remote_shell(&programs.ssh));
        }
        argv.push(self.source.to_string());
        argv.push(self.destination.to_string());
        argv
    }

    /// Single line for the job list, executable by `sh -c`.
    pub fn command_line(&self, programs: &ProgramConfig) -> String {
        shell::join(self.argv(programs))
    }
}

/// Builds one descriptor per chunk, in chunk order.
pub fn compile(
    chunks: &[Chunk<'_>],
    source: &Locator,
    destination: &Locator,
    options: &TransferOptions,
    session: &Session,
) -> Vec<JobDescriptor> {
    chunks
        .iter()
        .map(|chunk| JobDescriptor {
            index: chunk.index,
            source: source.clone(),
            destination: destination.clone(),
            chunk_path: session.chunk_path(chunk.index),
            log_path: session.log_path(chunk.index),
            options: options.clone(),
        })
        .collect()
}
