//! Session Store: the working directory that holds a run's resumable state.
//!
//! Layout (stable across versions):
//!
//! ```text
//! <session>/files            File List, one path per line
//! <session>/chunk00000000    chunk artifacts, --files-from input
//! <session>/log00000000      per-chunk rsync logs
//! <session>/jobs             compiled job list, one command per chunk
//! <session>/parallel.log     runner job log
//! <session>/session.toml     optional manifest
//! ```
//!
//! `files` and `jobs` are written to a `.part` sibling and renamed into place,
//! so a session interrupted mid-compile never carries a truncated job list.

mod manifest;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::chunker::{Chunk, ChunkIndex};
use crate::config::ProgramConfig;
use crate::enumerate::{lines_to_bytes, FileList};
use crate::error::{ParsyncError, Result};
use crate::job::JobDescriptor;

pub use manifest::{SessionManifest, MANIFEST_VERSION};

pub const FILES: &str = "files";
pub const JOBS: &str = "jobs";
pub const RUN_LOG: &str = "parallel.log";
pub const MANIFEST: &str = "session.toml";
const CHUNK_PREFIX: &str = "chunk";
const LOG_PREFIX: &str = "log";

/// Lifecycle of a session. The first four are visible on disk; the rest only
/// exist while the program runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Fresh,
    Enumerated,
    Chunked,
    Compiled,
    Executing,
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    root: PathBuf,
}

impl Session {
    /// Creates a new, uniquely named session directory under `base`.
    ///
    /// The root is always absolute: job lines name chunk and log files by
    /// full path, so a resume works from any working directory.
    pub fn create(base: &Path) -> Result<Self> {
        fs::create_dir_all(base)
            .map_err(|e| ParsyncError::io(format!("create {}", base.display()), e))?;
        let base = std::path::absolute(base)
            .map_err(|e| ParsyncError::io(format!("resolve {}", base.display()), e))?;
        let root = base.join(Uuid::new_v4().to_string());
        fs::create_dir(&root)
            .map_err(|e| ParsyncError::io(format!("create session {}", root.display()), e))?;
        tracing::info!(session = %root.display(), "created session");
        Ok(Self { root })
    }

    /// Reopens an existing session; `files` and `jobs` must both be present.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(ParsyncError::SessionNotFound {
                path: path.to_path_buf(),
            });
        }
        for required in [FILES, JOBS] {
            if !path.join(required).is_file() {
                return Err(ParsyncError::SessionIncomplete {
                    path: path.to_path_buf(),
                    missing: required,
                });
            }
        }
        tracing::info!(session = %path.display(), "opened session");
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files_path(&self) -> PathBuf {
        self.root.join(FILES)
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.root.join(JOBS)
    }

    pub fn run_log_path(&self) -> PathBuf {
        self.root.join(RUN_LOG)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST)
    }

    pub fn chunk_path(&self, index: ChunkIndex) -> PathBuf {
        self.root.join(format!("{CHUNK_PREFIX}{}", index.padded()))
    }

    pub fn log_path(&self, index: ChunkIndex) -> PathBuf {
        self.root.join(format!("{LOG_PREFIX}{}", index.padded()))
    }

    /// Furthest on-disk state the artifacts show.
    pub fn detect_state(&self) -> SessionState {
        if self.jobs_path().is_file() {
            SessionState::Compiled
        } else if self.chunk_path(ChunkIndex(0)).is_file() {
            SessionState::Chunked
        } else if self.files_path().is_file() {
            SessionState::Enumerated
        } else {
            SessionState::Fresh
        }
    }

    pub fn write_file_list(&self, list: &FileList) -> Result<()> {
        write_atomic(&self.files_path(), &list.to_bytes())?;
        tracing::debug!(files = list.len(), "wrote file list");
        Ok(())
    }

    pub fn read_file_list(&self) -> Result<FileList> {
        let path = self.files_path();
        let bytes =
            fs::read(&path).map_err(|e| ParsyncError::io(format!("read {}", path.display()), e))?;
        Ok(FileList::parse(&bytes))
    }

    pub fn write_chunks(&self, chunks: &[Chunk<'_>]) -> Result<()> {
        for chunk in chunks {
            let path = self.chunk_path(chunk.index);
            fs::write(&path, lines_to_bytes(chunk.entries))
                .map_err(|e| ParsyncError::io(format!("write {}", path.display()), e))?;
        }
        tracing::debug!(chunks = chunks.len(), "wrote chunk artifacts");
        Ok(())
    }

    /// Writes the job list in descriptor order, one command line each.
    pub fn write_jobs(&self, jobs: &[JobDescriptor], programs: &ProgramConfig) -> Result<()> {
        let lines: Vec<String> = jobs.iter().map(|j| j.command_line(programs)).collect();
        write_atomic(&self.jobs_path(), &lines_to_bytes(&lines))?;
        tracing::debug!(jobs = jobs.len(), "wrote job list");
        Ok(())
    }

    pub fn read_jobs(&self) -> Result<Vec<String>> {
        let path = self.jobs_path();
        let text = fs::read_to_string(&path)
            .map_err(|e| ParsyncError::io(format!("read {}", path.display()), e))?;
        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn write_manifest(&self, manifest: &SessionManifest) -> Result<()> {
        let text = toml::to_string_pretty(manifest).map_err(|e| {
            ParsyncError::io(
                "encode session manifest",
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        write_atomic(&self.manifest_path(), text.as_bytes())
    }

    /// Reads `session.toml`; sessions from older runs may not have one.
    pub fn read_manifest(&self) -> Result<Option<SessionManifest>> {
        let path = self.manifest_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ParsyncError::io(format!("read {}", path.display()), e)),
        };
        toml::from_str(&text).map(Some).map_err(|e| {
            ParsyncError::io(
                format!("parse {}", path.display()),
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })
    }
}

fn part_path(path: &Path) -> PathBuf {
    let mut o = path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = part_path(path);
    fs::write(&tmp, contents)
        .map_err(|e| ParsyncError::io(format!("write {}", tmp.display()), e))?;
    fs::rename(&tmp, path).map_err(|e| {
        ParsyncError::io(format!("rename {} to {}", tmp.display(), path.display()), e)
    })
}
