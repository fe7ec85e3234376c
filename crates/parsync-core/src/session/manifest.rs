//! Optional `session.toml` written next to the artifacts of a fresh run.

use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: u32 = 1;

/// What a fresh run was asked to do. Informational; resume never depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionManifest {
    pub version: u32,
    pub source: String,
    pub destination: String,
    pub filter: String,
    pub lfs: bool,
    pub chunk_size: usize,
    pub files: usize,
    pub chunks: usize,
    pub dry_run: bool,
}
