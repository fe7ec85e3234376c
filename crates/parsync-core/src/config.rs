use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Names (or absolute paths) of the external programs parsync drives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    pub rsync: String,
    pub ssh: String,
    pub sudo: String,
    /// Bounded-concurrency job runner (GNU parallel).
    pub parallel: String,
    pub find: String,
    /// Lustre-aware listing tool used with `--lfs`.
    pub lfs: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            rsync: "rsync".to_string(),
            ssh: "ssh".to_string(),
            sudo: "sudo".to_string(),
            parallel: "parallel".to_string(),
            find: "find".to_string(),
            lfs: "lfs".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/parsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsyncConfig {
    /// Files per chunk when `-c` is not given.
    pub chunk_size: i64,
    /// Ceiling for the default job count; the default is min(available parallelism, max_jobs).
    pub max_jobs: usize,
    /// Base directory for new sessions (None = system temp dir).
    #[serde(default)]
    pub tmp_dir: Option<PathBuf>,
    /// Cipher requested from ssh with `--arcfour`.
    #[serde(default = "default_legacy_cipher")]
    pub legacy_cipher: String,
    /// Abort when the listing command exits non-zero instead of keeping its output.
    #[serde(default)]
    pub strict_listing: bool,
    /// Ask the runner to draw a progress bar.
    #[serde(default = "default_true")]
    pub progress_bar: bool,
    #[serde(default)]
    pub programs: ProgramConfig,
}

fn default_legacy_cipher() -> String {
    "arcfour".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ParsyncConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            max_jobs: 10,
            tmp_dir: None,
            legacy_cipher: default_legacy_cipher(),
            strict_listing: false,
            progress_bar: true,
            programs: ProgramConfig::default(),
        }
    }
}

impl ParsyncConfig {
    /// Base directory new sessions are created under.
    pub fn session_base(&self) -> PathBuf {
        self.tmp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("parsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ParsyncConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ParsyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<ParsyncConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ParsyncConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
