//! Tracing setup. Events go to `$XDG_STATE_HOME/parsync/parsync.log`; when
//! that file cannot be opened the CLI installs a stderr subscriber instead.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "parsync.log";
const DEFAULT_FILTER: &str = "info,parsync_core=debug,parsync=debug";

/// Shared append handle; each event gets its own clone of the descriptor.
struct AppendLog(File);

/// Per-event writer. A failed descriptor clone degrades to stderr for that event.
enum EventWriter {
    Log(File),
    Stderr(io::Stderr),
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            EventWriter::Log(f) => f.write(buf),
            EventWriter::Stderr(e) => e.lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            EventWriter::Log(f) => f.flush(),
            EventWriter::Stderr(e) => e.lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for AppendLog {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => EventWriter::Log(f),
            Err(_) => EventWriter::Stderr(io::stderr()),
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Opens (creating if needed) the log file inside `dir` for appending.
fn open_log(dir: &Path) -> Result<(AppendLog, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok((AppendLog(file), path))
}

/// Installs the file subscriber and returns the log path.
///
/// Errors leave no subscriber installed, so the caller can still fall back
/// to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("parsync")?;
    let dir = dirs.create_state_directory("")?;
    let (log, path) = open_log(&dir)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(BoxMakeWriter::new(log))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!(log = %path.display(), "logging initialized");
    Ok(path)
}

/// Stderr-only subscriber for when [`init_logging`] fails.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
