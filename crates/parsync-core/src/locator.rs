//! Source and destination locators.
//!
//! A locator containing `:` is remote (`host-spec:path`, where `host-spec` may
//! be `user@host`); anything else is a local path. A local path that contains
//! a colon is therefore classified as remote. This mirrors rsync's own operand
//! rules and is a known limitation rather than something to guess around.

use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Local(PathBuf),
    Remote { host: String, path: String },
}

impl Locator {
    /// Classifies `raw` by the first `:`.
    pub fn parse(raw: &str) -> Locator {
        match raw.split_once(':') {
            Some((host, path)) => Locator::Remote {
                host: host.to_string(),
                path: path.to_string(),
            },
            None => Locator::Local(PathBuf::from(raw)),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Locator::Remote { .. })
    }

    /// Host spec for remote locators (`user@host` or `host`).
    pub fn host(&self) -> Option<&str> {
        match self {
            Locator::Remote { host, .. } => Some(host),
            Locator::Local(_) => None,
        }
    }

    /// Path part, relative to the remote login directory for remote locators.
    pub fn path(&self) -> &Path {
        match self {
            Locator::Local(p) => p,
            Locator::Remote { path, .. } => Path::new(path),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Local(p) => write!(f, "{}", p.display()),
            Locator::Remote { host, path } => write!(f, "{}:{}", host, path),
        }
    }
}
