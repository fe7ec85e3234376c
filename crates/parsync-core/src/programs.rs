//! PATH lookup for the external programs parsync delegates to.

use std::path::PathBuf;

use crate::error::{ParsyncError, Result};

/// Resolves `program` on PATH (or as given, when it contains a path separator).
pub fn require(program: &str) -> Result<PathBuf> {
    match which::which(program) {
        Ok(path) => {
            tracing::debug!(program, path = %path.display(), "found program");
            Ok(path)
        }
        Err(e) => {
            tracing::debug!(program, error = %e, "program lookup failed");
            Err(ParsyncError::RunnerNotFound {
                program: program.to_string(),
            })
        }
    }
}
