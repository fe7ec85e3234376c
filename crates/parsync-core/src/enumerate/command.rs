//! Listing via an external `find`-style command, locally or over ssh.

use std::path::Path;
use std::process::Command;

use crate::config::ProgramConfig;
use crate::error::{ParsyncError, Result};
use crate::locator::Locator;
use crate::shell;
use crate::ssh::SshOptions;

use super::{FileList, FileSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingTool {
    /// Generic `find`.
    #[default]
    Find,
    /// Lustre's `lfs find`.
    Lfs,
}

/// Lists `source` with the configured tool, keeping files matching `filter`.
#[derive(Debug, Clone)]
pub struct CommandListing<'a> {
    pub source: &'a Locator,
    pub filter: &'a str,
    pub tool: ListingTool,
    pub programs: &'a ProgramConfig,
    pub ssh: &'a SshOptions,
    /// Treat a non-zero exit status as fatal instead of keeping the output.
    pub strict: bool,
}

impl CommandListing<'_> {
    fn program(&self) -> &str {
        match self.tool {
            ListingTool::Find => &self.programs.find,
            ListingTool::Lfs => &self.programs.lfs,
        }
    }

    /// The listing command as it runs in the source root.
    pub fn listing_words(&self) -> Vec<String> {
        let mut words = vec![self.program().to_string()];
        if self.tool == ListingTool::Lfs {
            words.push("find".to_string());
        }
        words.extend(
            [".", "-type", "f", "-name", self.filter]
                .iter()
                .map(|s| s.to_string()),
        );
        words
    }

    /// Process to spawn: the listing itself for local sources, ssh for remote ones.
    pub fn command(&self) -> Command {
        let words = self.listing_words();
        match self.source {
            Locator::Local(root) => {
                let mut cmd = Command::new(&words[0]);
                cmd.args(&words[1..]).current_dir(root);
                cmd
            }
            Locator::Remote { host, path } => {
                let dir = if path.is_empty() { "." } else { path.as_str() };
                let remote = format!("cd {} && {}", shell::remote_dir(dir), shell::join(&words));
                let mut cmd = Command::new(&self.programs.ssh);
                cmd.args(self.ssh.args()).arg(host).arg(remote);
                cmd
            }
        }
    }

    fn spawn_program(&self) -> &str {
        if self.source.is_remote() {
            &self.programs.ssh
        } else {
            self.program()
        }
    }
}

impl FileSource for CommandListing<'_> {
    fn list(&self) -> Result<FileList> {
        let program = self.spawn_program().to_string();
        if let Locator::Local(root) = self.source {
            ensure_dir(root)?;
        }
        tracing::info!(
            source = %self.source,
            filter = self.filter,
            program = %program,
            "listing source"
        );

        let output = self
            .command()
            .output()
            .map_err(|source| ParsyncError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if self.strict {
                tracing::error!(status = %output.status, stderr = %stderr.trim(), "listing failed");
                return Err(ParsyncError::ListingFailed {
                    program,
                    status: output.status.to_string(),
                });
            }
            tracing::warn!(
                status = %output.status,
                stderr = %stderr.trim(),
                "listing exited unsuccessfully; keeping its output"
            );
        }

        let list = FileList::parse(&output.stdout);
        tracing::info!(files = list.len(), "listing complete");
        Ok(list)
    }
}

fn ensure_dir(root: &Path) -> Result<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(ParsyncError::Spawn {
            program: "listing".to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("source directory {} does not exist", root.display()),
            ),
        })
    }
}
