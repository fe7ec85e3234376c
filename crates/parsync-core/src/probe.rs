//! `--test-ssh`: one remote `echo` to check that ssh works with the given options.

use std::process::Command;

use crate::error::{ParsyncError, Result};
use crate::ssh::SshOptions;

const TOKEN: &str = "ok";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub host: String,
    pub reachable: bool,
    /// Trimmed stdout of the remote echo.
    pub output: String,
}

pub fn probe_command(ssh_program: &str, opts: &SshOptions, host: &str) -> Command {
    let mut cmd = Command::new(ssh_program);
    cmd.args(opts.args()).arg(host).arg("echo").arg(TOKEN);
    cmd
}

pub fn test_ssh(ssh_program: &str, opts: &SshOptions, host: &str) -> Result<ProbeOutcome> {
    tracing::info!(host, "probing ssh connectivity");
    let output = probe_command(ssh_program, opts, host)
        .output()
        .map_err(|source| ParsyncError::Spawn {
            program: ssh_program.to_string(),
            source,
        })?;
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let reachable = output.status.success() && stdout == TOKEN;
    if reachable {
        tracing::info!(host, "ssh probe succeeded");
    } else {
        tracing::warn!(
            host,
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "ssh probe failed"
        );
    }
    Ok(ProbeOutcome {
        host: host.to_string(),
        reachable,
        output: stdout,
    })
}
