//! `parsync --test-ssh` (`-ts`): check ssh to the remote side and exit.

use anyhow::Result;
use parsync_core::config::ParsyncConfig;
use parsync_core::locator::Locator;
use parsync_core::probe;
use parsync_core::ParsyncError;

use crate::cli::Cli;

/// First remote host among source and destination.
pub(crate) fn probe_host(cli: &Cli) -> Option<String> {
    [&cli.source, &cli.destination]
        .into_iter()
        .flatten()
        .map(|raw| Locator::parse(raw))
        .find_map(|loc| loc.host().map(str::to_string))
}

pub fn run_probe(cli: &Cli, cfg: &ParsyncConfig) -> Result<i32> {
    let Some(host) = probe_host(cli) else {
        return Err(
            ParsyncError::config("--test-ssh needs a remote [user@]host:path locator").into(),
        );
    };
    let outcome = probe::test_ssh(&cfg.programs.ssh, &cli.ssh_options(cfg), &host)?;
    if outcome.reachable {
        println!("ssh to {} OK", outcome.host);
        Ok(0)
    } else {
        println!("ssh to {} FAILED (got {:?})", outcome.host, outcome.output);
        Ok(1)
    }
}
