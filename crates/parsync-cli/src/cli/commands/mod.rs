//! CLI command handlers.

mod probe;
mod transfer;

pub use probe::run_probe;
pub use transfer::run_transfer;

#[cfg(test)]
pub(crate) use probe::probe_host;
#[cfg(test)]
pub(crate) use transfer::{fresh_plan, job_count};
