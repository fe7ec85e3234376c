pub mod config;
pub mod error;
pub mod logging;

pub mod chunker;
pub mod driver;
pub mod enumerate;
pub mod job;
pub mod locator;
pub mod pipeline;
pub mod probe;
pub mod programs;
pub mod runlog;
pub mod session;
pub mod shell;
pub mod ssh;

pub use error::{ErrorKind, ParsyncError};
