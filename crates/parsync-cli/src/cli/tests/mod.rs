//! CLI parse and option-resolution tests.

use super::{normalize_args, Cli};
use clap::Parser;
use std::ffi::OsString;

pub(super) fn parse(args: &[&str]) -> Cli {
    let args = normalize_args(args.iter().map(OsString::from));
    Cli::try_parse_from(args).unwrap()
}

pub(super) fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let args = normalize_args(args.iter().map(OsString::from));
    Cli::try_parse_from(args)
}

mod options;
