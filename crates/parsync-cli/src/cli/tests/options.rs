//! Tests for turning parsed arguments into run options.

use super::parse;
use crate::cli::commands::{fresh_plan, job_count, probe_host};
use crate::cli::normalize_args;
use parsync_core::config::ParsyncConfig;
use parsync_core::enumerate::ListingTool;
use parsync_core::{ErrorKind, ParsyncError};
use std::ffi::OsString;
use std::path::PathBuf;

fn config_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.downcast_ref::<ParsyncError>().map(ParsyncError::kind)
}

#[test]
fn chunk_size_falls_back_to_config() {
    let cfg = ParsyncConfig {
        chunk_size: 64,
        ..ParsyncConfig::default()
    };
    let plan = fresh_plan(&parse(&["parsync", "/a", "/b"]), &cfg).unwrap();
    assert_eq!(plan.chunk_size.get(), 64);

    let plan = fresh_plan(&parse(&["parsync", "-c", "7", "/a", "/b"]), &cfg).unwrap();
    assert_eq!(plan.chunk_size.get(), 7);
}

#[test]
fn non_positive_chunk_size_is_configuration_error() {
    let cfg = ParsyncConfig::default();
    for raw in ["0", "-3"] {
        let err = fresh_plan(&parse(&["parsync", "-c", raw, "/a", "/b"]), &cfg).unwrap_err();
        assert_eq!(config_kind(&err), Some(ErrorKind::Configuration), "chunk size {raw}");
    }
}

#[test]
fn remote_to_remote_is_configuration_error() {
    let cfg = ParsyncConfig::default();
    let err = fresh_plan(&parse(&["parsync", "a:/x", "b:/y"]), &cfg).unwrap_err();
    assert_eq!(config_kind(&err), Some(ErrorKind::Configuration));
}

#[test]
fn transfer_flags_reach_the_plan() {
    let cfg = ParsyncConfig::default();
    let cli = parse(&[
        "parsync", "--sudo", "--arcfour", "-i", "/tmp/key", "--dry", "--lfs", "/a", "h:/b",
    ]);
    let plan = fresh_plan(&cli, &cfg).unwrap();
    assert!(plan.options.sudo);
    assert!(plan.options.dry_run);
    assert_eq!(plan.options.ssh.identity_file, Some(PathBuf::from("/tmp/key")));
    assert_eq!(plan.options.ssh.cipher.as_deref(), Some("arcfour"));
    assert_eq!(plan.tool, ListingTool::Lfs);
    assert!(plan.destination.is_remote());
}

#[test]
fn cipher_name_comes_from_config() {
    let cfg = ParsyncConfig {
        legacy_cipher: "aes128-ctr".into(),
        ..ParsyncConfig::default()
    };
    let cli = parse(&["parsync", "--arcfour", "/a", "h:/b"]);
    assert_eq!(cli.ssh_options(&cfg).cipher.as_deref(), Some("aes128-ctr"));
}

#[test]
fn job_count_defaults_to_capped_parallelism() {
    let cfg = ParsyncConfig::default();
    let cli = parse(&["parsync", "/a", "/b"]);
    assert_eq!(job_count(&cli, &cfg, 32), 10);
    assert_eq!(job_count(&cli, &cfg, 3), 3);

    let cli = parse(&["parsync", "-j", "20", "/a", "/b"]);
    assert_eq!(job_count(&cli, &cfg, 3), 20);
}

#[test]
fn probe_host_prefers_first_remote() {
    assert_eq!(
        probe_host(&parse(&["parsync", "-ts", "/local", "me@host:/d"])),
        Some("me@host".to_string())
    );
    assert_eq!(
        probe_host(&parse(&["parsync", "-ts", "src-host:/a"])),
        Some("src-host".to_string())
    );
    assert_eq!(probe_host(&parse(&["parsync", "-ts", "/a", "/b"])), None);
}

#[test]
fn normalize_leaves_args_after_double_dash() {
    let args = normalize_args(["parsync", "-ts", "--", "-ts"].map(OsString::from));
    assert_eq!(args, ["parsync", "--test-ssh", "--", "-ts"].map(OsString::from));
}
