//! Shell stand-ins for GNU parallel and rsync, written into a temp dir.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Runs each line of the `-a` file in order and writes a GNU-parallel style job log.
/// Exits with the number of failed jobs, like the real runner.
const FAKE_PARALLEL: &str = r#"#!/bin/sh
joblog=""
jobs=""
while [ $# -gt 0 ]; do
  case "$1" in
    --joblog) joblog="$2"; shift 2 ;;
    -a) jobs="$2"; shift 2 ;;
    -j) shift 2 ;;
    *) shift ;;
  esac
done
printf 'Seq\tHost\tStarttime\tJobRuntime\tSend\tReceive\tExitval\tSignal\tCommand\n' >> "$joblog"
seq=0
failed=0
while IFS= read -r line; do
  [ -z "$line" ] && continue
  seq=$((seq + 1))
  sh -c "$line" < /dev/null
  rc=$?
  [ "$rc" -ne 0 ] && failed=$((failed + 1))
  printf '%s\t:\t0\t0.1\t0\t0\t%s\t0\t%s\n' "$seq" "$rc" "$line" >> "$joblog"
done < "$jobs"
exit "$failed"
"#;

/// Appends its arguments and its --files-from list to the --log-file target.
const FAKE_RSYNC: &str = r#"#!/bin/sh
log=""
list=""
for a in "$@"; do
  case "$a" in
    --log-file=*) log="${a#--log-file=}" ;;
    --files-from=*) list="${a#--files-from=}" ;;
  esac
done
echo "args: $*" >> "$log"
cat "$list" >> "$log"
"#;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serializes tests that write and then exec scripts (avoids ETXTBSY from concurrent forks).
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

pub struct FakeTools {
    pub parallel: PathBuf,
    pub rsync: PathBuf,
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

pub fn install(dir: &Path) -> FakeTools {
    let parallel = dir.join("parallel");
    let rsync = dir.join("rsync");
    write_script(&parallel, FAKE_PARALLEL);
    write_script(&rsync, FAKE_RSYNC);
    FakeTools { parallel, rsync }
}
