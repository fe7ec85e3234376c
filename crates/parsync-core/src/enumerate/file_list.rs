//! Ordered list of relative file paths, stored one per line.
//!
//! Entries are kept as raw bytes from the listing tool. File names need not be
//! UTF-8, and whatever `find` printed is handed to rsync unchanged.

use std::ffi::{OsStr, OsString};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    entries: Vec<OsString>,
}

impl FileList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses listing-tool output: one path per line, leading `./` stripped,
    /// blank lines dropped, order kept.
    pub fn parse(output: &[u8]) -> Self {
        let entries = output
            .split(|&b| b == b'\n')
            .map(|line| line.strip_prefix(b"./").unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(os_from_bytes)
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[OsString] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Artifact form: every entry followed by a newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        lines_to_bytes(&self.entries)
    }
}

pub(crate) fn lines_to_bytes<S: AsRef<OsStr>>(lines: &[S]) -> Vec<u8> {
    let mut out = Vec::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        out.extend_from_slice(&os_to_bytes(line.as_ref()));
        out.push(b'\n');
    }
    out
}

#[cfg(unix)]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes.to_vec())
}

#[cfg(not(unix))]
fn os_from_bytes(bytes: &[u8]) -> OsString {
    String::from_utf8_lossy(bytes).into_owned().into()
}

#[cfg(unix)]
fn os_to_bytes(s: &OsStr) -> std::borrow::Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    std::borrow::Cow::Borrowed(s.as_bytes())
}

#[cfg(not(unix))]
fn os_to_bytes(s: &OsStr) -> std::borrow::Cow<'_, [u8]> {
    std::borrow::Cow::Owned(s.to_string_lossy().into_owned().into_bytes())
}
