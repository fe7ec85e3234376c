//! Options forwarded to every ssh invocation (listing, transfer, probe).

use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshOptions {
    /// Credential passed with `-i`.
    pub identity_file: Option<PathBuf>,
    /// Cipher passed with `-c` (the legacy cipher when `--arcfour` is set).
    pub cipher: Option<String>,
}

impl SshOptions {
    pub fn is_empty(&self) -> bool {
        self.identity_file.is_none() && self.cipher.is_none()
    }

    /// Arguments placed between the ssh program and the host.
    pub fn args(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(key) = &self.identity_file {
            out.push("-i".to_string());
            out.push(key.display().to_string());
        }
        if let Some(cipher) = &self.cipher {
            out.push("-c".to_string());
            out.push(cipher.clone());
        }
        out
    }

    /// Remote shell command for rsync's `-e`, e.g. `ssh -i key -c arcfour`.
    pub fn remote_shell(&self, ssh_program: &str) -> String {
        let mut words = vec![ssh_program.to_string()];
        words.extend(self.args());
        crate::shell::join(words)
    }
}
