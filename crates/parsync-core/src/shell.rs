//! POSIX shell quoting for command lines handed to the runner or to ssh.

use std::borrow::Cow;

use shell_escape::unix::escape;

/// Quotes every word for `sh` and joins them with spaces.
pub fn join<I, S>(words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| escape(Cow::Borrowed(w.as_ref())).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quotes a remote directory for `cd`, leaving a leading `~` or `~user`
/// bare so the remote shell still expands it.
pub fn remote_dir(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        let (user, tail) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };
        let plain_user = user
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"._-".contains(&b));
        if plain_user {
            let tail = tail.trim_start_matches('/');
            return if tail.is_empty() {
                format!("~{user}/")
            } else {
                format!("~{user}/{}", escape(Cow::Borrowed(tail)))
            };
        }
    }
    escape(Cow::Borrowed(path)).into_owned()
}
