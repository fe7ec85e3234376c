//! Enumerator: list the regular files under a source tree.
//!
//! The listing itself is delegated to `find` (or `lfs find` on Lustre), run
//! in the source root locally or over ssh for remote sources. Its output
//! becomes the session's File List.

mod command;
mod file_list;

pub use command::{CommandListing, ListingTool};
pub use file_list::FileList;
pub(crate) use file_list::lines_to_bytes;

use crate::error::Result;

/// Anything that can produce a File List for a run.
pub trait FileSource {
    fn list(&self) -> Result<FileList>;
}

impl FileSource for FileList {
    fn list(&self) -> Result<FileList> {
        Ok(self.clone())
    }
}
