//! File System Helpers
//!
//! Directory operations used by the output and diagram steps.

mod local;

pub use local::{clear_dir_contents, copy_dir_contents, list_files_with_extension, list_files_with_suffix};
