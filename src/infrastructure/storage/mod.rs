//! User storage on local disk.
//!
//! Storage paths are absolute, slash-separated paths such as
//! `/home/alice/sites/myblog`. They are mapped below a root directory on
//! disk and may never escape it.

mod local_filesystem;

pub use local_filesystem::{LocalFilesystem, resolve_storage_path};
