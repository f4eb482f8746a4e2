//! Filesystem collaborator used by the registration transaction.

use crate::error::RegistrarError;
use async_trait::async_trait;

/// How `mkdir` treats an already existing directory.
///
/// Registration only ever asks for create-or-reuse. Adapters must never
/// answer with a renamed sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MkdirMode {
    /// Reuse an existing directory of the same name. Never renames.
    CreateOrReuse,
}

/// User storage, addressed by absolute storage paths such as
/// `/home/alice/sites/myblog`.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::LocalFilesystem`] - directory tree on local disk
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Creates a directory, including missing parents.
    ///
    /// # Returns
    ///
    /// The storage path of the directory that now exists. With
    /// [`MkdirMode::CreateOrReuse`] it equals `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Storage`] if the path is invalid, is occupied
    /// by a file, or the directory cannot be created.
    async fn mkdir(&self, path: &str, mode: MkdirMode) -> Result<String, RegistrarError>;

    /// Writes `content` to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Storage`] if the file cannot be written.
    async fn write(&self, path: &str, content: &str) -> Result<(), RegistrarError>;
}
