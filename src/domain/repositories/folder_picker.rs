//! Folder picker collaborator.

use crate::error::RegistrarError;
use async_trait::async_trait;

/// Lets the user choose the parent directory for new subdomain folders.
///
/// # Implementations
///
/// - [`crate::console::ConsoleFolderPicker`] - line prompt in the terminal
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderPicker: Send + Sync {
    /// Shows the picker.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(path))` with the chosen storage path
    /// - `Ok(None)` if the user cancelled
    ///
    /// # Errors
    ///
    /// Returns an error if the picker itself fails.
    async fn show_directory_picker(&self) -> Result<Option<String>, RegistrarError>;
}
