//! Terminal implementations of the interactive collaborators.

use async_trait::async_trait;
use std::sync::Arc;

use super::input::ConsoleInput;
use crate::domain::repositories::FolderPicker;
use crate::error::RegistrarError;
use crate::infrastructure::identity::CredentialPrompt;

/// Asks for the parent folder as an absolute storage path.
pub struct ConsoleFolderPicker {
    input: Arc<ConsoleInput>,
}

impl ConsoleFolderPicker {
    pub fn new(input: Arc<ConsoleInput>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl FolderPicker for ConsoleFolderPicker {
    async fn show_directory_picker(&self) -> Result<Option<String>, RegistrarError> {
        let Some(path) = self
            .input
            .prompt("Parent folder (empty to cancel): ")
            .await?
        else {
            return Ok(None);
        };

        if !path.starts_with('/') {
            return Err(RegistrarError::storage(format!(
                "'{path}' is not an absolute path"
            )));
        }

        Ok(Some(path))
    }
}

/// Asks for a sign-in token.
pub struct ConsoleCredentialPrompt {
    input: Arc<ConsoleInput>,
}

impl ConsoleCredentialPrompt {
    pub fn new(input: Arc<ConsoleInput>) -> Self {
        Self { input }
    }
}

#[async_trait]
impl CredentialPrompt for ConsoleCredentialPrompt {
    async fn read_token(&self) -> Result<Option<String>, RegistrarError> {
        self.input.prompt("Sign-in token (empty to cancel): ").await
    }
}
