//! Token-based identity provider.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::application::services::AuthService;
use crate::domain::entities::User;
use crate::domain::repositories::{IdentityProvider, TokenRepository};
use crate::error::RegistrarError;

/// Asks the person at the terminal for a sign-in token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialPrompt: Send + Sync {
    /// Returns the entered token, or `None` if the prompt was dismissed.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be shown.
    async fn read_token(&self) -> Result<Option<String>, RegistrarError>;
}

/// Signs users in with tokens issued by `admin token create`.
///
/// A preset token (from `--token` or `REGISTRAR_TOKEN`) is tried on the first
/// sign-in instead of prompting.
pub struct TokenIdentityProvider {
    auth: AuthService<dyn TokenRepository>,
    prompt: Arc<dyn CredentialPrompt>,
    preset_token: Mutex<Option<String>>,
    user: RwLock<Option<User>>,
}

impl TokenIdentityProvider {
    pub fn new(auth: AuthService<dyn TokenRepository>, prompt: Arc<dyn CredentialPrompt>) -> Self {
        Self {
            auth,
            prompt,
            preset_token: Mutex::new(None),
            user: RwLock::new(None),
        }
    }

    pub fn with_preset_token(self, token: Option<String>) -> Self {
        *self
            .preset_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = token;
        self
    }

    fn take_preset(&self) -> Option<String> {
        self.preset_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }

    async fn get_user(&self) -> Result<User, RegistrarError> {
        self.current_user()
            .ok_or_else(|| RegistrarError::authentication("Not signed in"))
    }

    async fn sign_in(&self) -> Result<User, RegistrarError> {
        let token = match self.take_preset() {
            Some(token) => token,
            None => self
                .prompt
                .read_token()
                .await?
                .ok_or_else(|| RegistrarError::authentication("Sign-in cancelled"))?,
        };

        let user = self.auth.authenticate(&token).await?;
        tracing::debug!(user = %user.username, "Token accepted");

        self.set_user(Some(user.clone()));
        Ok(user)
    }

    fn sign_out(&self) {
        self.set_user(None);
    }
}
