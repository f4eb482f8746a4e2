//! Identity provider collaborator.

use crate::domain::entities::User;
use crate::error::RegistrarError;
use async_trait::async_trait;

/// Sign-in state of the person driving the registrar.
///
/// # Implementations
///
/// - [`crate::infrastructure::identity::TokenIdentityProvider`] - token-based sign-in
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns whether a user is signed in. Never blocks.
    fn is_signed_in(&self) -> bool;

    /// Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Authentication`] when nobody is signed in.
    async fn get_user(&self) -> Result<User, RegistrarError>;

    /// Runs the sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Authentication`] if the user cancels or the
    /// credentials are rejected.
    async fn sign_in(&self) -> Result<User, RegistrarError>;

    /// Ends the session. Fire-and-forget.
    fn sign_out(&self);
}
