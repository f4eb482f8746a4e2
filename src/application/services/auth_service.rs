//! Sign-in token authentication.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::RegistrarError;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// Resolves sign-in tokens to users.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the secret.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a raw token and returns the user it was issued for.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to do so
    /// is logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Authentication`] if the token is empty,
    /// unknown or revoked.
    /// Returns [`RegistrarError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, RegistrarError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(RegistrarError::authentication("No token provided"));
        }

        let token_hash = self.hash_token(token);

        let Some(username) = self.repository.find_username(&token_hash).await? else {
            return Err(RegistrarError::authentication("Invalid or revoked token"));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(User::new(username))
    }

    /// Generates a token for `username` and stores its hash.
    ///
    /// # Returns
    ///
    /// The stored record and the raw token. The raw value is not recoverable
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Conflict`] on hash collision.
    /// Returns [`RegistrarError::Internal`] on database errors.
    pub async fn issue_token(
        &self,
        username: &str,
        name: &str,
    ) -> Result<(ApiToken, String), RegistrarError> {
        let raw = generate_token();
        let record = self
            .repository
            .create_token(username, name, &self.hash_token(&raw))
            .await?;

        Ok((record, raw))
    }
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}
