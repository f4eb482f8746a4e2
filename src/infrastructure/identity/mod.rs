//! Sign-in adapters.

mod token_identity;

pub use token_identity::{CredentialPrompt, TokenIdentityProvider};

#[cfg(test)]
pub use token_identity::MockCredentialPrompt;
