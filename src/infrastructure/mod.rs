//! Infrastructure layer for external integrations.
//!
//! Concrete adapters for the collaborator traits in
//! [`crate::domain::repositories`].
//!
//! # Modules
//!
//! - [`http`] - Availability probe over HTTP
//! - [`identity`] - Token-based sign-in
//! - [`kv`] - Folder preference stores (Redis, local file, disabled)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`storage`] - User storage on local disk

pub mod http;
pub mod identity;
pub mod kv;
pub mod persistence;
pub mod storage;
