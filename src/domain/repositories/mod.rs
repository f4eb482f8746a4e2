//! Collaborator trait definitions for the domain layer.
//!
//! The registrar orchestrates external services it does not implement:
//! identity, key-value persistence, folder picking, the filesystem, hosting
//! and the availability probe. Each is reached only through a trait defined
//! here; concrete adapters live in `crate::infrastructure` and
//! `crate::console`.
//!
//! # Architecture
//!
//! - Traits define the contract the core depends on
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Collaborators
//!
//! - [`IdentityProvider`] - Sign-in state
//! - [`RemoteKeyValueStore`] / [`LocalKeyValueStore`] - Folder preference persistence
//! - [`FolderPicker`] - Parent folder selection
//! - [`Filesystem`] - Directory creation and file writes
//! - [`HostingRepository`] - Subdomain bindings
//! - [`AvailabilityProbe`] - Public URL reads
//! - [`TokenRepository`] - Sign-in tokens

pub mod availability_probe;
pub mod filesystem;
pub mod folder_picker;
pub mod hosting_repository;
pub mod identity_provider;
pub mod key_value_store;
pub mod token_repository;

pub use availability_probe::AvailabilityProbe;
pub use filesystem::{Filesystem, MkdirMode};
pub use folder_picker::FolderPicker;
pub use hosting_repository::HostingRepository;
pub use identity_provider::IdentityProvider;
pub use key_value_store::{LocalKeyValueStore, RemoteKeyValueStore, SELECTED_FOLDER_KEY};
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use availability_probe::MockAvailabilityProbe;
#[cfg(test)]
pub use filesystem::MockFilesystem;
#[cfg(test)]
pub use folder_picker::MockFolderPicker;
#[cfg(test)]
pub use hosting_repository::MockHostingRepository;
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
#[cfg(test)]
pub use key_value_store::{MockLocalKeyValueStore, MockRemoteKeyValueStore};
#[cfg(test)]
pub use token_repository::MockTokenRepository;
