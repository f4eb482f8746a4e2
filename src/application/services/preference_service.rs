//! Persistence of the approved parent folder.
//!
//! Signed-in users keep their choice in the remote per-user store so it
//! follows them across devices; signed-out sessions (and deployments without
//! a remote store) fall back to the machine-local store. Failures never
//! propagate: callers receive an outcome and decide which notice to show.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{Session, User};
use crate::domain::repositories::{LocalKeyValueStore, RemoteKeyValueStore, SELECTED_FOLDER_KEY};
use crate::error::RegistrarError;

/// Which store a preference was read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Remote,
    Local,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// One place a folder preference can live.
#[async_trait]
pub trait FolderPreference: Send + Sync {
    fn kind(&self) -> StoreKind;

    async fn save(&self, path: &str) -> Result<(), RegistrarError>;

    /// Returns the stored path; an empty value reads as `None`.
    async fn load(&self) -> Result<Option<String>, RegistrarError>;
}

/// Preference stored per user in the remote store.
pub struct RemoteFolderPreference<R: RemoteKeyValueStore + ?Sized> {
    store: Arc<R>,
    user: User,
}

impl<R: RemoteKeyValueStore + ?Sized> RemoteFolderPreference<R> {
    pub fn new(store: Arc<R>, user: User) -> Self {
        Self { store, user }
    }
}

#[async_trait]
impl<R: RemoteKeyValueStore + ?Sized> FolderPreference for RemoteFolderPreference<R> {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    async fn save(&self, path: &str) -> Result<(), RegistrarError> {
        self.store
            .set(&self.user.username, SELECTED_FOLDER_KEY, path)
            .await
    }

    async fn load(&self) -> Result<Option<String>, RegistrarError> {
        let value = self
            .store
            .get(&self.user.username, SELECTED_FOLDER_KEY)
            .await?;
        Ok(value.filter(|v| !v.is_empty()))
    }
}

/// Preference stored in the machine-local store.
pub struct LocalFolderPreference<L: LocalKeyValueStore + ?Sized> {
    store: Arc<L>,
}

impl<L: LocalKeyValueStore + ?Sized> LocalFolderPreference<L> {
    pub fn new(store: Arc<L>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<L: LocalKeyValueStore + ?Sized> FolderPreference for LocalFolderPreference<L> {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    async fn save(&self, path: &str) -> Result<(), RegistrarError> {
        self.store.set_item(SELECTED_FOLDER_KEY, path)
    }

    async fn load(&self) -> Result<Option<String>, RegistrarError> {
        let value = self.store.get_item(SELECTED_FOLDER_KEY)?;
        Ok(value.filter(|v| !v.is_empty()))
    }
}

/// Result of [`PreferenceService::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(StoreKind),
    Failed { store: StoreKind, message: String },
}

/// Result of [`PreferenceService::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub path: Option<String>,
    pub source: Option<StoreKind>,
    /// Set when at least one store failed to answer.
    pub failure: Option<String>,
}

/// Façade choosing the folder preference store from the session.
pub struct PreferenceService<R: RemoteKeyValueStore + ?Sized, L: LocalKeyValueStore + ?Sized> {
    remote: Arc<R>,
    local: Arc<L>,
}

impl<R, L> PreferenceService<R, L>
where
    R: RemoteKeyValueStore + ?Sized + 'static,
    L: LocalKeyValueStore + ?Sized + 'static,
{
    pub fn new(remote: Arc<R>, local: Arc<L>) -> Self {
        Self { remote, local }
    }

    fn remote_for(&self, session: &Session) -> Option<RemoteFolderPreference<R>> {
        let user = session.user()?;
        self.remote
            .is_enabled()
            .then(|| RemoteFolderPreference::new(Arc::clone(&self.remote), user.clone()))
    }

    fn local(&self) -> LocalFolderPreference<L> {
        LocalFolderPreference::new(Arc::clone(&self.local))
    }

    /// The store `save` writes to for this session.
    pub fn store_for(&self, session: &Session) -> Box<dyn FolderPreference> {
        match self.remote_for(session) {
            Some(remote) => Box::new(remote),
            None => Box::new(self.local()),
        }
    }

    /// Persists `path`. Never fails; inspect the outcome instead.
    pub async fn save(&self, session: &Session, path: &str) -> SaveOutcome {
        let store = self.store_for(session);
        let kind = store.kind();

        match store.save(path).await {
            Ok(()) => {
                tracing::debug!(store = %kind, "Folder preference saved");
                SaveOutcome::Saved(kind)
            }
            Err(e) => {
                tracing::warn!(store = %kind, error = %e, "Failed to save folder preference");
                SaveOutcome::Failed {
                    store: kind,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Reads the saved path.
    ///
    /// Signed in: the remote store first, then the local one when the remote
    /// has nothing or fails. Signed out: the local store only.
    pub async fn load(&self, session: &Session) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();

        if let Some(remote) = self.remote_for(session) {
            match remote.load().await {
                Ok(Some(path)) => {
                    tracing::debug!(store = %StoreKind::Remote, "Folder preference hit");
                    outcome.path = Some(path);
                    outcome.source = Some(StoreKind::Remote);
                    return outcome;
                }
                Ok(None) => tracing::debug!(store = %StoreKind::Remote, "Folder preference miss"),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to load remote folder preference");
                    outcome.failure = Some(e.to_string());
                }
            }
        }

        match self.local().load().await {
            Ok(Some(path)) => {
                tracing::debug!(store = %StoreKind::Local, "Folder preference hit");
                outcome.path = Some(path);
                outcome.source = Some(StoreKind::Local);
            }
            Ok(None) => tracing::debug!(store = %StoreKind::Local, "Folder preference miss"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load local folder preference");
                outcome.failure.get_or_insert_with(|| e.to_string());
            }
        }

        outcome
    }
}
