//! Shared state of the hosting server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::SiteAddress;
use crate::domain::repositories::{HostingRepository, RemoteKeyValueStore};

#[derive(Clone)]
pub struct AppState {
    pub hosting: Arc<dyn HostingRepository>,
    pub remote_store: Arc<dyn RemoteKeyValueStore>,
    pub address: SiteAddress,
    /// Directory on disk that storage paths are resolved against.
    pub storage_root: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        hosting: Arc<dyn HostingRepository>,
        remote_store: Arc<dyn RemoteKeyValueStore>,
        address: SiteAddress,
        storage_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            hosting,
            remote_store,
            address,
            storage_root: Arc::new(storage_root.into()),
        }
    }
}
