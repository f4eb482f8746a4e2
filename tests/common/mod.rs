#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use subdomain_registrar::application::controller::{
    DynAvailabilityService, DynPreferenceService, Registrar, RegistrarDeps,
};
use subdomain_registrar::application::services::{
    AvailabilityService, DynRegistrationService, PreferenceService, RegistrationService,
};
use subdomain_registrar::domain::entities::{HostingRecord, NOT_FOUND_SENTINEL, SiteAddress, User};
use subdomain_registrar::domain::repositories::{
    AvailabilityProbe, Filesystem, FolderPicker, HostingRepository, IdentityProvider,
    LocalKeyValueStore, MkdirMode, RemoteKeyValueStore,
};
use subdomain_registrar::error::RegistrarError;
use subdomain_registrar::infrastructure::kv::NullKeyValueStore;
use subdomain_registrar::infrastructure::persistence::PgHostingRepository;
use subdomain_registrar::state::AppState;

pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// In-memory filesystem. Every call yields once so concurrent callers interleave.
#[derive(Default)]
pub struct FakeFilesystem {
    pub dirs: Mutex<BTreeSet<String>>,
    pub files: Mutex<HashMap<String, String>>,
    pub mkdir_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
    pub fail_write: Mutex<Option<String>>,
}

impl FakeFilesystem {
    pub fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl Filesystem for FakeFilesystem {
    async fn mkdir(&self, path: &str, _mode: MkdirMode) -> Result<String, RegistrarError> {
        self.mkdir_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        self.dirs.lock().unwrap().insert(path.to_string());
        Ok(path.to_string())
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), RegistrarError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if let Some(message) = self.fail_write.lock().unwrap().clone() {
            return Err(RegistrarError::storage(message));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }
}

/// In-memory hosting bindings with the same ownership rule as PostgreSQL.
#[derive(Default)]
pub struct FakeHosting {
    pub records: Mutex<HashMap<String, HostingRecord>>,
    pub bind_calls: AtomicUsize,
    next_id: AtomicI64,
}

impl FakeHosting {
    pub fn with_binding(self, owner: &str, subdomain: &str, root_dir: &str) -> Self {
        let now = Utc::now();
        self.records.lock().unwrap().insert(
            subdomain.to_string(),
            HostingRecord::new(
                0,
                subdomain.to_string(),
                root_dir.to_string(),
                owner.to_string(),
                now,
                now,
            ),
        );
        self
    }
}

#[async_trait]
impl HostingRepository for FakeHosting {
    async fn bind(
        &self,
        owner: &str,
        subdomain: &str,
        root_dir: &str,
    ) -> Result<HostingRecord, RegistrarError> {
        self.bind_calls.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();

        if let Some(existing) = records.get(subdomain)
            && existing.owner != owner
        {
            return Err(RegistrarError::conflict(format!(
                "Subdomain '{subdomain}' is already taken"
            )));
        }

        let now = Utc::now();
        let record = HostingRecord::new(
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            subdomain.to_string(),
            root_dir.to_string(),
            owner.to_string(),
            now,
            now,
        );
        records.insert(subdomain.to_string(), record.clone());
        Ok(record)
    }

    async fn find_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<HostingRecord>, RegistrarError> {
        Ok(self.records.lock().unwrap().get(subdomain).cloned())
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<HostingRecord>, RegistrarError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<HostingRecord>, RegistrarError> {
        Ok(self.records.lock().unwrap().values().cloned().collect())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Signs in as a fixed user, or fails when none is configured.
pub struct FakeIdentity {
    user: Option<User>,
    current: Mutex<Option<User>>,
}

impl FakeIdentity {
    pub fn new(user: Option<&str>) -> Self {
        Self {
            user: user.map(User::new),
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn is_signed_in(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }

    async fn get_user(&self) -> Result<User, RegistrarError> {
        self.current
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| RegistrarError::authentication("Not signed in"))
    }

    async fn sign_in(&self) -> Result<User, RegistrarError> {
        let user = self
            .user
            .clone()
            .ok_or_else(|| RegistrarError::authentication("Rejected"))?;
        *self.current.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&self) {
        *self.current.lock().unwrap() = None;
    }
}

/// Returns a fixed answer from the folder picker.
pub struct FakePicker(pub Option<String>);

#[async_trait]
impl FolderPicker for FakePicker {
    async fn show_directory_picker(&self) -> Result<Option<String>, RegistrarError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct MemoryRemoteStore {
    pub values: Mutex<HashMap<(String, String), String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl RemoteKeyValueStore for MemoryRemoteStore {
    async fn set(&self, user: &str, key: &str, value: &str) -> Result<(), RegistrarError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RegistrarError::persistence("remote store unavailable"));
        }
        self.values
            .lock()
            .unwrap()
            .insert((user.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn get(&self, user: &str, key: &str) -> Result<Option<String>, RegistrarError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RegistrarError::persistence("remote store unavailable"));
        }
        Ok(self
            .values
            .lock()
            .unwrap()
            .get(&(user.to_string(), key.to_string()))
            .cloned())
    }

    async fn health_check(&self) -> bool {
        !self.fail.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct MemoryLocalStore {
    pub values: Mutex<HashMap<String, String>>,
}

impl LocalKeyValueStore for MemoryLocalStore {
    fn set_item(&self, key: &str, value: &str) -> Result<(), RegistrarError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, RegistrarError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }
}

/// Answers probes from a set of taken names, with an optional per-call delay.
#[derive(Default)]
pub struct FakeProbe {
    pub taken: Mutex<BTreeSet<String>>,
    pub urls: Mutex<Vec<String>>,
    pub delay: Mutex<Option<Duration>>,
    pub fail: AtomicBool,
}

impl FakeProbe {
    pub fn with_taken(self, names: &[&str]) -> Self {
        self.taken
            .lock()
            .unwrap()
            .extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AvailabilityProbe for FakeProbe {
    async fn fetch_body(&self, url: &str) -> Result<String, RegistrarError> {
        self.urls.lock().unwrap().push(url.to_string());

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(RegistrarError::network("connection refused"));
        }

        let taken = self
            .taken
            .lock()
            .unwrap()
            .iter()
            .any(|name| url.contains(&format!("//{name}.")));

        if taken {
            Ok("<html><body>Welcome</body></html>".to_string())
        } else {
            Ok(format!("<html><body>{NOT_FOUND_SENTINEL}</body></html>"))
        }
    }
}

/// Collaborators behind a registrar, kept so tests can inspect them.
pub struct Harness {
    pub filesystem: Arc<FakeFilesystem>,
    pub hosting: Arc<FakeHosting>,
    pub remote: Arc<MemoryRemoteStore>,
    pub local: Arc<MemoryLocalStore>,
    pub probe: Arc<FakeProbe>,
    pub registration: Arc<DynRegistrationService>,
}

impl Harness {
    pub fn new(hosting: FakeHosting, probe: FakeProbe) -> Self {
        let filesystem = Arc::new(FakeFilesystem::default());
        let hosting = Arc::new(hosting);

        let fs: Arc<dyn Filesystem> = filesystem.clone();
        let hs: Arc<dyn HostingRepository> = hosting.clone();
        let registration: DynRegistrationService =
            RegistrationService::new(fs, hs, SiteAddress::default());

        Self {
            filesystem,
            hosting,
            remote: Arc::new(MemoryRemoteStore::default()),
            local: Arc::new(MemoryLocalStore::default()),
            probe: Arc::new(probe),
            registration: Arc::new(registration),
        }
    }

    pub fn registrar(&self, user: Option<&str>, picked: Option<&str>) -> Registrar {
        let remote: Arc<dyn RemoteKeyValueStore> = self.remote.clone();
        let local: Arc<dyn LocalKeyValueStore> = self.local.clone();
        let preferences: DynPreferenceService = PreferenceService::new(remote, local);

        let probe: Arc<dyn AvailabilityProbe> = self.probe.clone();
        let availability: DynAvailabilityService =
            AvailabilityService::new(probe, SiteAddress::default());

        let deps = RegistrarDeps {
            identity: Arc::new(FakeIdentity::new(user)),
            picker: Arc::new(FakePicker(picked.map(str::to_string))),
            preferences: Arc::new(preferences),
            availability: Arc::new(availability),
            registration: self.registration.clone(),
        };

        Registrar::new(deps, DEBOUNCE)
    }
}

/// Lets the debounce window pass and applies the check it started.
pub async fn settle_check(registrar: &mut Registrar) {
    tokio::time::sleep(DEBOUNCE + Duration::from_millis(1)).await;
    let done = registrar
        .next_check()
        .await
        .expect("check result channel closed");
    registrar.apply_check(done);
}

pub fn create_site_state(
    hosting: Arc<dyn HostingRepository>,
    storage_root: &std::path::Path,
) -> AppState {
    AppState::new(
        hosting,
        Arc::new(NullKeyValueStore::new()),
        SiteAddress::new("http", "puter.localhost"),
        storage_root,
    )
}

pub fn create_pg_state(pool: PgPool, storage_root: &std::path::Path) -> AppState {
    create_site_state(
        Arc::new(PgHostingRepository::new(Arc::new(pool))),
        storage_root,
    )
}
