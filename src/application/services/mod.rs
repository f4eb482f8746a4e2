//! Workflow services for the application layer.

pub mod auth_service;
pub mod availability_service;
pub mod preference_service;
pub mod registration_service;

pub use auth_service::AuthService;
pub use availability_service::AvailabilityService;
pub use preference_service::{
    FolderPreference, LoadOutcome, LocalFolderPreference, PreferenceService,
    RemoteFolderPreference, SaveOutcome, StoreKind,
};
pub use registration_service::{
    DynRegistrationService, Registration, RegistrationRequest, RegistrationService,
};
