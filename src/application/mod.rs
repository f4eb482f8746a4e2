//! Application layer: the registration workflow.
//!
//! Services coordinate collaborator calls; the controller owns the session
//! gated state and turns service results into state transitions and notices.
//!
//! # Components
//!
//! - [`services::AvailabilityService`] - Availability probe of a candidate's public URL
//! - [`services::PreferenceService`] - Folder preference with remote and local stores
//! - [`services::RegistrationService`] - Guarded provisioning transaction
//! - [`services::AuthService`] - Sign-in token authentication
//! - [`debounce::Debouncer`] - Cancellable debounce window for availability checks
//! - [`controller::Registrar`] - Reducer-driven controller tying it all together

pub mod controller;
pub mod debounce;
pub mod services;
