//! Session-gated registrar controller.
//!
//! - [`state`] - Immutable snapshot and the pure reducer
//! - [`view`] - Projection onto enabled flags and display text
//! - [`notice`] - Transient user messages
//! - [`registrar`] - Drives collaborators and feeds results to the reducer

pub mod notice;
pub mod registrar;
pub mod state;
pub mod view;

pub use notice::{Notice, NoticeLevel};
pub use registrar::{
    CheckCompleted, DynAvailabilityService, DynPreferenceService, PendingRegistration, Registrar,
    RegistrarDeps,
};
pub use state::{Candidate, CheckState, RegistrarEvent, RegistrarState, RegistrationState, reduce};
pub use view::{StatusLine, StatusTone, ViewModel, project};
