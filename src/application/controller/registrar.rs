//! The session-gated registrar controller.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use super::notice::{self, Notice};
use super::state::{CheckState, RegistrarEvent, RegistrarState, reduce};
use super::view::{ViewModel, project};
use crate::application::debounce::Debouncer;
use crate::application::services::{
    AvailabilityService, DynRegistrationService, PreferenceService, Registration,
    RegistrationRequest, SaveOutcome,
};
use crate::domain::entities::AvailabilityVerdict;
use crate::domain::repositories::{
    AvailabilityProbe, FolderPicker, IdentityProvider, LocalKeyValueStore, RemoteKeyValueStore,
};
use crate::error::RegistrarError;

pub type DynPreferenceService = PreferenceService<dyn RemoteKeyValueStore, dyn LocalKeyValueStore>;
pub type DynAvailabilityService = AvailabilityService<dyn AvailabilityProbe>;

/// Collaborators the registrar drives.
#[derive(Clone)]
pub struct RegistrarDeps {
    pub identity: Arc<dyn IdentityProvider>,
    pub picker: Arc<dyn FolderPicker>,
    pub preferences: Arc<DynPreferenceService>,
    pub availability: Arc<DynAvailabilityService>,
    pub registration: Arc<DynRegistrationService>,
}

/// A finished availability check, tagged with the id it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCompleted {
    pub check_id: u64,
    pub verdict: AvailabilityVerdict,
}

/// A registration that passed its preconditions and is marked in flight.
///
/// Run it anywhere (it owns what it needs) and hand the result back to
/// [`Registrar::finish_registration`].
pub struct PendingRegistration {
    service: Arc<DynRegistrationService>,
    request: RegistrationRequest,
}

impl PendingRegistration {
    pub fn request(&self) -> &RegistrationRequest {
        &self.request
    }

    pub async fn run(self) -> Result<Registration, RegistrarError> {
        self.service.register(&self.request).await
    }
}

/// Owns the registrar state and applies every change through the reducer.
///
/// Meant to be owned by a single task. Availability checks run in the
/// background and come back through [`Registrar::next_check`].
pub struct Registrar {
    deps: RegistrarDeps,
    state: RegistrarState,
    notices: Vec<Notice>,
    debouncer: Debouncer,
    checks_tx: mpsc::UnboundedSender<CheckCompleted>,
    checks_rx: mpsc::UnboundedReceiver<CheckCompleted>,
}

impl Registrar {
    pub fn new(deps: RegistrarDeps, debounce_window: Duration) -> Self {
        let (checks_tx, checks_rx) = mpsc::unbounded_channel();

        Self {
            deps,
            state: RegistrarState::default(),
            notices: Vec::new(),
            debouncer: Debouncer::new(debounce_window),
            checks_tx,
            checks_rx,
        }
    }

    pub fn state(&self) -> &RegistrarState {
        &self.state
    }

    pub fn view(&self) -> ViewModel {
        project(&self.state, self.deps.availability.address())
    }

    /// Takes the notices produced since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn dispatch(&mut self, event: RegistrarEvent) {
        tracing::trace!(?event, "Registrar event");
        self.state = reduce(&self.state, event);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Picks up a session that already exists, e.g. from a preset token.
    pub async fn refresh_session(&mut self) {
        if !self.deps.identity.is_signed_in() {
            return;
        }

        match self.deps.identity.get_user().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "Resumed session");
                self.dispatch(RegistrarEvent::SignedIn(user));
                self.restore_folder().await;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to resume session"),
        }
    }

    pub async fn sign_in(&mut self) {
        match self.deps.identity.sign_in().await {
            Ok(user) => {
                tracing::info!(user = %user.username, "Signed in");
                self.dispatch(RegistrarEvent::SignedIn(user));
                self.notify(Notice::success(notice::SIGNED_IN));
                self.restore_folder().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign-in failed");
                self.notify(Notice::error(notice::LOGIN_FAILED));
            }
        }
    }

    pub fn sign_out(&mut self) {
        self.deps.identity.sign_out();
        self.dispatch(RegistrarEvent::SignedOut);
        self.notify(Notice::success(notice::SIGNED_OUT));
    }

    async fn restore_folder(&mut self) {
        let outcome = self.deps.preferences.load(&self.state.session).await;

        if outcome.failure.is_some() {
            self.notify(Notice::error(notice::FOLDER_LOAD_FAILED));
        }
        if let Some(path) = outcome.path {
            tracing::debug!(path = %path, source = ?outcome.source, "Restored folder choice");
            self.dispatch(RegistrarEvent::FolderRestored(path));
        }
    }

    /// Records new input and, for a valid candidate, restarts the debounced
    /// availability check. Invalid input cancels any pending check.
    pub fn input_changed(&mut self, raw: &str) {
        self.dispatch(RegistrarEvent::InputChanged(raw.to_string()));

        let Some((check_id, name)) = self.state.pending_check() else {
            self.debouncer.cancel();
            return;
        };

        let name = name.clone();
        let availability = Arc::clone(&self.deps.availability);
        let tx = self.checks_tx.clone();

        self.debouncer.schedule(async move {
            let verdict = availability.check(&name).await;
            let _ = tx.send(CheckCompleted { check_id, verdict });
        });
    }

    /// Waits for the next finished availability check.
    pub async fn next_check(&mut self) -> Option<CheckCompleted> {
        self.checks_rx.recv().await
    }

    /// Applies a finished check. Stale results are dropped by the reducer.
    pub fn apply_check(&mut self, done: CheckCompleted) {
        let failed = done.verdict.failure.is_some();
        let was_pending = self.state.pending_check().map(|(id, _)| id) == Some(done.check_id);

        self.dispatch(RegistrarEvent::CheckCompleted {
            check_id: done.check_id,
            verdict: done.verdict,
        });

        let applied = was_pending && matches!(self.state.check, CheckState::Done(_));
        if applied && failed {
            self.notify(Notice::error(notice::CHECK_FAILED));
        }
    }

    /// Opens the folder picker and persists the choice.
    pub async fn select_folder(&mut self) {
        if !self.state.session.is_signed_in() {
            tracing::debug!("Folder selection ignored while signed out");
            return;
        }

        let path = match self.deps.picker.show_directory_picker().await {
            Ok(Some(path)) => path,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(error = %e, "Folder picker failed");
                self.notify(Notice::folder_pick_failed(e));
                return;
            }
        };

        self.dispatch(RegistrarEvent::FolderSelected(path.clone()));

        match self.deps.preferences.save(&self.state.session, &path).await {
            SaveOutcome::Saved(_) => self.notify(Notice::success(notice::FOLDER_SAVED)),
            SaveOutcome::Failed { .. } => self.notify(Notice::error(notice::FOLDER_SAVE_FAILED)),
        }
    }

    /// Checks the preconditions and marks the registration in flight.
    ///
    /// # Errors
    ///
    /// - [`RegistrarError::ConcurrencyReject`] without side effects while
    ///   another registration is in flight
    /// - [`RegistrarError::Precondition`] when a precondition is not met; the
    ///   error is also pushed as a notice
    pub fn begin_registration(&mut self) -> Result<PendingRegistration, RegistrarError> {
        if self.state.registration.is_in_flight() {
            return Err(RegistrarError::ConcurrencyReject);
        }

        let request = match (
            self.state.can_register(),
            self.state.session.user(),
            self.state.candidate.name(),
            self.state.approved_parent_path.as_ref(),
        ) {
            (true, Some(user), Some(name), Some(parent)) => RegistrationRequest {
                owner: user.username.clone(),
                subdomain: name.clone(),
                parent_path: parent.clone(),
            },
            _ => {
                let err = RegistrarError::precondition(notice::REGISTER_PRECONDITION);
                self.notify(Notice::error(err.to_string()));
                return Err(err);
            }
        };

        self.dispatch(RegistrarEvent::RegistrationStarted);

        Ok(PendingRegistration {
            service: Arc::clone(&self.deps.registration),
            request,
        })
    }

    /// Applies the result of a [`PendingRegistration`].
    pub fn finish_registration(
        &mut self,
        result: Result<Registration, RegistrarError>,
    ) -> Option<Registration> {
        match result {
            Ok(registration) => {
                self.dispatch(RegistrarEvent::RegistrationSucceeded {
                    url: registration.site_url.clone(),
                });
                self.notify(Notice::success(notice::REGISTERED));
                Some(registration)
            }
            Err(RegistrarError::ConcurrencyReject) => {
                self.dispatch(RegistrarEvent::RegistrationSkipped);
                None
            }
            Err(e) => {
                self.notify(Notice::registration_failed(&e));
                self.dispatch(RegistrarEvent::RegistrationFailed {
                    message: e.to_string(),
                });
                None
            }
        }
    }

    /// Runs a whole registration in place.
    pub async fn register(&mut self) -> Option<Registration> {
        let pending = self.begin_registration().ok()?;
        let result = pending.run().await;
        self.finish_registration(result)
    }
}
