//! Registrar state and its reducer.
//!
//! The whole controller state is one immutable snapshot. Every change goes
//! through [`reduce`], so gating rules can be tested without a terminal or
//! any collaborator.

use crate::domain::entities::{Availability, AvailabilityVerdict, Session, SubdomainName, User};
use crate::domain::validation::{ValidationError, normalize_candidate};

/// The subdomain currently typed, after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Candidate {
    /// Nothing typed yet.
    #[default]
    Blank,
    Invalid {
        input: String,
        error: ValidationError,
    },
    Valid(SubdomainName),
}

impl Candidate {
    pub fn from_input(raw: &str) -> Self {
        match SubdomainName::parse(raw) {
            Ok(name) => Self::Valid(name),
            Err(error) => Self::Invalid {
                input: normalize_candidate(raw),
                error,
            },
        }
    }

    pub fn name(&self) -> Option<&SubdomainName> {
        match self {
            Self::Valid(name) => Some(name),
            _ => None,
        }
    }
}

/// Progress of the availability check for the current candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Idle,
    Checking { check_id: u64 },
    Done(AvailabilityVerdict),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RegistrationState {
    #[default]
    Idle,
    InFlight,
    Succeeded {
        url: String,
    },
    Failed {
        message: String,
    },
}

impl RegistrationState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// Snapshot of everything the registrar shows and gates on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrarState {
    pub session: Session,
    pub candidate: Candidate,
    pub check: CheckState,
    pub approved_parent_path: Option<String>,
    pub registration: RegistrationState,
    /// Id of the most recently issued availability check.
    pub latest_check: u64,
}

impl RegistrarState {
    /// Availability of the current candidate. `Unknown` until its own check
    /// has completed.
    pub fn availability(&self) -> Availability {
        match (&self.check, &self.candidate) {
            (CheckState::Done(verdict), Candidate::Valid(name)) if verdict.name == *name => {
                verdict.availability
            }
            _ => Availability::Unknown,
        }
    }

    /// The check the controller should start, if one was just issued.
    pub fn pending_check(&self) -> Option<(u64, &SubdomainName)> {
        match (&self.check, &self.candidate) {
            (CheckState::Checking { check_id }, Candidate::Valid(name)) => Some((*check_id, name)),
            _ => None,
        }
    }

    /// Whether a registration may start right now.
    pub fn can_register(&self) -> bool {
        self.session.is_signed_in()
            && self.approved_parent_path.is_some()
            && self.candidate.name().is_some()
            && self.availability().is_available()
            && !self.registration.is_in_flight()
    }

    fn reset_registration(&mut self) {
        if !self.registration.is_in_flight() {
            self.registration = RegistrationState::Idle;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrarEvent {
    SignedIn(User),
    SignedOut,
    /// A saved folder was loaded after sign-in.
    FolderRestored(String),
    FolderSelected(String),
    InputChanged(String),
    CheckCompleted {
        check_id: u64,
        verdict: AvailabilityVerdict,
    },
    RegistrationStarted,
    RegistrationSucceeded {
        url: String,
    },
    RegistrationFailed {
        message: String,
    },
    /// The orchestrator reported another attempt already running.
    RegistrationSkipped,
}

/// Applies `event` to `state`.
pub fn reduce(state: &RegistrarState, event: RegistrarEvent) -> RegistrarState {
    let mut next = state.clone();

    match event {
        RegistrarEvent::SignedIn(user) => {
            next.session = Session::SignedIn(user);
            next.reset_registration();
        }
        RegistrarEvent::SignedOut => {
            next.session = Session::SignedOut;
            next.approved_parent_path = None;
            next.reset_registration();
        }
        RegistrarEvent::FolderRestored(path) => {
            // A load that finishes after sign-out, or after the user already
            // picked a folder, must not win.
            if next.session.is_signed_in() && next.approved_parent_path.is_none() {
                next.approved_parent_path = Some(path);
            }
        }
        RegistrarEvent::FolderSelected(path) => {
            next.approved_parent_path = Some(path);
            next.reset_registration();
        }
        RegistrarEvent::InputChanged(raw) => {
            next.candidate = Candidate::from_input(&raw);
            next.check = match next.candidate {
                Candidate::Valid(_) => {
                    next.latest_check += 1;
                    CheckState::Checking {
                        check_id: next.latest_check,
                    }
                }
                _ => CheckState::Idle,
            };
            next.reset_registration();
        }
        RegistrarEvent::CheckCompleted { check_id, verdict } => {
            let current = matches!(
                next.check,
                CheckState::Checking { check_id: pending } if pending == check_id
            ) && check_id == next.latest_check
                && next.candidate.name() == Some(&verdict.name);

            if current {
                next.check = CheckState::Done(verdict);
            }
        }
        RegistrarEvent::RegistrationStarted => {
            next.registration = RegistrationState::InFlight;
        }
        RegistrarEvent::RegistrationSucceeded { url } => {
            next.registration = RegistrationState::Succeeded { url };
        }
        RegistrarEvent::RegistrationFailed { message } => {
            next.registration = RegistrationState::Failed { message };
        }
        RegistrarEvent::RegistrationSkipped => {
            next.registration = RegistrationState::Idle;
        }
    }

    next
}
