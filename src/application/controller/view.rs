//! Projection of [`RegistrarState`] onto what the front end displays.

use super::state::{Candidate, CheckState, RegistrarState, RegistrationState};
use super::notice::CHECK_FAILED;
use crate::domain::entities::{Availability, SiteAddress};

pub const NOT_SIGNED_IN: &str = "Not signed in";
pub const NO_FOLDER: &str = "No folder selected";
pub const CHECKING: &str = "Checking availability...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Checking,
    Available,
    Taken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: StatusTone,
    pub text: String,
}

impl StatusLine {
    fn new(tone: StatusTone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

/// Everything the front end renders, with controls already gated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub user_label: String,
    pub signed_in: bool,
    pub input_enabled: bool,
    pub folder_enabled: bool,
    pub register_enabled: bool,
    pub registering: bool,
    pub folder_label: String,
    pub status: Option<StatusLine>,
    pub success_url: Option<String>,
}

/// Pure projection of `state`.
pub fn project(state: &RegistrarState, address: &SiteAddress) -> ViewModel {
    let signed_in = state.session.is_signed_in();

    let user_label = state
        .session
        .user()
        .map_or_else(|| NOT_SIGNED_IN.to_string(), |user| user.username.clone());

    let folder_label = state
        .approved_parent_path
        .as_ref()
        .map_or_else(|| NO_FOLDER.to_string(), |path| format!("📁 {path}"));

    let success_url = match &state.registration {
        RegistrationState::Succeeded { url } => Some(url.clone()),
        _ => None,
    };

    ViewModel {
        user_label,
        signed_in,
        input_enabled: signed_in,
        folder_enabled: signed_in,
        register_enabled: state.can_register(),
        registering: state.registration.is_in_flight(),
        folder_label,
        status: status_line(state, address),
        success_url,
    }
}

fn status_line(state: &RegistrarState, address: &SiteAddress) -> Option<StatusLine> {
    let name = match &state.candidate {
        Candidate::Blank => return None,
        Candidate::Invalid { error, .. } => {
            return Some(StatusLine::new(StatusTone::Taken, error.to_string()));
        }
        Candidate::Valid(name) => name,
    };

    match &state.check {
        CheckState::Idle => None,
        CheckState::Checking { .. } => Some(StatusLine::new(StatusTone::Checking, CHECKING)),
        CheckState::Done(verdict) if verdict.failure.is_some() => {
            Some(StatusLine::new(StatusTone::Taken, CHECK_FAILED))
        }
        CheckState::Done(_) => match state.availability() {
            Availability::Available => Some(StatusLine::new(
                StatusTone::Available,
                format!("{} is available!", address.host(name)),
            )),
            Availability::Taken => Some(StatusLine::new(
                StatusTone::Taken,
                format!("{} is already taken", address.host(name)),
            )),
            Availability::Unknown => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::state::{RegistrarEvent, reduce};
    use crate::domain::entities::{AvailabilityVerdict, SubdomainName, User};

    fn apply(events: Vec<RegistrarEvent>) -> RegistrarState {
        events
            .into_iter()
            .fold(RegistrarState::default(), |state, event| reduce(&state, event))
    }

    fn completed(check_id: u64, verdict: AvailabilityVerdict) -> RegistrarEvent {
        RegistrarEvent::CheckCompleted { check_id, verdict }
    }

    #[test]
    fn test_signed_out_view() {
        let view = project(&RegistrarState::default(), &SiteAddress::default());

        assert_eq!(view.user_label, NOT_SIGNED_IN);
        assert_eq!(view.folder_label, NO_FOLDER);
        assert!(!view.input_enabled);
        assert!(!view.folder_enabled);
        assert!(!view.register_enabled);
        assert!(view.status.is_none());
    }

    #[test]
    fn test_signed_in_enables_input_and_folder() {
        let state = apply(vec![RegistrarEvent::SignedIn(User::new("alice"))]);
        let view = project(&state, &SiteAddress::default());

        assert_eq!(view.user_label, "alice");
        assert!(view.input_enabled);
        assert!(view.folder_enabled);
        assert!(!view.register_enabled);
    }

    #[test]
    fn test_available_status_and_register_enabled() {
        let name = SubdomainName::parse("myblog").unwrap();
        let state = apply(vec![
            RegistrarEvent::SignedIn(User::new("alice")),
            RegistrarEvent::FolderSelected("/home/alice/sites".to_string()),
            RegistrarEvent::InputChanged("myblog".to_string()),
            completed(1, AvailabilityVerdict::available(name)),
        ]);
        let view = project(&state, &SiteAddress::default());

        assert_eq!(view.folder_label, "📁 /home/alice/sites");
        assert_eq!(
            view.status,
            Some(StatusLine::new(
                StatusTone::Available,
                "myblog.puter.site is available!"
            ))
        );
        assert!(view.register_enabled);
    }

    #[test]
    fn test_taken_and_failed_status() {
        let name = SubdomainName::parse("myblog").unwrap();
        let taken = apply(vec![
            RegistrarEvent::InputChanged("myblog".to_string()),
            completed(1, AvailabilityVerdict::taken(name.clone())),
        ]);
        let failed = apply(vec![
            RegistrarEvent::InputChanged("myblog".to_string()),
            completed(1, AvailabilityVerdict::failed(name, "timeout")),
        ]);

        let address = SiteAddress::default();
        assert_eq!(
            project(&taken, &address).status.map(|s| s.text),
            Some("myblog.puter.site is already taken".to_string())
        );
        assert_eq!(
            project(&failed, &address).status.map(|s| s.text),
            Some(CHECK_FAILED.to_string())
        );
    }

    #[test]
    fn test_checking_and_invalid_status() {
        let address = SiteAddress::default();

        let checking = apply(vec![RegistrarEvent::InputChanged("ab".to_string())]);
        assert_eq!(
            project(&checking, &address).status,
            Some(StatusLine::new(StatusTone::Checking, CHECKING))
        );

        let invalid = apply(vec![RegistrarEvent::InputChanged("".to_string())]);
        assert_eq!(
            project(&invalid, &address).status.map(|s| s.text),
            Some("Please enter a subdomain name".to_string())
        );
    }

    #[test]
    fn test_success_url_shown_after_registration() {
        let state = apply(vec![RegistrarEvent::RegistrationSucceeded {
            url: "https://myblog.puter.site".to_string(),
        }]);

        assert_eq!(
            project(&state, &SiteAddress::default()).success_url.as_deref(),
            Some("https://myblog.puter.site")
        );
    }
}
