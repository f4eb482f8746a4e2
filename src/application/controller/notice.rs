//! Transient, non-blocking messages for the user.

pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const SIGNED_IN: &str = "Successfully signed in!";
pub const SIGNED_OUT: &str = "Signed out successfully";
pub const FOLDER_SAVED: &str = "Folder selected and saved!";
pub const FOLDER_SAVE_FAILED: &str = "Failed to save folder choice";
pub const FOLDER_LOAD_FAILED: &str = "Failed to load saved folder choice";
pub const CHECK_FAILED: &str = "Error checking availability";
pub const REGISTER_PRECONDITION: &str = "Please select a folder and ensure the subdomain is available";
pub const REGISTERED: &str = "Subdomain registered successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn folder_pick_failed(reason: impl std::fmt::Display) -> Self {
        Self::error(format!("Failed to select folder: {reason}"))
    }

    pub fn registration_failed(reason: impl std::fmt::Display) -> Self {
        Self::error(format!("Failed to register subdomain: {reason}"))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
