//! Error taxonomy shared by the registrar core, its adapters and the hosting server.
//!
//! Every failure in the registration workflow maps onto one [`RegistrarError`]
//! variant. None of them is fatal: the controller turns each into inline status
//! text or a notice and hands control back to the user.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// A step of the provisioning transaction, used to label failures in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningStep {
    CreateDirectory,
    RenderContent,
    WriteContent,
    BindHosting,
}

impl std::fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CreateDirectory => "create_directory",
            Self::RenderContent => "render_content",
            Self::WriteContent => "write_content",
            Self::BindHosting => "bind_hosting",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum RegistrarError {
    /// The candidate name failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The availability probe could not reach or read the candidate's site.
    #[error("{message}")]
    Network { message: String },

    /// Saving or loading the folder preference failed.
    #[error("{message}")]
    Persistence { message: String },

    /// A provisioning step failed. The message is the collaborator's, verbatim.
    #[error("{message}")]
    Provisioning {
        step: ProvisioningStep,
        message: String,
    },

    /// Registration was requested while its guard was not satisfied.
    #[error("{message}")]
    Precondition { message: String },

    #[error("Registration already in progress")]
    ConcurrencyReject,

    #[error("{message}")]
    Authentication { message: String },

    /// Filesystem adapter failure (path resolution, I/O).
    #[error("{message}")]
    Storage { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl RegistrarError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    pub fn provisioning(step: ProvisioningStep, message: impl Into<String>) -> Self {
        Self::Provisioning {
            step,
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Network { .. } => "network_error",
            Self::Persistence { .. } => "persistence_error",
            Self::Provisioning { .. } => "provisioning_error",
            Self::Precondition { .. } => "precondition_failed",
            Self::ConcurrencyReject => "in_progress",
            Self::Authentication { .. } => "unauthorized",
            Self::Storage { .. } => "storage_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Precondition { .. } => StatusCode::BAD_REQUEST,
            Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } | Self::ConcurrencyReject => StatusCode::CONFLICT,
            Self::Network { .. } => StatusCode::BAD_GATEWAY,
            Self::Persistence { .. }
            | Self::Provisioning { .. }
            | Self::Storage { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for RegistrarError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return Self::conflict(format!(
                "Unique constraint violation: {}",
                db.constraint().unwrap_or("unknown")
            ));
        }

        Self::internal(format!("Database error: {e}"))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
}

impl IntoResponse for RegistrarError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            error: ErrorInfo {
                code: self.code(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
