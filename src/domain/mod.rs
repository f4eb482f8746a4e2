//! Domain layer: entities, validation rules and collaborator contracts.
//!
//! Nothing in here depends on infrastructure, the hosting server or the
//! terminal front end.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures of the registration workflow
//! - [`validation`] - Subdomain label rules
//! - [`landing_page`] - Content published into new subdomain folders
//! - [`repositories`] - Collaborator trait definitions
//!
//! # Design Principles
//!
//! - Collaborator traits define contracts implemented by the infrastructure layer
//! - Workflow logic lives in [`crate::application`]

pub mod entities;
pub mod landing_page;
pub mod repositories;
pub mod validation;
