//! Core domain entities of the registration workflow.
//!
//! Entities are plain data structures; the rules that act on them live in
//! [`crate::domain::validation`] and the application services.
//!
//! # Entity Types
//!
//! - [`SubdomainName`] - A validated subdomain label
//! - [`SiteAddress`] - Scheme and shared domain the sites are served under
//! - [`AvailabilityVerdict`] - Outcome of one availability check
//! - [`Session`] / [`User`] - Authentication state
//! - [`HostingRecord`] - A subdomain bound to a storage directory

pub mod availability;
pub mod hosting;
pub mod session;
pub mod subdomain;

pub use availability::{Availability, AvailabilityVerdict, NOT_FOUND_SENTINEL};
pub use hosting::HostingRecord;
pub use session::{Session, User};
pub use subdomain::{SiteAddress, SubdomainName};
