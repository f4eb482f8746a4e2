//! HTTP request handlers.

pub mod health;
pub mod site;

pub use health::health_handler;
pub use site::site_handler;
