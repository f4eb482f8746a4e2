//! Small HTTP helpers shared by the hosting server.

pub mod extract_host;
