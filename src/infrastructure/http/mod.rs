//! Outbound HTTP adapters.

mod availability_probe;

pub use availability_probe::{DEFAULT_PROBE_TIMEOUT, HttpAvailabilityProbe};
