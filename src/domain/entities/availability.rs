//! Availability verdicts produced by the availability checker.

use super::subdomain::SubdomainName;

/// Marker the hosting layer serves for names that are not bound.
pub const NOT_FOUND_SENTINEL: &str = "Subdomain not found";

/// Tri-state availability of a candidate name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    #[default]
    Unknown,
    Available,
    Taken,
}

impl Availability {
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Result of one completed availability check.
///
/// Always bound to the name it was computed for; a verdict for one name is
/// never applied to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityVerdict {
    pub name: SubdomainName,
    pub availability: Availability,
    /// Set when the probe failed and the verdict fell back to `Taken`.
    pub failure: Option<String>,
}

impl AvailabilityVerdict {
    pub fn available(name: SubdomainName) -> Self {
        Self {
            name,
            availability: Availability::Available,
            failure: None,
        }
    }

    pub fn taken(name: SubdomainName) -> Self {
        Self {
            name,
            availability: Availability::Taken,
            failure: None,
        }
    }

    /// Conservative verdict after a failed probe.
    pub fn failed(name: SubdomainName, failure: impl Into<String>) -> Self {
        Self {
            name,
            availability: Availability::Taken,
            failure: Some(failure.into()),
        }
    }
}
