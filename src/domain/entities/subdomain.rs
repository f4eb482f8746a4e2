//! Subdomain labels and the public addresses derived from them.

use std::fmt;

use crate::domain::validation::{ValidationError, normalize_candidate, validate};

/// A validated subdomain label.
///
/// Can only be constructed through [`SubdomainName::parse`], so holding one
/// proves the label passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubdomainName(String);

impl SubdomainName {
    /// Normalizes and validates raw input.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] for the normalized input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_candidate(input);
        validate(&normalized)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubdomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubdomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where registered subdomains are served from.
///
/// Combines the URL scheme with the shared hosting domain, e.g.
/// `https` + `puter.site` gives `https://myblog.puter.site`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAddress {
    scheme: String,
    shared_domain: String,
}

impl SiteAddress {
    pub fn new(scheme: impl Into<String>, shared_domain: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            shared_domain: shared_domain.into().trim_matches('.').to_string(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn shared_domain(&self) -> &str {
        &self.shared_domain
    }

    /// Host name of a subdomain, e.g. `myblog.puter.site`.
    pub fn host(&self, name: &SubdomainName) -> String {
        format!("{}.{}", name, self.shared_domain)
    }

    /// Public URL exposed after a successful registration.
    pub fn site_url(&self, name: &SubdomainName) -> String {
        format!("{}://{}", self.scheme, self.host(name))
    }

    /// URL read by the availability probe.
    pub fn probe_url(&self, name: &SubdomainName) -> String {
        format!("{}/", self.site_url(name))
    }

    /// Extracts the subdomain label from a request host.
    ///
    /// Returns `None` for the bare shared domain, foreign hosts and nested
    /// subdomains. The port, if any, must already be stripped from `host`
    /// unless the shared domain itself carries one.
    pub fn label_from_host<'a>(&self, host: &'a str) -> Option<&'a str> {
        let host = host.trim_end_matches('.');
        let label = host
            .strip_suffix(self.shared_domain.as_str())?
            .strip_suffix('.')?;

        if label.is_empty() || label.contains('.') {
            return None;
        }

        Some(label)
    }
}

impl Default for SiteAddress {
    fn default() -> Self {
        Self::new("https", "puter.site")
    }
}
