//! Landing page published into a freshly registered subdomain folder.

use askama::Template;

use crate::domain::entities::{SiteAddress, SubdomainName};

/// Template for the generated `index.html`.
///
/// Renders `templates/landing.html`. Output depends only on the subdomain
/// and the site address, so re-registering produces identical content.
#[derive(Template)]
#[template(path = "landing.html")]
struct LandingPage<'a> {
    subdomain: &'a str,
    host: &'a str,
    site_url: &'a str,
    shared_domain: &'a str,
}

/// Renders the landing page for `name`.
///
/// # Errors
///
/// Returns [`askama::Error`] if rendering fails.
pub fn render(name: &SubdomainName, address: &SiteAddress) -> Result<String, askama::Error> {
    let host = address.host(name);
    let site_url = address.site_url(name);

    LandingPage {
        subdomain: name.as_str(),
        host: &host,
        site_url: &site_url,
        shared_domain: address.shared_domain(),
    }
    .render()
}
