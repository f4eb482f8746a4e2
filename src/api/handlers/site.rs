//! Serves registered subdomains.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::error::RegistrarError;
use crate::infrastructure::storage::resolve_storage_path;
use crate::state::AppState;
use crate::utils::extract_host::{extract_host, strip_port};

/// Page served for hosts that are not bound to any folder.
///
/// Always contains the "Subdomain not found" marker the availability
/// checker looks for.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub host: Option<String>,
}

fn not_found(host: Option<&str>) -> Response {
    let page = NotFoundTemplate {
        host: host.map(str::to_string),
    };
    (StatusCode::NOT_FOUND, page).into_response()
}

/// Serves the folder bound to the request's subdomain.
///
/// # Endpoint
///
/// Any path on `<name>.<shared domain>`. `/` serves `index.html`.
///
/// # Response Codes
///
/// - **200 OK**: File served from the bound folder
/// - **404 Not Found**: Host is not a bound subdomain, or the file does not exist
/// - **500 Internal Server Error**: Database error or invalid stored folder
pub async fn site_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, RegistrarError> {
    let Some(host) = extract_host(request.headers()).map(str::to_string) else {
        return Ok(not_found(None));
    };

    let label = state
        .address
        .label_from_host(&host)
        .or_else(|| state.address.label_from_host(strip_port(&host)));

    let Some(label) = label else {
        tracing::debug!(host = %host, "Host outside the shared domain");
        return Ok(not_found(Some(&host)));
    };

    let Some(record) = state.hosting.find_by_subdomain(label).await? else {
        tracing::debug!(subdomain = %label, "Subdomain not bound");
        return Ok(not_found(Some(&host)));
    };

    let root = resolve_storage_path(&state.storage_root, &record.root_dir)
        .map_err(|e| RegistrarError::internal(e.to_string()))?;

    tracing::debug!(subdomain = %record.subdomain, root = %root.display(), "Serving site");

    match ServeDir::new(root).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
