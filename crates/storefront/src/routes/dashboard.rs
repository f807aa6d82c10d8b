//! Dashboard and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_core::Route;
use tracing::instrument;

use crate::api::Credentials;
use crate::error::add_breadcrumb;
use crate::middleware::{HxRequest, Navigate, RequireSession};
use crate::routes::{LOADING, ShellTemplate};
use crate::state::AppState;

/// Dashboard view fragment.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/view.html")]
pub struct DashboardTemplate;

/// Display the dashboard shell.
pub async fn page() -> impl IntoResponse {
    ShellTemplate {
        title: "Dashboard",
        view_url: "/dashboard/view",
        loading: LOADING,
    }
}

/// Mount the dashboard. Visitors without a session are sent home.
pub async fn view(_session: RequireSession) -> impl IntoResponse {
    DashboardTemplate
}

/// Log out.
///
/// On success the browser goes home with the marketplace's cleared cookie.
/// On failure nothing happens on screen: the failure is only logged.
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    credentials: Credentials,
    htmx: HxRequest,
) -> Response {
    match state.flows().logout(&credentials).await {
        Ok(cookies) => {
            add_breadcrumb("auth", "Logged out");
            (cookies, Navigate::to(Route::Home, htmx)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Logout failed");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
