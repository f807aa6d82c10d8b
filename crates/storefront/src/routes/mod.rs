//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! Guarded pages are served as a shell holding a loading placeholder. The
//! shell mounts its view with `hx-get`, and the view endpoint is where the
//! guard runs.
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (marketplace reachable)
//!
//! # Auth (guest only)
//! GET  /login                  - Login shell
//! GET  /login/view             - Login form (guarded)
//! POST /login                  - Login action
//! GET  /register               - Register shell
//! GET  /register/view          - Register form (guarded, resets the flow)
//! POST /register/send-code     - Step 1: email a verification code
//! POST /register               - Step 2: verify and register
//! GET  /register/terms         - Terms modal fragment
//! POST /register/terms         - Accept terms (checks the box, closes modal)
//! POST /register/strength      - Password strength meter fragment
//!
//! # Account (logged in only)
//! GET  /dashboard              - Dashboard shell
//! GET  /dashboard/view         - Dashboard (guarded)
//! POST /logout                 - Logout action
//! GET  /profile                - Profile shell
//! GET  /profile/view           - Profile (guarded, aggregates account state)
//! GET  /profile/store/new      - Create-store modal fragment
//! POST /profile/store          - Create store
//! GET  /profile/sell           - Sell-item modal fragment
//! POST /profile/sell           - List an item (multipart)
//!
//! # htmx helpers
//! GET  /navigate/{route}       - Answer with `HX-Redirect` to a named route
//! GET  /modal/dismiss          - Empty fragment that closes a modal
//! ```

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod home;
pub mod profile;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Path},
    http::Uri,
    response::Html,
    routing::{get, post},
};
use bazaar_core::Route;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{HxRequest, Navigate};
use crate::services::FlowFailure;
use crate::state::AppState;

/// Placeholder shown while a guard is pending.
pub const LOADING: &str = "Loading...";

/// Upload limit for the sell-item form.
const SELL_BODY_LIMIT: usize = 10 * 1024 * 1024;

// =============================================================================
// Shared Templates
// =============================================================================

/// Page shell: layout plus a placeholder that mounts the real view.
#[derive(Template, WebTemplate)]
#[template(path = "shell.html")]
pub struct ShellTemplate {
    pub title: &'static str,
    pub view_url: &'static str,
    pub loading: &'static str,
}

/// Inline flow message.
#[derive(Template, WebTemplate)]
#[template(path = "partials/message.html")]
pub struct MessageTemplate {
    pub text: String,
    pub success: bool,
}

impl MessageTemplate {
    #[must_use]
    pub fn success(text: &str) -> Self {
        Self {
            text: text.to_string(),
            success: true,
        }
    }

    /// A flow's failure message. Refusals made before any marketplace call
    /// are logged apart from marketplace errors.
    #[must_use]
    pub fn failure(failure: &FlowFailure) -> Self {
        if failure.is_preflight() {
            tracing::debug!(message = %failure, "Flow refused before sending");
        }
        Self {
            text: failure.to_string(),
            success: false,
        }
    }
}

/// Not-found page.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub path: String,
}

// =============================================================================
// Routers
// =============================================================================

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/login/view", get(auth::login_view))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/register/view", get(auth::register_view))
        .route("/register/send-code", post(auth::send_code))
        .route("/register/terms", get(auth::terms).post(auth::accept_terms))
        .route("/register/strength", post(auth::password_strength))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::page))
        .route("/dashboard/view", get(dashboard::view))
        .route("/logout", post(dashboard::logout))
        .route("/profile", get(profile::page))
        .route("/profile/view", get(profile::view))
        .route("/profile/store/new", get(profile::new_store))
        .route("/profile/store", post(profile::create_store))
        .route(
            "/profile/sell",
            get(profile::sell_form)
                .post(profile::sell_item)
                .layer(DefaultBodyLimit::max(SELL_BODY_LIMIT)),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(account_routes())
        .route("/navigate/{route}", get(navigate))
        .route("/modal/dismiss", get(dismiss))
        .fallback(not_found)
}

// =============================================================================
// htmx Helpers
// =============================================================================

/// Navigate to a named route; used by fragments that move on after a delay.
async fn navigate(Path(route): Path<String>, htmx: HxRequest) -> Result<Navigate> {
    let route: Route = route
        .parse()
        .map_err(|e: bazaar_core::UnknownRoute| AppError::NotFound(e.to_string()))?;
    Ok(Navigate::to(route, htmx))
}

/// Empty fragment; swapping it into a modal container closes the modal.
async fn dismiss() -> Html<&'static str> {
    Html("")
}

async fn not_found(uri: Uri) -> (axum::http::StatusCode, NotFoundTemplate) {
    (
        axum::http::StatusCode::NOT_FOUND,
        NotFoundTemplate {
            path: uri.path().to_string(),
        },
    )
}
