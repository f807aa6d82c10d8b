//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::api::Credentials;
use crate::filters;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub authenticated: bool,
}

/// Display the home page.
///
/// Not guarded: it asks the oracle once only to choose which links to show.
#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, credentials: Credentials) -> impl IntoResponse {
    let session = state.oracle().check_session(&credentials).await;

    HomeTemplate {
        authenticated: session.is_authenticated(),
    }
}
