//! Route guards.
//!
//! A guard sits in front of a view and asks the session oracle exactly once
//! per mount whether the view may render:
//!
//! ```text
//!            oracle says          policy       result
//! Pending ── Authenticated ─── RequireAuth ──> Admitted
//!        │                 └── RequireGuest ─> Redirected(/dashboard)
//!        └── Unauthenticated ─ RequireAuth ──> Redirected(/)
//!                          └── RequireGuest ─> Admitted
//! ```
//!
//! While a guard is pending the page shows only its loading placeholder; the
//! view endpoint is where it resolves.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use bazaar_core::{Identity, Route, Session};

use crate::api::Credentials;
use crate::middleware::htmx::{HxRequest, Navigate};
use crate::services::AuthOracle;

/// Which sessions a guard lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Only logged-in users; everyone else goes home.
    RequireAuthenticated,
    /// Only logged-out users; everyone else goes to the dashboard.
    RequireUnauthenticated,
}

impl GuardPolicy {
    /// Where a refused browser is sent.
    #[must_use]
    pub const fn redirect_target(self) -> Route {
        match self {
            Self::RequireAuthenticated => Route::Home,
            Self::RequireUnauthenticated => Route::Dashboard,
        }
    }

    #[must_use]
    pub const fn admits(self, session: &Session) -> bool {
        match self {
            Self::RequireAuthenticated => session.is_authenticated(),
            Self::RequireUnauthenticated => !session.is_authenticated(),
        }
    }
}

/// State of one guard mount.
#[derive(Debug, Clone, PartialEq)]
pub enum Admission {
    /// The oracle has not answered yet; nothing but the placeholder renders.
    Pending,
    /// The view may render.
    Admitted(Session),
    /// The browser is sent elsewhere; the view never renders.
    Redirected(Route),
}

impl Admission {
    /// Apply the oracle's answer. Only a pending admission moves; a
    /// resolved one stays where it is.
    #[must_use]
    pub fn resolve(self, policy: GuardPolicy, session: Session) -> Self {
        match self {
            Self::Pending if policy.admits(&session) => Self::Admitted(session),
            Self::Pending => Self::Redirected(policy.redirect_target()),
            resolved => resolved,
        }
    }
}

/// Run one guard mount: consult the oracle once and resolve.
pub async fn admit(
    oracle: &AuthOracle,
    policy: GuardPolicy,
    credentials: &Credentials,
) -> Admission {
    let session = oracle.check_session(credentials).await;
    let admission = Admission::Pending.resolve(policy, session);
    tracing::debug!(?policy, ?admission, "Guard resolved");
    admission
}

/// Refusal from a guard: navigate away.
#[derive(Debug)]
pub struct GuardRejection(Navigate);

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

/// Extractor that admits only logged-in users, yielding their identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard_view(RequireSession(identity): RequireSession) -> impl IntoResponse {
///     format!("Welcome, {}", identity.display_name().unwrap_or("User"))
/// }
/// ```
pub struct RequireSession(pub Identity);

impl<S> FromRequestParts<S> for RequireSession
where
    S: Send + Sync,
    AuthOracle: FromRef<S>,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let policy = GuardPolicy::RequireAuthenticated;
        let htmx = HxRequest::from_headers(&parts.headers);
        let refuse = || GuardRejection(Navigate::to(policy.redirect_target(), htmx));

        match guard(parts, state, policy).await {
            Admission::Admitted(session) => session.into_identity().map(Self).ok_or_else(refuse),
            Admission::Redirected(route) => Err(GuardRejection(Navigate::to(route, htmx))),
            Admission::Pending => Err(refuse()),
        }
    }
}

/// Extractor that admits only logged-out visitors.
pub struct RequireGuest;

impl<S> FromRequestParts<S> for RequireGuest
where
    S: Send + Sync,
    AuthOracle: FromRef<S>,
{
    type Rejection = GuardRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let policy = GuardPolicy::RequireUnauthenticated;
        let htmx = HxRequest::from_headers(&parts.headers);

        match guard(parts, state, policy).await {
            Admission::Admitted(_) => Ok(Self),
            Admission::Redirected(route) => Err(GuardRejection(Navigate::to(route, htmx))),
            Admission::Pending => Err(GuardRejection(Navigate::to(policy.redirect_target(), htmx))),
        }
    }
}

async fn guard<S>(parts: &Parts, state: &S, policy: GuardPolicy) -> Admission
where
    AuthOracle: FromRef<S>,
{
    let oracle = AuthOracle::from_ref(state);
    let credentials = Credentials::from_headers(
        &parts.headers,
        crate::middleware::session::SESSION_COOKIE_NAME,
    );
    admit(&oracle, policy, &credentials).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticated() -> Session {
        Session::Authenticated(Identity::named("Ada"))
    }

    #[test]
    fn test_require_authenticated() {
        let policy = GuardPolicy::RequireAuthenticated;
        assert_eq!(
            Admission::Pending.resolve(policy, authenticated()),
            Admission::Admitted(authenticated())
        );
        assert_eq!(
            Admission::Pending.resolve(policy, Session::Unauthenticated),
            Admission::Redirected(Route::Home)
        );
    }

    #[test]
    fn test_require_unauthenticated() {
        let policy = GuardPolicy::RequireUnauthenticated;
        assert_eq!(
            Admission::Pending.resolve(policy, Session::Unauthenticated),
            Admission::Admitted(Session::Unauthenticated)
        );
        assert_eq!(
            Admission::Pending.resolve(policy, authenticated()),
            Admission::Redirected(Route::Dashboard)
        );
    }

    #[test]
    fn test_resolved_admission_is_terminal() {
        let redirected = Admission::Redirected(Route::Home);
        assert_eq!(
            redirected
                .clone()
                .resolve(GuardPolicy::RequireUnauthenticated, Session::Unauthenticated),
            redirected
        );
    }
}
