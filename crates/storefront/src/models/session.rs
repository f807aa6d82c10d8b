//! Session-stored flow state.
//!
//! Per-browser state that must survive between htmx requests but is never
//! sent to the marketplace. A missing or unreadable registration flow reads
//! as the default, so an expired session simply starts the flow over. A
//! missing account view stays missing: there is no view to update.

use bazaar_core::{AccountView, RegistrationFlow};
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Where the registration form is in its two-step flow.
    pub const REGISTRATION_FLOW: &str = "registration_flow";

    /// The profile view built on the last profile mount.
    pub const ACCOUNT_VIEW: &str = "account_view";
}

/// Read the registration flow, defaulting to `Unverified`.
pub async fn load_registration_flow(session: &Session) -> RegistrationFlow {
    session
        .get::<RegistrationFlow>(keys::REGISTRATION_FLOW)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Store the registration flow.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_registration_flow(
    session: &Session,
    flow: &RegistrationFlow,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::REGISTRATION_FLOW, flow).await
}

/// Read the account view of the last profile mount, if one is still held.
pub async fn load_account_view(session: &Session) -> Option<AccountView> {
    session
        .get::<AccountView>(keys::ACCOUNT_VIEW)
        .await
        .ok()
        .flatten()
}

/// Store the account view.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_account_view(
    session: &Session,
    view: &AccountView,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ACCOUNT_VIEW, view).await
}
