//! Login and registration route handlers.
//!
//! Both pages are guest-only. Registration is two steps: request an emailed
//! code, then submit it with the rest of the form. Where the browser is in
//! that flow lives in the storefront session; the form fields stay in the
//! browser.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use bazaar_core::{DraftError, PasswordStrength, RegistrationDraft, RegistrationFlow, Route};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::Credentials;
use crate::error::{Result, add_breadcrumb};
use crate::middleware::{HxRequest, Navigate, RequireGuest};
use crate::models::{load_registration_flow, save_registration_flow};
use crate::routes::{LOADING, MessageTemplate, ShellTemplate};
use crate::services::FlowFailure;
use crate::services::flows::{LOGIN, REGISTER, SEND_CODE};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data. Both steps post the whole form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub code: String,
    /// Present (as `"true"`) only when the box is checked.
    pub accepted_terms: Option<String>,
    pub timezone: String,
}

impl RegisterForm {
    fn into_draft(self) -> (RegistrationDraft, String) {
        let draft = RegistrationDraft {
            name: self.name,
            email: self.email,
            password: SecretString::from(self.password),
            verification_code: self.code,
            accepted_terms: self.accepted_terms.is_some_and(|v| v == "true" || v == "on"),
        };
        (draft, self.timezone)
    }
}

/// Password strength probe.
#[derive(Debug, Deserialize)]
pub struct StrengthForm {
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login form fragment.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate;

/// Register form fragment.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate;

/// Terms and conditions modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "auth/terms_modal.html")]
pub struct TermsModalTemplate;

/// Closes the terms modal and checks the terms box out of band.
#[derive(Template, WebTemplate)]
#[template(path = "auth/terms_accepted.html")]
pub struct TermsAcceptedTemplate;

/// Registration success: message, then on to the login page.
#[derive(Template, WebTemplate)]
#[template(path = "auth/registered.html")]
pub struct RegisteredTemplate {
    pub message: &'static str,
}

/// Password strength meter fragment. Empty for an empty password.
#[derive(Template, WebTemplate)]
#[template(path = "partials/strength_meter.html")]
pub struct StrengthMeterTemplate {
    pub strength: Option<PasswordStrength>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page shell.
pub async fn login_page() -> impl IntoResponse {
    ShellTemplate {
        title: "Login",
        view_url: "/login/view",
        loading: LOADING,
    }
}

/// Mount the login form. Logged-in users are sent to the dashboard.
pub async fn login_view(_guest: RequireGuest) -> impl IntoResponse {
    LoginTemplate
}

/// Handle login form submission.
///
/// The marketplace's session cookie is relayed to the browser on success.
#[instrument(skip(state, credentials, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    credentials: Credentials,
    htmx: HxRequest,
    Form(form): Form<LoginForm>,
) -> Response {
    let password = SecretString::from(form.password);

    match state.flows().login(&credentials, &form.email, &password).await {
        Ok(cookies) => {
            add_breadcrumb("auth", "Logged in");
            (
                cookies,
                Navigate::to(Route::Dashboard, htmx)
                    .with_body(MessageTemplate::success(LOGIN.success)),
            )
                .into_response()
        }
        Err(failure) => MessageTemplate::failure(&failure).into_response(),
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the register page shell.
pub async fn register_page() -> impl IntoResponse {
    ShellTemplate {
        title: "Register",
        view_url: "/register/view",
        loading: LOADING,
    }
}

/// Mount the register form, starting the flow over.
#[instrument(skip_all)]
pub async fn register_view(_guest: RequireGuest, session: Session) -> Result<impl IntoResponse> {
    save_registration_flow(&session, &RegistrationFlow::default()).await?;
    Ok(RegisterTemplate)
}

/// Step 1: email a verification code. Never navigates.
#[instrument(skip_all)]
pub async fn send_code(
    State(state): State<AppState>,
    session: Session,
    credentials: Credentials,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let (draft, _timezone) = form.into_draft();
    let mut flow = load_registration_flow(&session).await;

    let response = match state.flows().send_code(&credentials, &mut flow, &draft).await {
        Ok(()) => {
            save_registration_flow(&session, &flow).await?;
            MessageTemplate::success(SEND_CODE.success).into_response()
        }
        Err(failure) => MessageTemplate::failure(&failure).into_response(),
    };
    Ok(response)
}

/// Step 2: verify the code and register.
///
/// Unaccepted terms open the terms modal instead of submitting.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    credentials: Credentials,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let (draft, timezone) = form.into_draft();
    let mut flow = load_registration_flow(&session).await;

    let response = match state
        .flows()
        .register(&credentials, &mut flow, &draft, &timezone)
        .await
    {
        Ok(()) => {
            save_registration_flow(&session, &flow).await?;
            add_breadcrumb("auth", "Registered");
            RegisteredTemplate {
                message: REGISTER.success,
            }
            .into_response()
        }
        Err(FlowFailure::Draft(DraftError::TermsNotAccepted)) => TermsModalTemplate.into_response(),
        Err(failure) => MessageTemplate::failure(&failure).into_response(),
    };
    Ok(response)
}

/// Open the terms modal.
pub async fn terms() -> impl IntoResponse {
    TermsModalTemplate
}

/// Accept the terms: check the box and close the modal. Nothing is submitted.
pub async fn accept_terms() -> impl IntoResponse {
    TermsAcceptedTemplate
}

/// Render the strength meter for the password typed so far.
pub async fn password_strength(Form(form): Form<StrengthForm>) -> impl IntoResponse {
    StrengthMeterTemplate {
        strength: (!form.password.is_empty()).then(|| PasswordStrength::evaluate(&form.password)),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_register_form_into_draft() {
        let form = RegisterForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "Abc12345!".to_string(),
            code: "123456".to_string(),
            accepted_terms: Some("true".to_string()),
            timezone: "Europe/London".to_string(),
        };

        let (draft, timezone) = form.into_draft();
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.verification_code, "123456");
        assert_eq!(draft.password.expose_secret(), "Abc12345!");
        assert!(draft.accepted_terms);
        assert_eq!(timezone, "Europe/London");
    }

    #[test]
    fn test_unchecked_terms() {
        let (draft, timezone) = RegisterForm::default().into_draft();
        assert!(!draft.accepted_terms);
        assert_eq!(timezone, "");
    }
}
