//! Mutation flows.
//!
//! Each flow validates its input, makes at most one marketplace call and
//! reduces the result to either success or a [`FlowFailure`] carrying the
//! message to show inline. Every flow has its own fixed wording:
//!
//! | Flow        | Success                                      | Rejected fallback          | Transport               |
//! |-------------|----------------------------------------------|----------------------------|-------------------------|
//! | Login       | Login successful!                            | Login failed               | Server error            |
//! | Send code   | Verification code sent. Check your email.    | Failed to send code.       | Error sending code.     |
//! | Register    | Registration complete!                       | Registration failed.       | Error registering.      |
//! | Store       | Store created!                               | Failed to create store.    | Network error.          |
//! | Sell item   | Item listed successfully!                    | Failed to list item.       | Something went wrong.   |
//!
//! A rejection that carries a server `error` string shows that string
//! instead of the fallback.

use bazaar_core::{DraftError, ListingDraft, ListingError, RegistrationDraft, RegistrationFlow};
use secrecy::SecretString;
use thiserror::Error;
use tracing::instrument;

use crate::api::{ApiClient, ApiError, Credentials, SetCookies};

/// Fixed wording for one flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowMessages {
    pub success: &'static str,
    pub rejected: &'static str,
    pub transport: &'static str,
}

pub const LOGIN: FlowMessages = FlowMessages {
    success: "Login successful!",
    rejected: "Login failed",
    transport: "Server error",
};

pub const SEND_CODE: FlowMessages = FlowMessages {
    success: "Verification code sent. Check your email.",
    rejected: "Failed to send code.",
    transport: "Error sending code.",
};

pub const REGISTER: FlowMessages = FlowMessages {
    success: "Registration complete!",
    rejected: "Registration failed.",
    transport: "Error registering.",
};

pub const CREATE_STORE: FlowMessages = FlowMessages {
    success: "Store created!",
    rejected: "Failed to create store.",
    transport: "Network error.",
};

pub const SELL_ITEM: FlowMessages = FlowMessages {
    success: "Item listed successfully!",
    rejected: "Failed to list item.",
    transport: "Something went wrong.",
};

impl FlowMessages {
    /// Map an API error to the message this flow shows for it.
    #[must_use]
    pub fn failure(&self, error: &ApiError) -> FlowFailure {
        if error.is_transport() {
            return FlowFailure::Transport(self.transport);
        }
        FlowFailure::Rejected(
            error
                .server_message()
                .unwrap_or(self.rejected)
                .to_string(),
        )
    }
}

/// Why a mutation did not succeed. `Display` is the inline message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowFailure {
    /// Registration draft refused before any request.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// Listing refused before any request.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// Other input refused before any request.
    #[error("{0}")]
    Invalid(&'static str),

    /// The marketplace answered with an error.
    #[error("{0}")]
    Rejected(String),

    /// The request failed or the reply could not be read.
    #[error("{0}")]
    Transport(&'static str),
}

impl FlowFailure {
    /// Returns `true` if the marketplace was never called.
    #[must_use]
    pub const fn is_preflight(&self) -> bool {
        matches!(self, Self::Draft(_) | Self::Listing(_) | Self::Invalid(_))
    }
}

/// The stateless mutations: login, logout, registration and listing.
#[derive(Clone)]
pub struct MutationFlows {
    api: ApiClient,
}

impl MutationFlows {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in. Success is judged by status alone.
    ///
    /// # Errors
    ///
    /// Returns the failure mapped through [`LOGIN`].
    #[instrument(skip(self, credentials, password))]
    pub async fn login(
        &self,
        credentials: &Credentials,
        email: &str,
        password: &SecretString,
    ) -> Result<SetCookies, FlowFailure> {
        let cookies = self
            .api
            .login(credentials, email, password)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Login failed");
                LOGIN.failure(&e)
            })?;

        if cookies.is_empty() {
            tracing::warn!("Login succeeded but the marketplace set no cookie");
        }
        tracing::info!(cookies = cookies.len(), "Login succeeded");
        Ok(cookies)
    }

    /// Log out.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged; logout has no user-facing message.
    #[instrument(skip_all)]
    pub async fn logout(&self, credentials: &Credentials) -> Result<SetCookies, ApiError> {
        self.api.logout(credentials).await
    }

    /// Registration step 1: ask for a verification code.
    ///
    /// On success `flow` moves to `CodeSent` for the draft's email. On any
    /// failure it is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`FlowFailure::Draft`] for a missing email or name (no
    /// request is made), otherwise the failure mapped through [`SEND_CODE`].
    #[instrument(skip_all, fields(email = %draft.email))]
    pub async fn send_code(
        &self,
        credentials: &Credentials,
        flow: &mut RegistrationFlow,
        draft: &RegistrationDraft,
    ) -> Result<(), FlowFailure> {
        let request = RegistrationFlow::request_code(draft)?;

        self.api
            .send_verification_email(credentials, request)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Sending verification code failed");
                SEND_CODE.failure(&e)
            })?;

        *flow = std::mem::take(flow).code_sent(draft.email.as_str());
        Ok(())
    }

    /// Registration step 2: verify the code and create the account.
    ///
    /// On success `flow` moves to `Registered`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowFailure::Draft`] with [`DraftError::TermsNotAccepted`]
    /// or [`DraftError::CodeNotSent`] before any request, otherwise the
    /// failure mapped through [`REGISTER`].
    #[instrument(skip_all, fields(email = %draft.email))]
    pub async fn register(
        &self,
        credentials: &Credentials,
        flow: &mut RegistrationFlow,
        draft: &RegistrationDraft,
        timezone: &str,
    ) -> Result<(), FlowFailure> {
        let verified = flow.verify(draft)?;

        self.api
            .verify_and_register(credentials, verified, timezone)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Registration failed");
                REGISTER.failure(&e)
            })?;

        tracing::info!("Registration completed");
        *flow = std::mem::take(flow).registered();
        Ok(())
    }

    /// List an item for sale.
    ///
    /// # Errors
    ///
    /// Returns [`FlowFailure::Listing`] when a field is missing (no request
    /// is made), otherwise the failure mapped through [`SELL_ITEM`].
    #[instrument(skip_all)]
    pub async fn sell_item(
        &self,
        credentials: &Credentials,
        draft: ListingDraft,
    ) -> Result<(), FlowFailure> {
        let listing = draft.validate()?;
        let item_name = listing.item_name().to_string();

        self.api
            .sell_item(credentials, listing)
            .await
            .map_err(|e| {
                tracing::info!(error = %e, "Listing item failed");
                SELL_ITEM.failure(&e)
            })?;

        tracing::info!(item_name, "Item listed");
        Ok(())
    }
}
