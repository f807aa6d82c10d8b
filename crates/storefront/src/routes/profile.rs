//! Profile route handlers.
//!
//! The profile view is the one page built from two marketplace reads. The
//! merged [`AccountView`] is kept in the session for the life of the mount,
//! so creating a store updates it in place and re-renders from it instead
//! of reading ownership again.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{
        Multipart, State,
        multipart::MultipartError,
    },
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use bazaar_core::{AccountView, ListingDraft, ListingImage};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::Credentials;
use crate::error::Result;
use crate::middleware::RequireSession;
use crate::middleware::htmx::HX_TRIGGER;
use crate::models::{load_account_view, save_account_view};
use crate::routes::{MessageTemplate, ShellTemplate};
use crate::services::FlowFailure;
use crate::services::flows::{CREATE_STORE, SELL_ITEM};
use crate::state::AppState;

/// Placeholder shown while the profile guard is pending.
pub const LOADING_PROFILE: &str = "Loading profile...";

/// Shown when the sell-item upload is over the body limit.
pub const IMAGE_TOO_LARGE: &str = "Image is too large. The limit is 10 MB.";

/// Create-store form data.
#[derive(Debug, Deserialize)]
pub struct CreateStoreForm {
    #[serde(default)]
    pub store_name: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Profile view fragment.
#[derive(Template, WebTemplate)]
#[template(path = "profile/view.html")]
pub struct ProfileTemplate {
    pub account: AccountView,
}

/// Create-store modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "profile/create_store_modal.html")]
pub struct CreateStoreModalTemplate;

/// Store created: message, delayed modal close and, when a view is
/// mounted, refreshed account panels.
#[derive(Template, WebTemplate)]
#[template(path = "profile/store_created.html")]
pub struct StoreCreatedTemplate {
    pub message: &'static str,
    pub account: Option<AccountView>,
}

/// Sell-item modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "profile/sell_modal.html")]
pub struct SellModalTemplate;

/// Item listed: message, then the modal closes.
#[derive(Template, WebTemplate)]
#[template(path = "profile/item_listed.html")]
pub struct ItemListedTemplate {
    pub message: &'static str,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the profile shell.
pub async fn page() -> impl IntoResponse {
    ShellTemplate {
        title: "Profile",
        view_url: "/profile/view",
        loading: LOADING_PROFILE,
    }
}

/// Mount the profile: read identity and store ownership, merge, remember.
#[instrument(skip_all)]
pub async fn view(
    _session: RequireSession,
    State(state): State<AppState>,
    session: Session,
    credentials: Credentials,
) -> Result<impl IntoResponse> {
    let account = state.accounts().load(&credentials).await;
    save_account_view(&session, &account).await?;
    Ok(ProfileTemplate { account })
}

/// Open the create-store modal.
pub async fn new_store() -> impl IntoResponse {
    CreateStoreModalTemplate
}

/// Create a store.
///
/// On success the mounted account view gains the store under the name as
/// typed, and the account panels are re-rendered from it. With no mounted
/// view (expired session, restarted process) the panels are left alone.
#[instrument(skip(state, session, credentials, form), fields(store_name = %form.store_name))]
pub async fn create_store(
    State(state): State<AppState>,
    session: Session,
    credentials: Credentials,
    Form(form): Form<CreateStoreForm>,
) -> Result<Response> {
    let mut account = load_account_view(&session).await;

    let response = match state
        .accounts()
        .create_store(&credentials, account.as_mut(), &form.store_name)
        .await
    {
        Ok(()) => {
            match &account {
                Some(account) => save_account_view(&session, account).await?,
                None => tracing::debug!("No mounted account view, panels not refreshed"),
            }
            (
                AppendHeaders([(HX_TRIGGER, "store-created")]),
                StoreCreatedTemplate {
                    message: CREATE_STORE.success,
                    account,
                },
            )
                .into_response()
        }
        Err(failure) => MessageTemplate::failure(&failure).into_response(),
    };
    Ok(response)
}

/// Open the sell-item modal.
pub async fn sell_form() -> impl IntoResponse {
    SellModalTemplate
}

/// List an item for sale.
#[instrument(skip_all)]
pub async fn sell_item(
    State(state): State<AppState>,
    credentials: Credentials,
    multipart: Multipart,
) -> Response {
    let draft = match read_listing(multipart).await {
        Ok(draft) => draft,
        Err(e) => {
            tracing::warn!(error = %e, status = %e.status(), "Unreadable sell-item form");
            return MessageTemplate::failure(&unreadable_listing(&e)).into_response();
        }
    };

    match state.flows().sell_item(&credentials, draft).await {
        Ok(()) => (
            AppendHeaders([(HX_TRIGGER, "item-listed")]),
            ItemListedTemplate {
                message: SELL_ITEM.success,
            },
        )
            .into_response(),
        Err(failure) => MessageTemplate::failure(&failure).into_response(),
    }
}

/// The inline message for a form that could not be read.
fn unreadable_listing(error: &MultipartError) -> FlowFailure {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        FlowFailure::Invalid(IMAGE_TOO_LARGE)
    } else {
        FlowFailure::Transport(SELL_ITEM.transport)
    }
}

/// Collect the sell-item form. Unknown fields are ignored.
async fn read_listing(mut multipart: Multipart) -> std::result::Result<ListingDraft, MultipartError> {
    let mut draft = ListingDraft::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("item_name") => draft.item_name = field.text().await?,
            Some("price") => draft.price = field.text().await?,
            Some("image") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                draft.image = Some(ListingImage {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(draft)
}
