//! Storefront-side state kept in the browser's session.

pub mod session;

pub use session::{
    load_account_view, load_registration_flow, save_account_view,
    save_registration_flow,
};
