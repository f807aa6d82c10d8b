//! Core types for Bazaar.
//!
//! This module provides the domain concepts the storefront binds to the
//! marketplace API.

pub mod account;
pub mod listing;
pub mod password;
pub mod registration;
pub mod route;
pub mod session;

pub use account::{AccountView, GUEST_NAME, Store};
pub use listing::{ListingDraft, ListingError, ListingImage, ValidListing};
pub use password::PasswordStrength;
pub use registration::{CodeRequest, DraftError, RegistrationDraft, RegistrationFlow, VerifiedDraft};
pub use route::{Route, UnknownRoute};
pub use session::{Identity, Session};
