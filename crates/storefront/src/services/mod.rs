//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `oracle` - Answers "is this browser logged in?" for the route guards
//! - `account` - Builds the profile view and records store creation
//! - `flows` - The login, registration, logout and sell-item mutations

pub mod account;
pub mod flows;
pub mod oracle;

pub use account::AccountAggregator;
pub use flows::{FlowFailure, FlowMessages, MutationFlows};
pub use oracle::AuthOracle;
