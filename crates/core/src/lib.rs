//! Bazaar Core - Shared domain types.
//!
//! This crate provides the types shared by the Bazaar components:
//! - `storefront` - Server-rendered marketplace front end
//! - `integration-tests` - End-to-end tests against a mock marketplace API
//!
//! # Architecture
//!
//! The core crate contains only types and state machines - no I/O, no HTTP
//! clients. Everything here can be exercised with plain unit tests.
//!
//! # Modules
//!
//! - [`types`] - Session, account view, registration flow, listing draft,
//!   password strength and client routes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
