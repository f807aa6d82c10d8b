//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policy)
//! 5. Session layer (tower-sessions over an evicting moka store)
//!
//! Route guards are extractors rather than layers: each guarded view asks
//! the session oracle itself.

pub mod guard;
pub mod htmx;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use guard::{Admission, GuardPolicy, RequireGuest, RequireSession, admit};
pub use htmx::{HxRequest, Navigate};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
