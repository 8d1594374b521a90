//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, framing, caching)
//! 5. Session layer (tower-sessions, in-memory store)
//!
//! Authentication, role gates, and shopper state are extractors rather than
//! layers, so each handler states what it needs in its signature.

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod shopper;

pub use auth::{
    AuthRejection, OptionalAuth, RequireAdmin, RequireAuth, RequireSeller, clear_current_user,
    set_current_user,
};
pub use request_id::request_id_middleware;
pub use security_headers::{SecurityHeaders, security_headers_middleware};
pub use session::create_session_layer;
pub use shopper::Shopper;
