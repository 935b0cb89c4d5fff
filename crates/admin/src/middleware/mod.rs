//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with method, uri, status, latency)
//! 3. Request ID (`x-request-id`, recorded on the span and in Sentry)
//! 4. Session layer (tower-sessions, `moka`-backed in-memory store)
//! 5. Route guard extractors on authenticated handlers

pub mod auth;
pub mod moka_store;
pub mod request_id;
pub mod session;

pub use auth::{OptionalSession, RequireSession};
pub use moka_store::MokaStore;
pub use request_id::request_id_middleware;
pub use session::{SESSION_COOKIE_NAME, SessionStore, create_session_layer};
