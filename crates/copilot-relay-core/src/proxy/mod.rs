//! Proxy module - HTTP surface guarding
//!
//! Request forwarding, wire-format translation and rate limiting live in the
//! hosting application. This module only decides whether a request may reach
//! them.

pub mod middleware;

use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;

pub use middleware::{AuthDecision, AuthGate, ErrorShape};

/// Put the auth gate in front of every route of `router`.
pub fn gated<S>(router: Router<S>, gate: Arc<AuthGate>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(gate, middleware::auth_middleware))
}
