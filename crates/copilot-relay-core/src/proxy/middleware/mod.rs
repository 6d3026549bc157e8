// Middleware module - Axum middleware

pub mod auth;

pub use auth::{auth_middleware, AuthDecision, AuthGate, ErrorShape};
