use axum::{
    extract::Request,
    extract::State,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Environment variable holding the master secret.
pub const API_KEY_ENV: &str = "COPILOT_RELAY_API_KEY";

const BEARER_PREFIX: &str = "Bearer ";
const REJECTION_MESSAGE: &str = "Invalid or missing Authorization header";

/// Body layout of a 401, chosen by the API family of the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape {
    OpenAi,
    Anthropic,
}

impl ErrorShape {
    pub fn body(self) -> Value {
        match self {
            Self::OpenAi => json!({
                "error": {
                    "message": REJECTION_MESSAGE,
                    "type": "invalid_api_key",
                }
            }),
            Self::Anthropic => json!({
                "type": "error",
                "error": {
                    "type": "authentication_error",
                    "message": REJECTION_MESSAGE,
                }
            }),
        }
    }
}

/// Path prefixes with a non-default rejection body, checked in order.
/// Anything unmatched gets [`ErrorShape::OpenAi`].
pub const REJECTION_SHAPES: &[(&str, ErrorShape)] = &[("/v1/messages", ErrorShape::Anthropic)];

pub fn shape_for_path(path: &str) -> ErrorShape {
    REJECTION_SHAPES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map_or(ErrorShape::OpenAi, |(_, shape)| *shape)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Reject(ErrorShape),
}

/// Per-request bearer-token check against a master secret.
///
/// Configured once; an empty secret turns the gate into a no-op.
#[derive(Clone, Default)]
pub struct AuthGate {
    secret: Option<String>,
}

impl AuthGate {
    pub fn new(secret: impl AsRef<str>) -> Self {
        let secret = secret.as_ref().trim();
        Self { secret: (!secret.is_empty()).then(|| secret.to_string()) }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Read the master secret from [`API_KEY_ENV`].
    pub fn from_env() -> Self {
        let gate = Self::new(std::env::var(API_KEY_ENV).unwrap_or_default());
        if gate.is_enabled() {
            tracing::info!("Proxy auth enabled ({} is set)", API_KEY_ENV);
        } else {
            tracing::info!("Proxy auth disabled ({} is empty)", API_KEY_ENV);
        }
        gate
    }

    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    pub fn decide(&self, authorization: Option<&str>, path: &str) -> AuthDecision {
        let Some(secret) = self.secret.as_deref() else {
            return AuthDecision::Allow;
        };

        let authorized = bearer_token(authorization.unwrap_or_default())
            .is_some_and(|token| constant_time_compare(token, secret));

        if authorized {
            AuthDecision::Allow
        } else {
            AuthDecision::Reject(shape_for_path(path))
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").field("enabled", &self.is_enabled()).finish()
    }
}

/// Token after a case-insensitive `Bearer ` prefix, trimmed.
fn bearer_token(header: &str) -> Option<&str> {
    let scheme = header.get(..BEARER_PREFIX.len())?;
    let token = header.get(BEARER_PREFIX.len()..)?;
    scheme.eq_ignore_ascii_case(BEARER_PREFIX).then(|| token.trim())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

pub fn rejection_response(shape: ErrorShape) -> Response {
    (StatusCode::UNAUTHORIZED, Json(shape.body())).into_response()
}

pub async fn auth_middleware(
    State(gate): State<Arc<AuthGate>>,
    request: Request,
    next: Next,
) -> Response {
    if !gate.is_enabled() {
        return next.run(request).await;
    }

    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match gate.decide(authorization, request.uri().path()) {
        AuthDecision::Allow => next.run(request).await,
        AuthDecision::Reject(shape) => {
            tracing::warn!("Unauthorized request: {} {}", request.method(), request.uri().path());
            rejection_response(shape)
        }
    }
}
