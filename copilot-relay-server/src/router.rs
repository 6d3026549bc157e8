use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use copilot_relay_core::proxy::gated;
use copilot_relay_types::AccountSummary;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let gate = state.gate();

    let routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/version", get(version_info))
        .route("/v1/accounts", get(list_accounts))
        .with_state(state);

    // The gate wraps every route, including the 404 fallback, so unknown
    // paths still get a protocol-shaped 401.
    gated(routes, gate).layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"})))
}

async fn version_info() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"cargo_version": env!("CARGO_PKG_VERSION")})))
}

#[derive(Debug, Serialize)]
struct AccountsResponse {
    active_account_id: String,
    accounts: Vec<AccountSummary>,
}

async fn list_accounts(State(state): State<AppState>) -> Json<AccountsResponse> {
    Json(AccountsResponse {
        active_account_id: state.active_account().id().to_string(),
        accounts: state.inner.accounts.summaries(),
    })
}
