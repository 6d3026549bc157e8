//! Test helpers for copilot-relay-server unit tests.

use std::sync::Arc;

use copilot_relay_core::AuthGate;
use copilot_relay_types::{AccountDefinition, AccountSet};

use crate::state::AppState;

/// Two-account state (`primary`, `backup`) behind the given gate.
#[allow(clippy::expect_used, reason = "test helper")]
pub fn test_app_state(gate: AuthGate, account: Option<&str>) -> AppState {
    let accounts = AccountSet::from_accounts(vec![
        AccountDefinition::new("primary", "token-one"),
        AccountDefinition::new("backup", "token-two"),
    ])
    .expect("non-empty account list");

    AppState::new(Arc::new(accounts), account, Arc::new(gate)).expect("known account id")
}
