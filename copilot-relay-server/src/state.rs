//! Application State
//!
//! Holds the resolved accounts, the active account and the auth gate.

use std::sync::Arc;

use copilot_relay_core::{AccountStore, AuthGate};
use copilot_relay_types::{AccountDefinition, AccountSet};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub accounts: Arc<AccountSet>,
    pub active_account: AccountDefinition,
    pub gate: Arc<AuthGate>,
}

impl AppState {
    /// Resolve the account set from `store` and select the active account.
    pub fn bootstrap(
        store: &AccountStore,
        account_id: Option<&str>,
        gate: Arc<AuthGate>,
    ) -> copilot_relay_types::Result<Self> {
        let accounts = store.resolve()?;
        tracing::info!("📊 {} account(s) loaded from {}", accounts.len(), store.path().display());
        Self::new(accounts, account_id, gate)
    }

    /// Pick the active account (explicit id or the default) and bundle state.
    pub fn new(
        accounts: Arc<AccountSet>,
        account_id: Option<&str>,
        gate: Arc<AuthGate>,
    ) -> copilot_relay_types::Result<Self> {
        let active_account = accounts.select(account_id)?.clone();

        Ok(Self { inner: Arc::new(AppStateInner { accounts, active_account, gate }) })
    }

    pub fn active_account(&self) -> &AccountDefinition {
        &self.inner.active_account
    }

    pub fn gate(&self) -> Arc<AuthGate> {
        Arc::clone(&self.inner.gate)
    }
}
