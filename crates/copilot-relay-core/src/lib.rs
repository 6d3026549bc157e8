//! # Copilot Relay Core
//!
//! The two pieces of the relay with real logic in them:
//!
//! ```text
//! copilot-relay-core/src/
//! ├── modules/
//! │   ├── config.rs         # config.yaml decode + validation
//! │   ├── env_subst.rs      # $NAME / ${NAME} expansion
//! │   └── account_store.rs  # single-flight account cache
//! └── proxy/
//!     └── middleware/
//!         └── auth.rs       # bearer-token gate, per-family 401 bodies
//! ```
//!
//! Startup calls [`AccountStore::resolve`] once; every request then passes
//! through [`proxy::gated`] before any handler runs.

// Test-only lints: allow panic!, println!, etc. in test code
#![cfg_attr(test, allow(clippy::panic, clippy::print_stdout, clippy::indexing_slicing))]

pub mod modules;
pub mod proxy;

// Re-export commonly used types
pub use copilot_relay_types::{AccountDefinition, AccountSet, ConfigError};
pub use modules::AccountStore;
pub use proxy::AuthGate;
