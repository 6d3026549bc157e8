//! Core domain models for Copilot Relay.
//!
//! This module contains the shared data structures handed from the config
//! resolver to the hosting application.

mod account;

// Re-export all models
pub use account::{AccountDefinition, AccountSet, AccountSummary};
