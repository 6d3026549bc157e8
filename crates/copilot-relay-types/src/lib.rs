//! # Copilot Relay Types
//!
//! Core types, models, and error definitions for Copilot Relay.
//!
//! This crate provides the foundational type system for the relay:
//!
//! - **`error`** - Typed error hierarchy for accounts and configuration
//! - **`models`** - Domain models (AccountDefinition, AccountSet, AccountSummary)
//!
//! ## Architecture Role
//!
//! `copilot-relay-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!          copilot-relay-types (this crate)
//!                     │
//!                     ▼
//!          copilot-relay-core
//!                     │
//!                     ▼
//!          copilot-relay-server
//! ```
//!
//! Nothing here performs I/O. Loading, validation and caching live in
//! `copilot-relay-core`.

pub mod error;
pub mod models;

// Re-export error types for convenience
pub use error::{AccountError, ConfigError, Result, TypedError, ValidationIssue};

// Re-export core model types
pub use models::{AccountDefinition, AccountSet, AccountSummary};
