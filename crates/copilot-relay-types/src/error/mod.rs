//! Errors raised while bringing a relay instance up.
//!
//! [`ConfigError`] covers loading `config.yaml`, [`AccountError`] covers
//! picking the account a server runs with. Startup code that does both
//! returns [`TypedError`] so the host can report either with one `?`.

mod account;
mod config;

pub use account::AccountError;
pub use config::{ConfigError, ValidationIssue};

use thiserror::Error;

/// Any failure that aborts relay startup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypedError {
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result of a startup step.
pub type Result<T> = std::result::Result<T, TypedError>;
