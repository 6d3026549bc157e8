//! Account-related errors.

use thiserror::Error;

/// Errors that can occur during account selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Account with given ID not found
    #[error("Account not found: {id}")]
    NotFound {
        /// Unique identifier of the missing account
        id: String,
    },
}
