//! Configuration-related errors.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while resolving the account configuration.
///
/// Every variant is fatal to startup. The hosting application is expected to
/// log the error and exit; nothing here is retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file missing or unreadable at the resolved path
    #[error("Config not found at {path}: {message}")]
    NotFound {
        /// Filesystem path that was attempted
        path: String,
        /// Underlying I/O failure
        message: String,
    },

    /// Config file is not a well-formed YAML document
    #[error("Config parse error in {path}: {message}")]
    ParseError {
        /// Filesystem path of the document
        path: String,
        /// Parser message, including line/column when available
        message: String,
    },

    /// Config parsed but one or more entries are invalid
    #[error("Config validation error in {path}: {}", join_issues(.issues))]
    ValidationError {
        /// Filesystem path of the document
        path: String,
        /// Every violation found, in document order
        issues: Vec<ValidationIssue>,
    },

    /// A `$NAME` / `${NAME}` reference points at an unset or empty variable
    #[error("Environment variable {variable} referenced by account {account_id} is not set")]
    EnvVarMissing {
        /// Account whose credential holds the reference
        account_id: String,
        /// Name of the missing variable
        variable: String,
    },
}

impl ConfigError {
    /// Create a not-found error from an IO error.
    pub fn from_io_error(path: impl Into<String>, e: &std::io::Error) -> Self {
        Self::NotFound { path: path.into(), message: e.to_string() }
    }

    /// Validation issues carried by this error (empty for other variants).
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::ValidationError { issues, .. } => issues,
            _ => &[],
        }
    }
}

/// A single schema violation found while decoding the config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Location of the offending value, e.g. `accounts[1].id`
    pub field: String,
    /// Description of the violation
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_issue() {
        let err = ConfigError::ValidationError {
            path: "/etc/relay/config.yaml".to_string(),
            issues: vec![
                ValidationIssue::new("accounts[0]", "entry at index 0 must be an object"),
                ValidationIssue::new("accounts[1].id", "entry at index 1 must have a non-empty id"),
            ],
        };

        let msg = err.to_string();
        assert!(msg.contains("/etc/relay/config.yaml"));
        assert!(msg.contains("entry at index 0 must be an object"));
        assert!(msg.contains("accounts[1].id"));
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_not_found_includes_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = ConfigError::from_io_error("/srv/config.yaml", &io);

        assert!(err.to_string().contains("/srv/config.yaml"));
        assert!(err.issues().is_empty());
    }

    #[test]
    fn test_env_var_missing_names_account_and_variable() {
        let err = ConfigError::EnvVarMissing {
            account_id: "primary".to_string(),
            variable: "GH_TOKEN".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("primary"));
        assert!(msg.contains("GH_TOKEN"));
    }
}
