//! Account config loading.
//!
//! Reads `config.yaml`, decodes the `accounts` list, expands env references in
//! each credential and returns a fully valid [`AccountSet`]. Decoding walks the
//! whole document and reports every violation at once.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use copilot_relay_types::{AccountDefinition, AccountSet, ConfigError, ValidationIssue};
use serde_yaml::Value;

use super::env_subst::{self, EnvLookup, SubstitutionError};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "COPILOT_RELAY_CONFIG";

/// Config file name looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Key holding the raw upstream credential of each account.
pub const CREDENTIAL_FIELD: &str = "github_token";

/// Resolve the config file location.
///
/// A non-blank override wins and is made absolute; otherwise the default file
/// in the working directory is used.
pub fn config_path(env: &dyn EnvLookup) -> PathBuf {
    match env.var(CONFIG_PATH_ENV) {
        Some(custom) if !custom.trim().is_empty() => absolute(Path::new(custom.trim())),
        _ => absolute(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Read, decode and resolve the account set stored at `path`.
pub fn load_account_set(path: &Path, env: &dyn EnvLookup) -> Result<AccountSet, ConfigError> {
    let label = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&label, &e))?;

    let set = parse_account_set(&content, &label, env)?;
    tracing::info!("Loaded {} account(s) from {}", set.len(), label);
    Ok(set)
}

/// Decode and resolve an account set from YAML text.
///
/// `source` only labels error messages.
pub fn parse_account_set(
    content: &str,
    source: &str,
    env: &dyn EnvLookup,
) -> Result<AccountSet, ConfigError> {
    let document: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: source.to_string(),
        message: e.to_string(),
    })?;

    let raw_accounts = decode_accounts(&document).map_err(|issues| {
        ConfigError::ValidationError { path: source.to_string(), issues }
    })?;

    let mut accounts = Vec::with_capacity(raw_accounts.len());
    for raw in raw_accounts {
        let credential = env_subst::substitute(raw.credential, env).map_err(|e| match e {
            SubstitutionError::Missing { variable } => {
                ConfigError::EnvVarMissing { account_id: raw.id.to_string(), variable }
            }
        })?;
        accounts.push(AccountDefinition::new(raw.id, credential));
    }

    AccountSet::from_accounts(accounts).ok_or_else(|| ConfigError::ValidationError {
        path: source.to_string(),
        issues: vec![no_accounts_issue()],
    })
}

/// An entry that passed schema checks, credential still unexpanded.
struct RawAccount<'a> {
    id: &'a str,
    credential: &'a str,
}

fn no_accounts_issue() -> ValidationIssue {
    ValidationIssue::new("accounts", "config file must define at least one account")
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

fn decode_accounts(document: &Value) -> Result<Vec<RawAccount<'_>>, Vec<ValidationIssue>> {
    let entries = match document.get("accounts").and_then(Value::as_sequence) {
        Some(seq) if !seq.is_empty() => seq,
        _ => return Err(vec![no_accounts_issue()]),
    };

    let mut issues = Vec::new();
    let mut accounts = Vec::with_capacity(entries.len());
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(map) = entry.as_mapping() else {
            issues.push(ValidationIssue::new(
                format!("accounts[{index}]"),
                format!("entry at index {index} must be an object"),
            ));
            continue;
        };

        let Some(id) = non_blank_str(map.get("id")).map(str::trim) else {
            issues.push(ValidationIssue::new(
                format!("accounts[{index}].id"),
                format!("entry at index {index} must have a non-empty string id"),
            ));
            continue;
        };

        if !seen.insert(id) {
            issues.push(ValidationIssue::new(
                format!("accounts[{index}].id"),
                format!("duplicate account id {id} at index {index}"),
            ));
        }

        match non_blank_str(map.get(CREDENTIAL_FIELD)) {
            Some(credential) => accounts.push(RawAccount { id, credential }),
            None => issues.push(ValidationIssue::new(
                format!("accounts[{index}].{CREDENTIAL_FIELD}"),
                format!("account {id} must have a non-empty string {CREDENTIAL_FIELD}"),
            )),
        }
    }

    if issues.is_empty() {
        Ok(accounts)
    } else {
        Err(issues)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn parse(content: &str) -> Result<AccountSet, ConfigError> {
        parse_account_set(content, "test.yaml", &env(&[]))
    }

    #[test]
    fn test_two_accounts_in_declaration_order() {
        let set = parse(
            "accounts:\n  - id: primary\n    github_token: token-one\n  - id: backup\n    github_token: token-two\n",
        )
        .unwrap();

        let ids: Vec<_> = set.accounts().iter().map(|a| (a.id(), a.credential())).collect();
        assert_eq!(ids, vec![("primary", "token-one"), ("backup", "token-two")]);
        assert_eq!(set.default_account_id(), "primary");
    }

    #[test]
    fn test_env_reference_expanded() {
        let content = "accounts:\n  - id: primary\n    github_token: ${GH_TOKEN}\n";
        let set = parse_account_set(content, "test.yaml", &env(&[("GH_TOKEN", "ghu_live")])).unwrap();

        assert_eq!(set.default_account().credential(), "ghu_live");
    }

    #[test]
    fn test_env_missing_names_account_and_variable() {
        let content = "accounts:\n  - id: primary\n    github_token: plain\n  - id: backup\n    github_token: $BACKUP_TOKEN\n";
        let err = parse(content).unwrap_err();

        assert_eq!(
            err,
            ConfigError::EnvVarMissing {
                account_id: "backup".to_string(),
                variable: "BACKUP_TOKEN".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse("accounts: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { ref path, .. } if path == "test.yaml"));
    }

    #[test]
    fn test_missing_or_empty_accounts() {
        for content in ["other: 1\n", "accounts: []\n", "accounts: nope\n", "- id: a\n"] {
            let err = parse(content).unwrap_err();
            assert_eq!(err.issues(), &[no_accounts_issue()], "content: {content:?}");
        }
    }

    #[test]
    fn test_non_object_entry() {
        let err = parse("accounts:\n  - just-a-string\n").unwrap_err();
        assert_eq!(err.issues()[0].message, "entry at index 0 must be an object");
    }

    #[test]
    fn test_collects_every_violation() {
        let content = concat!(
            "accounts:\n",
            "  - 42\n",
            "  - id: '   '\n",
            "    github_token: t\n",
            "  - id: primary\n",
            "  - id: dup\n",
            "    github_token: a\n",
            "  - id: dup\n",
            "    github_token: b\n",
        );
        let err = parse(content).unwrap_err();
        let fields: Vec<_> = err.issues().iter().map(|i| i.field.as_str()).collect();

        assert_eq!(
            fields,
            vec!["accounts[0]", "accounts[1].id", "accounts[2].github_token", "accounts[4].id"]
        );
        assert!(err.issues()[2].message.contains("primary"));
        assert!(err.issues()[3].message.contains("duplicate account id dup"));
    }

    #[test]
    fn test_non_string_fields_rejected() {
        let err = parse("accounts:\n  - id: 7\n    github_token: 123\n").unwrap_err();
        assert_eq!(err.issues()[0].field, "accounts[0].id");

        let err = parse("accounts:\n  - id: seven\n    github_token: 123\n").unwrap_err();
        assert_eq!(err.issues()[0].field, "accounts[0].github_token");
    }

    #[test]
    fn test_id_is_trimmed() {
        let set = parse("accounts:\n  - id: '  primary '\n    github_token: t\n").unwrap();
        assert_eq!(set.default_account_id(), "primary");
    }

    #[test]
    fn test_validation_runs_before_substitution() {
        let content = "accounts:\n  - id: a\n    github_token: $UNSET\n  - nope\n";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_config_path_override() {
        let path = config_path(&env(&[(CONFIG_PATH_ENV, "/etc/relay/accounts.yaml")]));
        assert_eq!(path, PathBuf::from("/etc/relay/accounts.yaml"));

        let relative = config_path(&env(&[(CONFIG_PATH_ENV, "conf/accounts.yaml")]));
        assert!(relative.is_absolute());
        assert!(relative.ends_with("conf/accounts.yaml"));
    }

    #[test]
    fn test_config_path_default() {
        for e in [env(&[]), env(&[(CONFIG_PATH_ENV, "   ")])] {
            let path = config_path(&e);
            assert!(path.is_absolute());
            assert!(path.ends_with(DEFAULT_CONFIG_FILE));
        }
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = load_account_set(&path, &env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("absent.yaml"));
    }
}
