//! Account model and related types.

use crate::error::AccountError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named upstream credential the relay can authenticate with.
///
/// Created once while decoding the config file and immutable afterwards.
/// The credential is fully resolved: it never contains `$NAME` references.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountDefinition {
    id: String,
    credential: String,
}

impl AccountDefinition {
    /// Create an account from an id and a resolved credential.
    pub fn new(id: impl Into<String>, credential: impl Into<String>) -> Self {
        Self { id: id.into(), credential: credential.into() }
    }

    /// Unique identifier of the account.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resolved upstream credential.
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

impl fmt::Debug for AccountDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountDefinition")
            .field("id", &self.id)
            .field("credential", &"***")
            .finish()
    }
}

/// The ordered, non-empty set of accounts declared in the config file.
///
/// The first declared account is the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSet {
    accounts: Vec<AccountDefinition>,
    default_account_id: String,
}

impl AccountSet {
    /// Build a set from accounts in declaration order.
    ///
    /// Returns `None` when `accounts` is empty. Id uniqueness is checked by
    /// the config decoder before this is called.
    pub fn from_accounts(accounts: Vec<AccountDefinition>) -> Option<Self> {
        let default_account_id = accounts.first()?.id.clone();
        Some(Self { accounts, default_account_id })
    }

    pub fn accounts(&self) -> &[AccountDefinition] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the set holds no accounts (never true for a decoded set).
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn default_account_id(&self) -> &str {
        &self.default_account_id
    }

    /// The first declared account.
    pub fn default_account(&self) -> &AccountDefinition {
        &self.accounts[0]
    }

    /// Look up an account by id.
    pub fn get(&self, id: &str) -> Option<&AccountDefinition> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// Pick the account a server instance runs with.
    ///
    /// `None` selects the default account; an explicit id must exist.
    pub fn select(&self, id: Option<&str>) -> Result<&AccountDefinition, AccountError> {
        match id {
            None => Ok(self.default_account()),
            Some(id) => self.get(id).ok_or_else(|| AccountError::NotFound { id: id.to_string() }),
        }
    }

    /// Credential-free view of the set, safe to serialize.
    pub fn summaries(&self) -> Vec<AccountSummary> {
        self.accounts
            .iter()
            .map(|a| AccountSummary {
                id: a.id.clone(),
                is_default: a.id == self.default_account_id,
            })
            .collect()
    }
}

/// Account summary exposed over the API (never carries the credential).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSummary {
    /// Unique identifier
    pub id: String,
    /// Whether this is the first declared account
    pub is_default: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_set() -> AccountSet {
        AccountSet::from_accounts(vec![
            AccountDefinition::new("primary", "token-one"),
            AccountDefinition::new("backup", "token-two"),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_accounts_rejected() {
        assert!(AccountSet::from_accounts(Vec::new()).is_none());
    }

    #[test]
    fn test_default_is_first_declared() {
        let set = sample_set();
        assert_eq!(set.default_account_id(), "primary");
        assert_eq!(set.default_account().credential(), "token-one");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_select_by_id() {
        let set = sample_set();

        assert_eq!(set.select(None).unwrap().id(), "primary");
        assert_eq!(set.select(Some("backup")).unwrap().credential(), "token-two");
        assert_eq!(
            set.select(Some("missing")).unwrap_err(),
            AccountError::NotFound { id: "missing".to_string() }
        );
    }

    #[test]
    fn test_summaries_mark_default() {
        let summaries = sample_set().summaries();

        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].is_default);
        assert!(!summaries[1].is_default);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let account = AccountDefinition::new("primary", "ghu_supersecret");
        let rendered = format!("{:?}", account);

        assert!(rendered.contains("primary"));
        assert!(!rendered.contains("ghu_supersecret"));
    }
}
