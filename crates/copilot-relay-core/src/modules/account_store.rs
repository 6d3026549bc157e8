//! Process-wide cache of the resolved account set.
//!
//! The store is created once by the hosting application and shared behind an
//! `Arc`. The first `resolve()` loads the config file; every later call gets
//! the same `Arc<AccountSet>` until `reset()` is called.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use copilot_relay_types::{AccountSet, ConfigError};
use parking_lot::{Mutex, RwLock};

use super::config;
use super::env_subst::{EnvLookup, ProcessEnv};

pub struct AccountStore {
    path: PathBuf,
    env: Arc<dyn EnvLookup>,
    cached: RwLock<Option<Arc<AccountSet>>>,
    // Serializes check-load-publish so concurrent first callers load once.
    populate: Mutex<()>,
}

impl AccountStore {
    /// Store reading from the process environment, path chosen by
    /// [`config::config_path`].
    pub fn from_env() -> Self {
        let env: Arc<dyn EnvLookup> = Arc::new(ProcessEnv);
        let path = config::config_path(env.as_ref());
        Self::new(path, env)
    }

    pub fn new(path: impl Into<PathBuf>, env: Arc<dyn EnvLookup>) -> Self {
        Self { path: path.into(), env, cached: RwLock::new(None), populate: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_cached(&self) -> bool {
        self.cached.read().is_some()
    }

    /// Return the cached account set, loading it on first use.
    ///
    /// File and environment are only read while holding the populate lock.
    /// A failed load is not cached.
    pub fn resolve(&self) -> Result<Arc<AccountSet>, ConfigError> {
        if let Some(set) = self.cached.read().as_ref() {
            return Ok(Arc::clone(set));
        }

        let _guard = self.populate.lock();
        if let Some(set) = self.cached.read().as_ref() {
            return Ok(Arc::clone(set));
        }

        let set = Arc::new(config::load_account_set(&self.path, self.env.as_ref())?);
        *self.cached.write() = Some(Arc::clone(&set));
        Ok(set)
    }

    /// Drop the cached set so the next `resolve()` re-reads file and env.
    pub fn reset(&self) {
        let _guard = self.populate.lock();
        if self.cached.write().take().is_some() {
            tracing::debug!("Account cache cleared ({})", self.path.display());
        }
    }
}

impl std::fmt::Debug for AccountStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountStore")
            .field("path", &self.path)
            .field("cached", &self.is_cached())
            .finish_non_exhaustive()
    }
}
