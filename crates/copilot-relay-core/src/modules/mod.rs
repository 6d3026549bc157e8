//! Account configuration: file loading, env expansion and the process cache.

pub mod account_store;
pub mod config;
pub mod env_subst;

pub use account_store::AccountStore;
pub use env_subst::{EnvLookup, ProcessEnv};
