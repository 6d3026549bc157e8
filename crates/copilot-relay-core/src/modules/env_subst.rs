//! `$NAME` / `${NAME}` expansion for credential values.
//!
//! References are scanned left to right with a single pattern. A `$` that is
//! not followed by a valid name (`$`, `$-`, `${}`, an unterminated `${X`) is
//! plain text and stays in the output untouched. Substituted values are never
//! rescanned.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used, reason = "static pattern, covered by tests")]
fn reference_re() -> &'static Regex {
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"\$\{([A-Za-z0-9_]+)\}|\$([A-Za-z0-9_]+)").expect("valid reference pattern")
    })
}

/// Source of environment variable values.
///
/// The resolver never touches `std::env` directly so tests can supply a map.
pub trait EnvLookup: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads from the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubstitutionError {
    #[error("environment variable {variable} is not set")]
    Missing { variable: String },
}

fn reference_name<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str())
}

/// Names referenced by `raw`, in order of appearance.
pub fn references(raw: &str) -> Vec<&str> {
    reference_re().captures_iter(raw).map(|caps| reference_name(&caps)).collect()
}

/// Replace every reference in `raw` with its value from `env`.
///
/// Unset and empty variables are both errors; nothing partially substituted
/// is ever returned.
pub fn substitute(raw: &str, env: &dyn EnvLookup) -> Result<String, SubstitutionError> {
    let re = reference_re();
    let mut out = String::with_capacity(raw.len());
    let mut last = 0;

    for caps in re.captures_iter(raw) {
        let Some(whole) = caps.get(0) else { continue };
        let name = reference_name(&caps);

        let value = env
            .var(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| SubstitutionError::Missing { variable: name.to_string() })?;

        out.push_str(&raw[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }

    out.push_str(&raw[last..]);
    Ok(out)
}
