//! Binder configuration
//!
//! Built once at startup and handed to [`Binder::new`](crate::Binder::new).
//! Values can come from code, from any serde source, or from environment
//! variables:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `VERDICT_NAME_POLICY` | `name_policy` (`serde` or `ident`) | `serde` |
//! | `VERDICT_BODY_LIMIT` | `body_limit` (bytes) | 1 MiB |

use serde::{Deserialize, Serialize};
use thiserror::Error;
use verdict_validate::NamePolicy;

/// Default maximum body size (1MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

const ENV_PREFIX: &str = "VERDICT_";

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Env(#[from] envy::Error),
}

/// Settings shared by every bind-and-validate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// How field paths in validation errors are named.
    pub name_policy: NamePolicy,
    /// Largest accepted body, in bytes.
    pub body_limit: usize,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            name_policy: NamePolicy::default(),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

impl BinderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Load from `VERDICT_*` environment variables; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Self>()?)
    }

    /// Load from an explicit set of `VERDICT_*` variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = BinderConfig::default();
        assert_eq!(config.name_policy, NamePolicy::Serde);
        assert_eq!(config.body_limit, DEFAULT_BODY_LIMIT);
    }

    #[test]
    fn unset_vars_keep_defaults() {
        let config = BinderConfig::from_vars(vars(&[("UNRELATED", "1")])).unwrap();
        assert_eq!(config, BinderConfig::default());
    }

    #[test]
    fn reads_prefixed_vars() {
        let config = BinderConfig::from_vars(vars(&[
            ("VERDICT_NAME_POLICY", "ident"),
            ("VERDICT_BODY_LIMIT", "2048"),
        ]))
        .unwrap();
        assert_eq!(config.name_policy, NamePolicy::Ident);
        assert_eq!(config.body_limit, 2048);
    }

    #[test]
    fn rejects_invalid_limit() {
        let err = BinderConfig::from_vars(vars(&[("VERDICT_BODY_LIMIT", "lots")])).unwrap_err();
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    fn deserializes_from_json() {
        let config: BinderConfig = serde_json::from_str(r#"{"body_limit": 10}"#).unwrap();
        assert_eq!(config.body_limit, 10);
        assert_eq!(config.name_policy, NamePolicy::Serde);
    }

    #[test]
    fn builder_methods() {
        let config = BinderConfig::new()
            .name_policy(NamePolicy::Ident)
            .body_limit(16);
        assert_eq!(config.name_policy, NamePolicy::Ident);
        assert_eq!(config.body_limit, 16);
    }
}
