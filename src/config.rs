//! Runtime configuration read from the environment (and `.env`, loaded in `main`).

use thiserror::Error;
use tracing::debug;

use crate::application::WorkflowPolicy;

pub const DEFAULT_DATABASE: &str = "hrdesk.db";

pub const ENV_DATABASE: &str = "HRDESK_DATABASE";
pub const ENV_GUARD_TRANSITIONS: &str = "HRDESK_GUARD_TRANSITIONS";
pub const ENV_REQUIRE_SUFFICIENT_BALANCE: &str = "HRDESK_REQUIRE_SUFFICIENT_BALANCE";
pub const ENV_REQUIRE_FUTURE_START: &str = "HRDESK_REQUIRE_FUTURE_START";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid boolean for {key}: {value} (expected true/false, yes/no, on/off or 1/0)")]
    InvalidBool { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: String,
    pub policy: WorkflowPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE.to_string(),
            policy: WorkflowPolicy::default(),
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let database_path = lookup(ENV_DATABASE)
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(defaults.database_path);

        let policy = WorkflowPolicy {
            guard_transitions: read_bool(
                &lookup,
                ENV_GUARD_TRANSITIONS,
                defaults.policy.guard_transitions,
            )?,
            require_sufficient_balance: read_bool(
                &lookup,
                ENV_REQUIRE_SUFFICIENT_BALANCE,
                defaults.policy.require_sufficient_balance,
            )?,
            require_future_start: read_bool(
                &lookup,
                ENV_REQUIRE_FUTURE_START,
                defaults.policy.require_future_start,
            )?,
        };

        debug!(database = %database_path, ?policy, "configuration loaded");
        Ok(Self {
            database_path,
            policy,
        })
    }
}

fn read_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidBool { key, value }),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.policy.guard_transitions);
        assert!(!config.policy.require_sufficient_balance);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_DATABASE, "/tmp/hr.db"),
            (ENV_GUARD_TRANSITIONS, "off"),
            (ENV_REQUIRE_SUFFICIENT_BALANCE, "YES"),
            (ENV_REQUIRE_FUTURE_START, "1"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, "/tmp/hr.db");
        assert!(!config.policy.guard_transitions);
        assert!(config.policy.require_sufficient_balance);
        assert!(config.policy.require_future_start);
    }

    #[test]
    fn test_invalid_bool() {
        let err = Config::from_lookup(lookup_from(&[(ENV_GUARD_TRANSITIONS, "maybe")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBool {
                key: ENV_GUARD_TRANSITIONS,
                value: "maybe".to_string()
            }
        );
    }
}
