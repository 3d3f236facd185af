//! Startup configuration for cluster settings

use crate::contract::SettingsError;
use crate::domain::{Registry, Updater};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Initial overrides applied on top of registered defaults
///
/// ```yaml
/// strict: false
/// overrides:
///   server.shutdown.drain_wait: 10s
///   kv.snapshot_rebalance.max_rate: "32"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Encoded values keyed by setting key
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,

    /// Abort on the first failing override instead of logging and skipping it
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overrides: BTreeMap::new(),
            strict: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Apply every override to `registry`, returning how many were applied
    ///
    /// Each override is written with the registered setting's own type tag.
    /// Settings without an override are left alone.
    pub fn apply(&self, registry: &Registry) -> Result<usize, SettingsError> {
        let mut updater = Updater::new(registry);
        let mut applied = 0;
        for (key, value) in &self.overrides {
            let result = match registry.lookup(key) {
                Some(setting) => {
                    let typ = setting.as_setting().typ();
                    updater.set(key, value, typ.as_str())
                }
                None => Err(SettingsError::UnknownSetting { key: key.clone() }),
            };
            match result {
                Ok(()) => applied += 1,
                Err(err) if self.strict => return Err(err),
                Err(err) => tracing::warn!(key = %key, error = %err, "skipping setting override"),
            }
        }
        tracing::info!(applied, total = self.overrides.len(), "applied setting overrides");
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert!(config.strict);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(Config::from_yaml("strict: true\nextra: 1\n").is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let registry = Registry::new();
        let wait = registry
            .try_register_duration_setting("server.shutdown.drain_wait", "", Duration::zero())
            .unwrap();
        let rate = registry.try_register_int_setting("kv.snapshot.rate", "", 8).unwrap();

        let config = Config::from_yaml(
            "overrides:\n  server.shutdown.drain_wait: 10s\n  kv.snapshot.rate: \"32\"\n",
        )
        .unwrap();
        assert_eq!(config.apply(&registry), Ok(2));
        assert_eq!(wait.get(), Duration::seconds(10));
        assert_eq!(rate.get(), 32);
    }

    #[test]
    fn test_strict_aborts_on_first_failure() {
        let registry = Registry::new();
        registry.try_register_bool_setting("a", "", false).unwrap();
        let config = Config::from_yaml("overrides:\n  a: maybe\n").unwrap();
        let err = config.apply(&registry).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "{err:?}");
    }

    #[test]
    fn test_lenient_skips_failures() {
        let registry = Registry::new();
        let a = registry.try_register_bool_setting("a", "", false).unwrap();
        let config = Config::from_yaml(
            "strict: false\noverrides:\n  a: \"on\"\n  missing: \"1\"\n",
        )
        .unwrap();
        assert_eq!(config.apply(&registry), Ok(1));
        assert!(a.get());
    }
}
