//! String settings
//!
//! A string does not fit in one atomic word, so the value lives behind an
//! `ArcSwap<String>`. Reads clone an `Arc` and never block. Writes swap in a
//! fresh `Arc` and compare against the one the swap handed back.

use super::notifier::ChangeNotifier;
use crate::contract::{Setting, SettingType, SettingsError};
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;

/// Boxed string validator. `Err` carries the human-readable reason.
pub type ValidateStrFn = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Setting of kind "string" (`s`)
pub struct StringSetting {
    key: String,
    description: String,
    default_value: Arc<String>,
    value: ArcSwap<String>,
    validate_fn: Option<ValidateStrFn>,
    notifier: ChangeNotifier,
}

impl StringSetting {
    pub(crate) fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        default_value: impl Into<String>,
        validate_fn: Option<ValidateStrFn>,
    ) -> Result<Self, SettingsError> {
        let key = key.into();
        let default_value = Arc::new(default_value.into());
        if let Some(validate_fn) = &validate_fn {
            validate_fn(&default_value)
                .map_err(|reason| SettingsError::InvalidDefault {
                    key: key.clone(),
                    reason,
                })?;
        }
        Ok(Self {
            key,
            description: description.into(),
            value: ArcSwap::new(default_value.clone()),
            default_value,
            validate_fn,
            notifier: ChangeNotifier::new(),
        })
    }

    /// Current value
    pub fn get(&self) -> Arc<String> {
        self.value.load_full()
    }

    /// Default value
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Check `v` against the validator without touching stored state
    pub fn validate(&self, v: &str) -> Result<(), SettingsError> {
        match &self.validate_fn {
            Some(validate_fn) => validate_fn(v).map_err(|reason| SettingsError::Validation {
                key: self.key.clone(),
                value: format!("{v:?}"),
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Attach a change hook and return the setting, for chaining at registration
    pub fn on_change<F>(self: Arc<Self>, f: F) -> Arc<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.set_on_change(f);
        self
    }

    /// Attach a change hook, replacing any previous one
    pub fn set_on_change<F>(&self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.attach(f);
    }

    pub(crate) fn set(&self, v: impl Into<String>) -> Result<(), SettingsError> {
        self.set_arc(Arc::new(v.into()))
    }

    /// # Panics
    ///
    /// If the default no longer passes validation.
    pub(crate) fn set_to_default(&self) {
        if let Err(err) = self.set_arc(self.default_value.clone()) {
            tracing::error!(key = %self.key, error = %err, "default rejected by own validator");
            panic!("{err}");
        }
    }

    pub(crate) fn set_encoded(&self, encoded: &str) -> Result<(), SettingsError> {
        self.set(encoded)
    }

    fn set_arc(&self, v: Arc<String>) -> Result<(), SettingsError> {
        self.validate(&v)?;
        let previous = self.value.swap(v.clone());
        if *previous != *v {
            tracing::debug!(key = %self.key, value = %v, "setting changed");
            self.notifier.notify();
        }
        Ok(())
    }
}

impl Setting for StringSetting {
    fn key(&self) -> &str {
        &self.key
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn typ(&self) -> SettingType {
        SettingType::String
    }

    fn encoded(&self) -> String {
        self.get().as_ref().clone()
    }

    fn encoded_default(&self) -> String {
        self.default_value.as_ref().clone()
    }
}

impl fmt::Display for StringSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value.load())
    }
}

impl fmt::Debug for StringSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringSetting")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("value", &self.get())
            .field("notifier", &self.notifier)
            .finish()
    }
}
