//! Mapping from setting key to setting instance
//!
//! Registrations are expected to finish during process initialization,
//! before any reads or writes. The map sits behind a `parking_lot::RwLock`
//! so that the init phase and later enumeration are both safe. Lookups hand
//! out cloned `Arc`s, so the lock is never held while a setting is read,
//! written or notifies.

use super::atomic::ValidateFn;
use super::string::{StringSetting, ValidateStrFn};
use super::typed::{
    non_negative_duration, BoolSetting, DurationSetting, FloatSetting, IntSetting, SettingValue,
    TypedSetting,
};
use crate::contract::{Setting, SettingsError};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A registered setting of any kind
#[derive(Debug, Clone)]
pub enum RegisteredSetting {
    Bool(Arc<BoolSetting>),
    Int(Arc<IntSetting>),
    Float(Arc<FloatSetting>),
    Duration(Arc<DurationSetting>),
    String(Arc<StringSetting>),
}

impl RegisteredSetting {
    /// Read-only view of the setting
    pub fn as_setting(&self) -> &dyn Setting {
        match self {
            Self::Bool(s) => s.as_ref(),
            Self::Int(s) => s.as_ref(),
            Self::Float(s) => s.as_ref(),
            Self::Duration(s) => s.as_ref(),
            Self::String(s) => s.as_ref(),
        }
    }

    pub(crate) fn set_encoded(&self, encoded: &str) -> Result<(), SettingsError> {
        match self {
            Self::Bool(s) => s.set_encoded(encoded),
            Self::Int(s) => s.set_encoded(encoded),
            Self::Float(s) => s.set_encoded(encoded),
            Self::Duration(s) => s.set_encoded(encoded),
            Self::String(s) => s.set_encoded(encoded),
        }
    }

    pub(crate) fn set_to_default(&self) {
        match self {
            Self::Bool(s) => s.set_to_default(),
            Self::Int(s) => s.set_to_default(),
            Self::Float(s) => s.set_to_default(),
            Self::Duration(s) => s.set_to_default(),
            Self::String(s) => s.set_to_default(),
        }
    }
}

impl<T: SettingValue> From<Arc<TypedSetting<T>>> for RegisteredSetting {
    fn from(setting: Arc<TypedSetting<T>>) -> Self {
        T::into_registered(setting)
    }
}

impl From<Arc<StringSetting>> for RegisteredSetting {
    fn from(setting: Arc<StringSetting>) -> Self {
        Self::String(setting)
    }
}

/// Key-ordered collection of settings
#[derive(Debug, Default)]
pub struct Registry {
    settings: RwLock<BTreeMap<String, RegisteredSetting>>,
}

impl Registry {
    /// Create an empty registry
    ///
    /// Most code uses the process-wide [`registry()`](crate::registry); owned
    /// registries are useful for tests and embedding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a setting under its own key
    pub fn register(&self, setting: impl Into<RegisteredSetting>) -> Result<(), SettingsError> {
        let setting = setting.into();
        let key = setting.as_setting().key().to_string();
        let mut settings = self.settings.write();
        if settings.contains_key(&key) {
            return Err(SettingsError::DuplicateKey { key });
        }
        tracing::debug!(key = %key, typ = %setting.as_setting().typ(), "registered setting");
        settings.insert(key, setting);
        Ok(())
    }

    /// Setting registered under `key`
    pub fn lookup(&self, key: &str) -> Option<RegisteredSetting> {
        self.settings.read().get(key).cloned()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<String> {
        self.settings.read().keys().cloned().collect()
    }

    /// Snapshot of all settings, sorted by key
    pub fn entries(&self) -> Vec<(String, RegisteredSetting)> {
        self.settings
            .read()
            .iter()
            .map(|(key, setting)| (key.clone(), setting.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.settings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.read().is_empty()
    }

    // ===== Typed registration =====

    /// Build and register a scalar setting
    ///
    /// Fails with `InvalidDefault` if the default is rejected by
    /// `validate_fn`, or `DuplicateKey` if the key is taken.
    pub fn try_register<T: SettingValue>(
        &self,
        key: &str,
        description: &str,
        default_value: T,
        validate_fn: Option<ValidateFn<T>>,
    ) -> Result<Arc<TypedSetting<T>>, SettingsError> {
        let setting = Arc::new(TypedSetting::new(key, description, default_value, validate_fn)?);
        self.register(setting.clone())?;
        Ok(setting)
    }

    pub fn try_register_duration_setting(
        &self,
        key: &str,
        description: &str,
        default_value: chrono::Duration,
    ) -> Result<Arc<DurationSetting>, SettingsError> {
        self.try_register(key, description, default_value, None)
    }

    /// Duration setting whose validator rejects negative values
    pub fn try_register_non_negative_duration_setting(
        &self,
        key: &str,
        description: &str,
        default_value: chrono::Duration,
    ) -> Result<Arc<DurationSetting>, SettingsError> {
        self.try_register(key, description, default_value, Some(non_negative_duration()))
    }

    pub fn try_register_validated_duration_setting<F>(
        &self,
        key: &str,
        description: &str,
        default_value: chrono::Duration,
        validate_fn: F,
    ) -> Result<Arc<DurationSetting>, SettingsError>
    where
        F: Fn(chrono::Duration) -> Result<(), String> + Send + Sync + 'static,
    {
        self.try_register(key, description, default_value, Some(Box::new(validate_fn)))
    }

    pub fn try_register_bool_setting(
        &self,
        key: &str,
        description: &str,
        default_value: bool,
    ) -> Result<Arc<BoolSetting>, SettingsError> {
        self.try_register(key, description, default_value, None)
    }

    pub fn try_register_int_setting(
        &self,
        key: &str,
        description: &str,
        default_value: i64,
    ) -> Result<Arc<IntSetting>, SettingsError> {
        self.try_register(key, description, default_value, None)
    }

    pub fn try_register_validated_int_setting<F>(
        &self,
        key: &str,
        description: &str,
        default_value: i64,
        validate_fn: F,
    ) -> Result<Arc<IntSetting>, SettingsError>
    where
        F: Fn(i64) -> Result<(), String> + Send + Sync + 'static,
    {
        self.try_register(key, description, default_value, Some(Box::new(validate_fn)))
    }

    pub fn try_register_float_setting(
        &self,
        key: &str,
        description: &str,
        default_value: f64,
    ) -> Result<Arc<FloatSetting>, SettingsError> {
        self.try_register(key, description, default_value, None)
    }

    pub fn try_register_validated_float_setting<F>(
        &self,
        key: &str,
        description: &str,
        default_value: f64,
        validate_fn: F,
    ) -> Result<Arc<FloatSetting>, SettingsError>
    where
        F: Fn(f64) -> Result<(), String> + Send + Sync + 'static,
    {
        self.try_register(key, description, default_value, Some(Box::new(validate_fn)))
    }

    pub fn try_register_string_setting(
        &self,
        key: &str,
        description: &str,
        default_value: &str,
    ) -> Result<Arc<StringSetting>, SettingsError> {
        self.try_register_string(key, description, default_value, None)
    }

    pub fn try_register_validated_string_setting<F>(
        &self,
        key: &str,
        description: &str,
        default_value: &str,
        validate_fn: F,
    ) -> Result<Arc<StringSetting>, SettingsError>
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.try_register_string(key, description, default_value, Some(Box::new(validate_fn)))
    }

    fn try_register_string(
        &self,
        key: &str,
        description: &str,
        default_value: &str,
        validate_fn: Option<ValidateStrFn>,
    ) -> Result<Arc<StringSetting>, SettingsError> {
        let setting = Arc::new(StringSetting::new(key, description, default_value, validate_fn)?);
        self.register(setting.clone())?;
        Ok(setting)
    }
}
