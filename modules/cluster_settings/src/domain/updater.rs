//! Node-local application of encoded setting updates
//!
//! The replication layer delivers `(key, encoded value, type tag)` triples.
//! An [`Updater`] applies a batch of them to a [`Registry`] and then resets
//! every setting the batch did not mention, so the registry ends up
//! mirroring exactly the set of overrides in force.

use super::registry::Registry;
use crate::contract::{SettingType, SettingsError};
use std::collections::HashSet;

/// Applies one batch of encoded updates to a registry
#[derive(Debug)]
pub struct Updater<'a> {
    registry: &'a Registry,
    touched: HashSet<String>,
}

impl<'a> Updater<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            touched: HashSet::new(),
        }
    }

    /// Decode `encoded` and write it to the setting registered under `key`
    ///
    /// `typ` must match the setting's one-character tag. A known key counts
    /// as touched even when the update fails, so
    /// [`reset_remaining`](Self::reset_remaining) keeps its current value
    /// instead of clobbering it with the default.
    pub fn set(&mut self, key: &str, encoded: &str, typ: &str) -> Result<(), SettingsError> {
        let setting = self
            .registry
            .lookup(key)
            .ok_or_else(|| SettingsError::UnknownSetting {
                key: key.to_string(),
            })?;
        self.touched.insert(key.to_string());

        let expected = setting.as_setting().typ();
        if SettingType::from_tag(typ) != Some(expected) {
            return Err(SettingsError::TypeMismatch {
                key: key.to_string(),
                expected,
                actual: typ.to_string(),
            });
        }
        setting.set_encoded(encoded)
    }

    /// Restore the default of every setting not touched by [`set`](Self::set)
    pub fn reset_remaining(&self) {
        for (key, setting) in self.registry.entries() {
            if !self.touched.contains(&key) {
                setting.set_to_default();
            }
        }
    }
}
