//! Scalar settings backed by a single atomic word
//!
//! [`TypedSetting`] composes a key, a description and a default with a
//! [`ValidatedAtomicValue`]. The public kinds are aliases:
//! [`DurationSetting`], [`BoolSetting`], [`IntSetting`] and [`FloatSetting`].

use super::atomic::{AtomicWord, SetOutcome, ValidateFn, ValidatedAtomicValue};
use super::encoding::{decode_duration, encode_duration};
use super::registry::RegisteredSetting;
use crate::contract::{Setting, SettingType, SettingsError};
use std::fmt;
use std::sync::Arc;

/// A scalar type that can back a setting
pub trait SettingValue: AtomicWord + PartialEq + fmt::Debug {
    /// Kind discriminator for settings of this type
    const TYPE: SettingType;

    /// Display encoding
    fn encode(self) -> String;

    /// Inverse of [`SettingValue::encode`], also used for operator input
    fn decode(s: &str) -> Result<Self, String>;

    /// Wrap a setting of this type for the registry
    fn into_registered(setting: Arc<TypedSetting<Self>>) -> RegisteredSetting;
}

impl SettingValue for chrono::Duration {
    const TYPE: SettingType = SettingType::Duration;

    fn encode(self) -> String {
        encode_duration(self)
    }

    fn decode(s: &str) -> Result<Self, String> {
        decode_duration(s)
    }

    fn into_registered(setting: Arc<TypedSetting<Self>>) -> RegisteredSetting {
        RegisteredSetting::Duration(setting)
    }
}

impl SettingValue for bool {
    const TYPE: SettingType = SettingType::Bool;

    fn encode(self) -> String {
        self.to_string()
    }

    fn decode(s: &str) -> Result<Self, String> {
        match s.trim() {
            "on" => Ok(true),
            "off" => Ok(false),
            other => other.parse().map_err(|e: std::str::ParseBoolError| e.to_string()),
        }
    }

    fn into_registered(setting: Arc<TypedSetting<Self>>) -> RegisteredSetting {
        RegisteredSetting::Bool(setting)
    }
}

impl SettingValue for i64 {
    const TYPE: SettingType = SettingType::Int;

    fn encode(self) -> String {
        self.to_string()
    }

    fn decode(s: &str) -> Result<Self, String> {
        s.trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| e.to_string())
    }

    fn into_registered(setting: Arc<TypedSetting<Self>>) -> RegisteredSetting {
        RegisteredSetting::Int(setting)
    }
}

impl SettingValue for f64 {
    const TYPE: SettingType = SettingType::Float;

    fn encode(self) -> String {
        self.to_string()
    }

    fn decode(s: &str) -> Result<Self, String> {
        s.trim()
            .parse()
            .map_err(|e: std::num::ParseFloatError| e.to_string())
    }

    fn into_registered(setting: Arc<TypedSetting<Self>>) -> RegisteredSetting {
        RegisteredSetting::Float(setting)
    }
}

/// Setting of kind "duration" (`d`)
pub type DurationSetting = TypedSetting<chrono::Duration>;
/// Setting of kind "bool" (`b`)
pub type BoolSetting = TypedSetting<bool>;
/// Setting of kind "int" (`i`)
pub type IntSetting = TypedSetting<i64>;
/// Setting of kind "float" (`f`)
pub type FloatSetting = TypedSetting<f64>;

/// Validator rejecting negative durations
pub fn non_negative_duration() -> ValidateFn<chrono::Duration> {
    Box::new(|v| {
        if v < chrono::Duration::zero() {
            Err("cannot be negative".to_string())
        } else {
            Ok(())
        }
    })
}

/// A registered scalar setting
///
/// The stored slot is initialized to the default at construction, so `get`
/// returns the default until the first successful write.
pub struct TypedSetting<T: SettingValue> {
    key: String,
    description: String,
    default_value: T,
    value: ValidatedAtomicValue<T>,
}

impl<T: SettingValue> TypedSetting<T> {
    /// Build a setting; fails with `InvalidDefault` if `default_value` is rejected
    pub(crate) fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        default_value: T,
        validate_fn: Option<ValidateFn<T>>,
    ) -> Result<Self, SettingsError> {
        let key = key.into();
        let value = ValidatedAtomicValue::new(default_value, validate_fn).map_err(|reason| {
            SettingsError::InvalidDefault {
                key: key.clone(),
                reason,
            }
        })?;
        Ok(Self {
            key,
            description: description.into(),
            default_value,
            value,
        })
    }

    /// Current value; a single atomic load
    #[inline]
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Default value
    pub fn default_value(&self) -> T {
        self.default_value
    }

    /// Check `v` against the validator without touching stored state
    pub fn validate(&self, v: T) -> Result<(), SettingsError> {
        self.value
            .validate(v)
            .map_err(|reason| self.validation_error(v, reason))
    }

    /// Attach a change hook and return the setting, for chaining at registration
    ///
    /// The hook takes no arguments; it should call [`TypedSetting::get`] to
    /// observe the value that triggered it (or a newer one).
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
        self.value.notifier().attach(f);
    }

    /// Validate and store `v`, running the change hook if the value changed
    pub(crate) fn set(&self, v: T) -> Result<(), SettingsError> {
        match self.value.set(v) {
            Ok(SetOutcome::Changed) => {
                tracing::debug!(key = %self.key, value = %v.encode(), "setting changed");
                Ok(())
            }
            Ok(SetOutcome::Unchanged) => Ok(()),
            Err(reason) => Err(self.validation_error(v, reason)),
        }
    }

    /// Restore the default value
    ///
    /// # Panics
    ///
    /// If the default no longer passes validation. The default was checked at
    /// construction, so this is an invariant violation, not bad input.
    pub(crate) fn set_to_default(&self) {
        if let Err(err) = self.set(self.default_value) {
            tracing::error!(key = %self.key, error = %err, "default rejected by own validator");
            panic!("{err}");
        }
    }

    /// Decode `encoded` and [`set`](Self::set) it
    pub(crate) fn set_encoded(&self, encoded: &str) -> Result<(), SettingsError> {
        let v = T::decode(encoded).map_err(|reason| SettingsError::Parse {
            key: self.key.clone(),
            value: encoded.to_string(),
            reason,
        })?;
        self.set(v)
    }

    fn validation_error(&self, v: T, reason: String) -> SettingsError {
        SettingsError::Validation {
            key: self.key.clone(),
            value: v.encode(),
            reason,
        }
    }
}

impl<T: SettingValue> Setting for TypedSetting<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn typ(&self) -> SettingType {
        T::TYPE
    }

    fn encoded(&self) -> String {
        self.get().encode()
    }

    fn encoded_default(&self) -> String {
        self.default_value.encode()
    }
}

impl<T: SettingValue> fmt::Display for TypedSetting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get().encode())
    }
}

impl<T: SettingValue> fmt::Debug for TypedSetting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSetting")
            .field("key", &self.key)
            .field("typ", &T::TYPE)
            .field("default_value", &self.default_value)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_hook(setting: &DurationSetting) -> Arc<AtomicUsize> {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        setting.set_on_change(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        fired
    }

    #[test]
    fn test_non_negative_scenario() {
        let setting = DurationSetting::new(
            "server.time_until_store_dead",
            "time after which a silent store is considered dead",
            Duration::seconds(1),
            Some(non_negative_duration()),
        )
        .unwrap();
        let fired = counting_hook(&setting);
        assert_eq!(setting.get(), Duration::seconds(1));

        let err = setting.set(Duration::seconds(-1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot set server.time_until_store_dead to -1s: cannot be negative"
        );
        assert_eq!(setting.get(), Duration::seconds(1));
        assert_eq!(setting.to_string(), "1s");

        setting.set(Duration::seconds(5)).unwrap();
        assert_eq!(setting.get(), Duration::seconds(5));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        setting.set(Duration::seconds(5)).unwrap();
        assert_eq!(setting.get(), Duration::seconds(5));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_default_is_rejected() {
        let err = DurationSetting::new(
            "kv.lease.duration",
            "lease length",
            Duration::seconds(-3),
            Some(non_negative_duration()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SettingsError::InvalidDefault {
                key: "kv.lease.duration".to_string(),
                reason: "cannot be negative".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_is_pure() {
        let setting =
            DurationSetting::new("a", "", Duration::zero(), Some(non_negative_duration())).unwrap();
        assert!(setting.validate(Duration::seconds(10)).is_ok());
        assert!(setting.validate(Duration::seconds(-10)).is_err());
        assert_eq!(setting.get(), Duration::zero());
    }

    #[test]
    fn test_set_to_default_restores_default() {
        let setting = DurationSetting::new("a", "", Duration::minutes(2), None).unwrap();
        let fired = counting_hook(&setting);
        setting.set(Duration::seconds(3)).unwrap();
        setting.set_to_default();
        assert_eq!(setting.get(), Duration::minutes(2));
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        setting.set_to_default();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_set_encoded_parses_and_validates() {
        let setting =
            DurationSetting::new("a", "", Duration::zero(), Some(non_negative_duration())).unwrap();
        setting.set_encoded("1m 30s").unwrap();
        assert_eq!(setting.get(), Duration::seconds(90));

        let err = setting.set_encoded("soon").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "{err:?}");

        let err = setting.set_encoded("-2s").unwrap_err();
        assert!(matches!(err, SettingsError::Validation { .. }), "{err:?}");
        assert_eq!(setting.get(), Duration::seconds(90));
    }

    #[test]
    fn test_encoded_round_trips() {
        let setting = DurationSetting::new("a", "", Duration::milliseconds(1234), None).unwrap();
        assert_eq!(decode_duration(&setting.encoded()), Ok(setting.get()));
        assert_eq!(setting.encoded_default(), "1s 234ms");
    }

    #[test]
    fn test_on_change_chains() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = fired.clone();
        let setting = Arc::new(BoolSetting::new("b", "", false, None).unwrap()).on_change(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        setting.set(true).unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_type_tags() {
        let d = DurationSetting::new("d", "", Duration::zero(), None).unwrap();
        let b = BoolSetting::new("b", "", false, None).unwrap();
        let i = IntSetting::new("i", "", 0, None).unwrap();
        let f = FloatSetting::new("f", "", 0.0, None).unwrap();
        assert_eq!(d.typ().as_str(), "d");
        assert_eq!(b.typ().as_str(), "b");
        assert_eq!(i.typ().as_str(), "i");
        assert_eq!(f.typ().as_str(), "f");
    }

    #[test]
    fn test_bool_accepts_on_off() {
        assert_eq!(bool::decode("on"), Ok(true));
        assert_eq!(bool::decode("off"), Ok(false));
        assert_eq!(bool::decode("true"), Ok(true));
        assert!(bool::decode("yes").is_err());
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_values() {
        let written: Vec<Duration> = (1..=500)
            .map(|i| Duration::nanoseconds(i * 1_000_003))
            .collect();
        let setting = DurationSetting::new("a", "", Duration::seconds(1), None).unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..5_000 {
                        let v = setting.get();
                        assert!(v == Duration::seconds(1) || written.contains(&v), "{v:?}");
                    }
                });
            }
            s.spawn(|| {
                for v in &written {
                    setting.set(*v).unwrap();
                }
            });
        });
        assert_eq!(setting.get(), *written.last().unwrap());
    }
}
