//! Cluster Settings
//!
//! Typed, runtime-updatable configuration values. Each setting is registered
//! once under a unique key, read lock-free from any thread, and written only
//! through a validated path that fires a change hook when the stored value
//! actually changes.

// Public exports
pub mod contract;
pub use contract::{Setting, SettingType, SettingsError};

pub mod domain;
pub use domain::encoding::{decode_duration, encode_duration};
pub use domain::global::{
    register_bool_setting, register_duration_setting, register_float_setting,
    register_int_setting, register_non_negative_duration_setting, register_string_setting,
    register_validated_duration_setting, register_validated_float_setting,
    register_validated_int_setting, register_validated_string_setting, registry,
};
pub use domain::{
    BoolSetting, DurationSetting, FloatSetting, IntSetting, RegisteredSetting, Registry,
    StringSetting, Updater,
};

pub mod config;
pub use config::Config;

pub mod testing;
