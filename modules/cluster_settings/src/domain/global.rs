//! Process-wide registry and its registration functions
//!
//! Settings are declared once, typically in a `Lazy` static next to the code
//! that reads them:
//!
//! ```
//! use cluster_settings::{register_non_negative_duration_setting, DurationSetting};
//! use once_cell::sync::Lazy;
//! use std::sync::Arc;
//!
//! static DRAIN_WAIT: Lazy<Arc<DurationSetting>> = Lazy::new(|| {
//!     register_non_negative_duration_setting(
//!         "doc.server.shutdown.drain_wait",
//!         "time to wait for connections to drain on shutdown",
//!         chrono::Duration::seconds(1),
//!     )
//! });
//!
//! assert_eq!(DRAIN_WAIT.get(), chrono::Duration::seconds(1));
//! ```
//!
//! Every function here panics on failure: an invalid default or a reused key
//! is a programming error, and startup must not continue past it.

use super::registry::Registry;
use super::string::StringSetting;
use super::typed::{BoolSetting, DurationSetting, FloatSetting, IntSetting};
use crate::contract::SettingsError;
use once_cell::sync::Lazy;
use std::sync::Arc;

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry
pub fn registry() -> &'static Registry {
    &REGISTRY
}

fn fatal<T>(result: Result<T, SettingsError>) -> T {
    match result {
        Ok(setting) => setting,
        Err(err) => {
            tracing::error!(key = %err.key(), error = %err, "setting registration failed");
            panic!("{err}");
        }
    }
}

/// Define a new setting with type duration
pub fn register_duration_setting(
    key: &str,
    description: &str,
    default_value: chrono::Duration,
) -> Arc<DurationSetting> {
    fatal(registry().try_register_duration_setting(key, description, default_value))
}

/// Define a new duration setting that rejects negative values
pub fn register_non_negative_duration_setting(
    key: &str,
    description: &str,
    default_value: chrono::Duration,
) -> Arc<DurationSetting> {
    fatal(registry().try_register_non_negative_duration_setting(key, description, default_value))
}

/// Define a new duration setting with a custom validator
pub fn register_validated_duration_setting<F>(
    key: &str,
    description: &str,
    default_value: chrono::Duration,
    validate_fn: F,
) -> Arc<DurationSetting>
where
    F: Fn(chrono::Duration) -> Result<(), String> + Send + Sync + 'static,
{
    fatal(registry().try_register_validated_duration_setting(
        key,
        description,
        default_value,
        validate_fn,
    ))
}

pub fn register_bool_setting(
    key: &str,
    description: &str,
    default_value: bool,
) -> Arc<BoolSetting> {
    fatal(registry().try_register_bool_setting(key, description, default_value))
}

pub fn register_int_setting(key: &str, description: &str, default_value: i64) -> Arc<IntSetting> {
    fatal(registry().try_register_int_setting(key, description, default_value))
}

pub fn register_validated_int_setting<F>(
    key: &str,
    description: &str,
    default_value: i64,
    validate_fn: F,
) -> Arc<IntSetting>
where
    F: Fn(i64) -> Result<(), String> + Send + Sync + 'static,
{
    fatal(registry().try_register_validated_int_setting(
        key,
        description,
        default_value,
        validate_fn,
    ))
}

pub fn register_float_setting(
    key: &str,
    description: &str,
    default_value: f64,
) -> Arc<FloatSetting> {
    fatal(registry().try_register_float_setting(key, description, default_value))
}

pub fn register_validated_float_setting<F>(
    key: &str,
    description: &str,
    default_value: f64,
    validate_fn: F,
) -> Arc<FloatSetting>
where
    F: Fn(f64) -> Result<(), String> + Send + Sync + 'static,
{
    fatal(registry().try_register_validated_float_setting(
        key,
        description,
        default_value,
        validate_fn,
    ))
}

pub fn register_string_setting(
    key: &str,
    description: &str,
    default_value: &str,
) -> Arc<StringSetting> {
    fatal(registry().try_register_string_setting(key, description, default_value))
}

pub fn register_validated_string_setting<F>(
    key: &str,
    description: &str,
    default_value: &str,
    validate_fn: F,
) -> Arc<StringSetting>
where
    F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
{
    fatal(registry().try_register_validated_string_setting(
        key,
        description,
        default_value,
        validate_fn,
    ))
}
