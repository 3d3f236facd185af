//! Test-only helpers
//!
//! Detached settings are never registered and live only as long as the test
//! holds them. [`ScopedOverride`] temporarily replaces a setting held in an
//! `ArcSwap` slot and puts the original back when dropped.
//!
//! The constructors panic if the value has no atomic representation (a
//! duration outside the `i64` nanosecond range).

use crate::domain::{
    BoolSetting, DurationSetting, FloatSetting, IntSetting, SettingValue, StringSetting,
    TypedSetting,
};
use arc_swap::ArcSwap;
use std::sync::Arc;

fn detached<T: SettingValue>(v: T) -> Arc<TypedSetting<T>> {
    match TypedSetting::new("", "", v, None) {
        Ok(setting) => Arc::new(setting),
        Err(err) => panic!("{err}"),
    }
}

/// One-off, unregistered duration setting holding `v` (also its default)
pub fn testing_duration(v: chrono::Duration) -> Arc<DurationSetting> {
    detached(v)
}

pub fn testing_bool(v: bool) -> Arc<BoolSetting> {
    detached(v)
}

pub fn testing_int(v: i64) -> Arc<IntSetting> {
    detached(v)
}

pub fn testing_float(v: f64) -> Arc<FloatSetting> {
    detached(v)
}

pub fn testing_string(v: &str) -> Arc<StringSetting> {
    match StringSetting::new("", "", v, None) {
        Ok(setting) => Arc::new(setting),
        Err(err) => panic!("{err}"),
    }
}

/// Restores a slot's original setting when dropped
#[must_use = "the override is undone as soon as the guard is dropped"]
pub struct ScopedOverride<'a, S> {
    slot: &'a ArcSwap<S>,
    saved: Arc<S>,
}

impl<S> ScopedOverride<'_, S> {
    /// Undo the override now
    pub fn restore(self) {
        drop(self);
    }
}

impl<S> Drop for ScopedOverride<'_, S> {
    fn drop(&mut self) {
        self.slot.store(self.saved.clone());
    }
}

/// Swap `replacement` into `slot` until the returned guard is dropped
pub fn testing_override<S>(slot: &ArcSwap<S>, replacement: Arc<S>) -> ScopedOverride<'_, S> {
    let saved = slot.swap(replacement);
    ScopedOverride { slot, saved }
}

/// Replace the duration setting in `slot` with a detached one holding `v`
pub fn testing_set_duration(
    slot: &ArcSwap<DurationSetting>,
    v: chrono::Duration,
) -> ScopedOverride<'_, DurationSetting> {
    testing_override(slot, testing_duration(v))
}

pub fn testing_set_bool(slot: &ArcSwap<BoolSetting>, v: bool) -> ScopedOverride<'_, BoolSetting> {
    testing_override(slot, testing_bool(v))
}

pub fn testing_set_int(slot: &ArcSwap<IntSetting>, v: i64) -> ScopedOverride<'_, IntSetting> {
    testing_override(slot, testing_int(v))
}

pub fn testing_set_float(slot: &ArcSwap<FloatSetting>, v: f64) -> ScopedOverride<'_, FloatSetting> {
    testing_override(slot, testing_float(v))
}

pub fn testing_set_string<'a>(
    slot: &'a ArcSwap<StringSetting>,
    v: &str,
) -> ScopedOverride<'a, StringSetting> {
    testing_override(slot, testing_string(v))
}
