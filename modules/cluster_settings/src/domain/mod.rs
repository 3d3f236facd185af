//! Domain layer - atomic values, setting kinds, registry and updater

pub mod atomic;
pub mod encoding;
pub mod global;
pub mod notifier;
pub mod registry;
pub mod string;
pub mod typed;
pub mod updater;

pub use atomic::{AtomicWord, SetOutcome, ValidateFn, ValidatedAtomicValue};
pub use notifier::ChangeNotifier;
pub use registry::{RegisteredSetting, Registry};
pub use string::{StringSetting, ValidateStrFn};
pub use typed::{
    non_negative_duration, BoolSetting, DurationSetting, FloatSetting, IntSetting, SettingValue,
    TypedSetting,
};
pub use updater::Updater;
