//! Read-only capability shared by every setting kind

use super::model::SettingType;

/// A named, typed, runtime-mutable configuration value
///
/// This trait only exposes reads. Writes go through the crate's
/// [`Updater`](crate::Updater), which funnels into each kind's validated
/// `set` path.
pub trait Setting: Send + Sync {
    /// Unique key the setting was registered under
    fn key(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Kind discriminator
    fn typ(&self) -> SettingType;

    /// Current value in its display encoding
    fn encoded(&self) -> String;

    /// Default value in its display encoding
    fn encoded_default(&self) -> String;
}
