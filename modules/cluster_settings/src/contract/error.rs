//! Contract error types for cluster settings

use super::model::SettingType;

/// Cluster settings errors
///
/// `Validation` is the expected, recoverable failure of a write. The rest are
/// raised while registering settings or applying encoded updates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A candidate value was rejected by the setting's validator
    #[error("cannot set {key} to {value}: {reason}")]
    Validation {
        /// Setting key
        key: String,
        /// Rejected value, in its display encoding
        value: String,
        /// Validator message
        reason: String,
    },

    /// A default value failed the setting's own validator
    #[error("invalid default for {key}: {reason}")]
    InvalidDefault {
        /// Setting key
        key: String,
        /// Validator message
        reason: String,
    },

    /// A setting with the same key is already registered
    #[error("setting {key} registered twice")]
    DuplicateKey {
        /// Setting key
        key: String,
    },

    /// No setting is registered under the key
    #[error("unknown setting '{key}'")]
    UnknownSetting {
        /// Setting key
        key: String,
    },

    /// An update carried a type tag that differs from the setting's
    #[error("setting '{key}' defined as type {expected}, not {actual}")]
    TypeMismatch {
        /// Setting key
        key: String,
        /// Type of the registered setting
        expected: SettingType,
        /// Tag carried by the update
        actual: String,
    },

    /// An encoded value could not be decoded
    #[error("cannot parse {value:?} for {key}: {reason}")]
    Parse {
        /// Setting key
        key: String,
        /// Raw encoded value
        value: String,
        /// Decoder message
        reason: String,
    },
}

impl SettingsError {
    /// Key of the setting this error refers to
    pub fn key(&self) -> &str {
        match self {
            Self::Validation { key, .. }
            | Self::InvalidDefault { key, .. }
            | Self::DuplicateKey { key }
            | Self::UnknownSetting { key }
            | Self::TypeMismatch { key, .. }
            | Self::Parse { key, .. } => key,
        }
    }
}
