//! Contract layer - public types shared by every setting kind
//!
//! These types are what the rest of the process sees: the error enum, the
//! kind discriminator and the read-only `Setting` capability.

pub mod error;
pub mod model;
pub mod setting;

pub use error::SettingsError;
pub use model::SettingType;
pub use setting::Setting;
