//! Contract models for cluster settings

use std::fmt;

/// Kind of a setting, rendered as a one-character tag
///
/// The tag travels alongside encoded values so that a generic updater can
/// refuse to apply, say, an integer update to a duration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    /// `b`
    Bool,
    /// `i`
    Int,
    /// `f`
    Float,
    /// `d`
    Duration,
    /// `s`
    String,
}

impl SettingType {
    /// The one-character tag for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "b",
            Self::Int => "i",
            Self::Float => "f",
            Self::Duration => "d",
            Self::String => "s",
        }
    }

    /// Parse a one-character tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "b" => Some(Self::Bool),
            "i" => Some(Self::Int),
            "f" => Some(Self::Float),
            "d" => Some(Self::Duration),
            "s" => Some(Self::String),
            _ => None,
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
