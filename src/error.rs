//! Error types.
//!
//! The computation core only ever produces [`ReliabilityError::InvalidParameter`].
//! The remaining variants come from the export and configuration layers.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum ReliabilityError {
    /// An input is outside the domain of the exponential model, or text
    /// supplied for it is not a number.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name (`mtbf`, `t`, `sample_count`, ...).
        name: &'static str,
        /// The offending value, rendered as text.
        value: String,
        /// What constraint was violated.
        reason: &'static str,
    },

    /// Writing a record or an image failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A settings file could not be parsed.
    #[error("config error")]
    Config(#[from] toml::de::Error),

    /// A curve could not be serialized.
    #[error("serialization error")]
    Serialization(#[from] serde_json::Error),
}

impl ReliabilityError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Returns `true` for [`ReliabilityError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReliabilityError>;
