//! Color and configuration error types

use thiserror::Error;

/// Color literal result type
pub type ColorResult<T> = Result<T, ColorError>;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while decoding a single color literal.
///
/// These never abort a transform: the rewriter turns them into
/// [`ColorValue::Unrecognized`](crate::ColorValue::Unrecognized) and a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {literal}")]
    InvalidHex { literal: String },

    #[error("Invalid RGB color: {literal}")]
    InvalidRgb { literal: String },

    #[error("Invalid HSL color: {literal}")]
    InvalidHsl { literal: String },

    #[error("Unrecognized color notation: {literal}")]
    UnknownNotation { literal: String },
}

impl ColorError {
    pub fn invalid_hex(literal: impl Into<String>) -> Self {
        Self::InvalidHex { literal: literal.into() }
    }

    pub fn invalid_rgb(literal: impl Into<String>) -> Self {
        Self::InvalidRgb { literal: literal.into() }
    }

    pub fn invalid_hsl(literal: impl Into<String>) -> Self {
        Self::InvalidHsl { literal: literal.into() }
    }

    pub fn unknown_notation(literal: impl Into<String>) -> Self {
        Self::UnknownNotation { literal: literal.into() }
    }
}

/// Errors raised while building a [`Config`](crate::Config)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Percentage {value} is outside 0..=1")]
    PercentageOutOfRange { value: f64 },

    #[error("Invalid percentage '{input}'")]
    InvalidPercentage { input: String },

    #[error("Selector scope needs at least one token")]
    EmptyScope,

    #[error("Scoped property name must not be empty")]
    EmptyProperty,

    #[error("Property allow-list is empty")]
    EmptyAllowList,

    #[error("Invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),
}
