//! Application-wide error types.
//!
//! Errors only surface at parse and configuration boundaries. The selection
//! and date engines themselves are total and degrade to empty or default
//! state instead of failing.

use thiserror::Error;

/// Result type alias using `FilterError`.
pub type FilterResult<T> = Result<T, FilterError>;

/// Filterbar error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// Unknown hierarchy tier name.
    #[error("Invalid tier: {0}")]
    InvalidTier(String),

    /// Unknown per-tier selection mode.
    #[error("Invalid selection mode: {0}")]
    InvalidSelectionMode(String),

    /// Quarter number outside 0..=4.
    #[error("Invalid quarter: {0}")]
    InvalidQuarter(u32),

    /// Month number outside 1..=12.
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),

    /// Time zone name not found in the IANA database.
    #[error("Invalid time zone: {0}")]
    InvalidTimezone(String),

    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FilterError {
    /// Returns the error code for diagnostics and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTier(_) => "INVALID_TIER",
            Self::InvalidSelectionMode(_) => "INVALID_SELECTION_MODE",
            Self::InvalidQuarter(_) => "INVALID_QUARTER",
            Self::InvalidMonth(_) => "INVALID_MONTH",
            Self::InvalidTimezone(_) => "INVALID_TIMEZONE",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<config::ConfigError> for FilterError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
