//! Date-mode configuration for the period selector.

use serde::{Deserialize, Serialize};

/// Which years the year selector offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearSelector {
    /// The four previous years and the current one.
    Retrospective,
    /// Previous, current and next year.
    Forecast,
    /// Only the current year; the selector cannot be changed.
    CurrentReadOnly,
}

/// How the quarter selector treats the rolling 30/90 window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarterSelector {
    /// Calendar quarters only; the rolling window is not offered.
    Base,
    /// Rolling window offered and selected by default.
    Forecast,
    /// Rolling window offered; the current quarter is selected by default.
    Standard,
}

/// Sub-selectors enabled in selector mode. Any combination is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorFlags {
    /// Year selector kind, if shown.
    pub year: Option<YearSelector>,
    /// Quarter selector kind, if shown.
    pub quarter: Option<QuarterSelector>,
    /// Whether the month selector is shown.
    pub month: bool,
}

/// Date-selection mode of a toolbar. Selector and range modes are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DateMode {
    /// Year / quarter / month pickers.
    Selector(SelectorFlags),
    /// Free day range.
    Range,
}

impl DateMode {
    /// Selector mode with only a year picker.
    #[must_use]
    pub const fn year(kind: YearSelector) -> Self {
        Self::Selector(SelectorFlags {
            year: Some(kind),
            quarter: None,
            month: false,
        })
    }

    /// Selector mode with year and quarter pickers.
    #[must_use]
    pub const fn quarter(year: YearSelector, quarter: QuarterSelector) -> Self {
        Self::Selector(SelectorFlags {
            year: Some(year),
            quarter: Some(quarter),
            month: false,
        })
    }

    /// Selector mode with year and month pickers.
    #[must_use]
    pub const fn month(year: YearSelector) -> Self {
        Self::Selector(SelectorFlags {
            year: Some(year),
            quarter: None,
            month: true,
        })
    }

    /// Returns the selector flags, or `None` in range mode.
    #[must_use]
    pub const fn selector(&self) -> Option<&SelectorFlags> {
        match self {
            Self::Selector(flags) => Some(flags),
            Self::Range => None,
        }
    }

    /// Returns the quarter selector kind, if a quarter picker is shown.
    #[must_use]
    pub const fn quarter_selector(&self) -> Option<QuarterSelector> {
        match self {
            Self::Selector(flags) => flags.quarter,
            Self::Range => None,
        }
    }

    /// Returns true in free range mode.
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(self, Self::Range)
    }
}
