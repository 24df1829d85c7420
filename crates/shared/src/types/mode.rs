//! Per-tier selection modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tier::Tier;
use crate::error::FilterError;

/// How a tier's selector accepts values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The tier has no selector on this toolbar.
    #[default]
    None,
    /// One value; picking it commits immediately.
    Single,
    /// Many values; edits are batched and committed when the selector closes.
    Multiple,
}

impl SelectionMode {
    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    /// Returns true if the tier has a selector at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            _ => Err(FilterError::InvalidSelectionMode(s.to_string())),
        }
    }
}

/// Selection mode for each tier, fixed for a toolbar's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierModes {
    /// Subsidiary selector mode.
    pub subsidiary: SelectionMode,
    /// Field selector mode.
    pub field: SelectionMode,
    /// Station selector mode.
    pub station: SelectionMode,
    /// Compressor selector mode.
    pub compressor: SelectionMode,
}

impl TierModes {
    /// Uses the same mode for every tier.
    #[must_use]
    pub const fn uniform(mode: SelectionMode) -> Self {
        Self {
            subsidiary: mode,
            field: mode,
            station: mode,
            compressor: mode,
        }
    }

    /// Returns the mode configured for `tier`.
    #[must_use]
    pub const fn get(&self, tier: Tier) -> SelectionMode {
        match tier {
            Tier::Subsidiary => self.subsidiary,
            Tier::Field => self.field,
            Tier::Station => self.station,
            Tier::Compressor => self.compressor,
        }
    }

    /// Returns a copy with `tier` switched to `mode`.
    #[must_use]
    pub fn with(mut self, tier: Tier, mode: SelectionMode) -> Self {
        match tier {
            Tier::Subsidiary => self.subsidiary = mode,
            Tier::Field => self.field = mode,
            Tier::Station => self.station = mode,
            Tier::Compressor => self.compressor = mode,
        }
        self
    }
}
