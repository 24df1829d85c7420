//! The four-level asset hierarchy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// One level of the subsidiary → field → station → compressor hierarchy.
///
/// Tiers are ordered: a tier's options are keyed by the ids selected in the
/// tier directly above it, and the subsidiary tier hangs off the catalog root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Subsidiary company (top of the hierarchy).
    Subsidiary,
    /// Production field.
    Field,
    /// Compressor station.
    Station,
    /// Compressor unit (bottom of the hierarchy).
    Compressor,
}

impl Tier {
    /// Number of tiers in the hierarchy.
    pub const COUNT: usize = 4;

    /// All tiers, top to bottom.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Subsidiary, Self::Field, Self::Station, Self::Compressor];

    /// Zero-based depth of this tier.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Subsidiary => 0,
            Self::Field => 1,
            Self::Station => 2,
            Self::Compressor => 3,
        }
    }

    /// Returns the tier at the given depth.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Subsidiary),
            1 => Some(Self::Field),
            2 => Some(Self::Station),
            3 => Some(Self::Compressor),
            _ => None,
        }
    }

    /// The tier directly above, or `None` for the root tier.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Subsidiary => None,
            Self::Field => Some(Self::Subsidiary),
            Self::Station => Some(Self::Field),
            Self::Compressor => Some(Self::Station),
        }
    }

    /// The tier directly below, or `None` for the leaf tier.
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Every tier strictly below this one, top to bottom.
    #[must_use]
    pub fn descendants(self) -> &'static [Self] {
        &Self::ALL[self.index() + 1..]
    }

    /// Returns the string representation of the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subsidiary => "subsidiary",
            Self::Field => "field",
            Self::Station => "station",
            Self::Compressor => "compressor",
        }
    }

    /// Parses a tier from a string, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "subsidiary" => Some(Self::Subsidiary),
            "field" => Some(Self::Field),
            "station" => Some(Self::Station),
            "compressor" => Some(Self::Compressor),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FilterError::InvalidTier(s.to_string()))
    }
}
