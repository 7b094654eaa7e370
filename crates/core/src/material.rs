//! Corrugated board materials.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Corrugated board construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FluteKind {
    /// A-flute, 5 mm board.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "a"))]
    AFlute,
    /// B-flute, 3 mm board.
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    BFlute,
    /// AB double wall, 8 mm board.
    #[cfg_attr(feature = "serde", serde(rename = "ab"))]
    AbFlute,
}

impl FluteKind {
    /// All flute kinds in table order.
    pub const ALL: [FluteKind; 3] = [Self::AFlute, Self::BFlute, Self::AbFlute];

    /// Conventional box margin (walls and flaps) for this board, in mm.
    pub fn default_margin(&self) -> u32 {
        match self {
            Self::AFlute => 10,
            Self::BFlute => 14,
            Self::AbFlute => 24,
        }
    }

    /// Short display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AFlute => "A-Flute",
            Self::BFlute => "B-Flute",
            Self::AbFlute => "AB-Flute",
        }
    }
}

impl std::str::FromStr for FluteKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "a-flute" => Ok(Self::AFlute),
            "b" | "b-flute" => Ok(Self::BFlute),
            "ab" | "ab-flute" => Ok(Self::AbFlute),
            other => Err(format!("unknown flute kind '{}'", other)),
        }
    }
}

impl std::fmt::Display for FluteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strength inputs for one board kind.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaterialProfile {
    /// Edge crush test coefficient.
    pub ect: f64,
    /// Board caliper in mm.
    pub caliper: f64,
}

impl MaterialProfile {
    /// Creates a profile.
    pub const fn new(ect: f64, caliper: f64) -> Self {
        Self { ect, caliper }
    }
}

/// Immutable flute → profile lookup.
///
/// Kinds missing from the table have no strength; boxes made of them are
/// rated with zero compression capacity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialTable {
    profiles: BTreeMap<FluteKind, MaterialProfile>,
}

impl MaterialTable {
    /// Creates a table from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (FluteKind, MaterialProfile)>) -> Self {
        Self {
            profiles: entries.into_iter().collect(),
        }
    }

    /// Looks up the profile for a flute kind.
    pub fn get(&self, kind: FluteKind) -> Option<&MaterialProfile> {
        self.profiles.get(&kind)
    }

    /// Iterates over entries in flute order.
    pub fn iter(&self) -> impl Iterator<Item = (FluteKind, &MaterialProfile)> {
        self.profiles.iter().map(|(k, p)| (*k, p))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::from_entries([
            (FluteKind::AFlute, MaterialProfile::new(5.0, 5.0)),
            (FluteKind::BFlute, MaterialProfile::new(4.0, 3.0)),
            (FluteKind::AbFlute, MaterialProfile::new(7.0, 8.0)),
        ])
    }
}
