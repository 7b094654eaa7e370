//! Candidate configurations and search results.

use crate::geometry::{Dims3, PalletSpec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interlock behaviour of a plain grid layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Interlock {
    /// Every pallet layer repeats the same grid.
    NoInterlock,
    /// The whole division pattern turns 90° on alternate layers.
    PatternRotation,
    /// Individual boxes turn 90° on alternate layers.
    BoxRotation,
}

impl Interlock {
    /// Returns true for the rotating kinds.
    pub fn is_rotation(&self) -> bool {
        !matches!(self, Self::NoInterlock)
    }
}

/// How boxes are arranged on one pallet layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Pattern {
    /// `div_x × div_y` boxes in a regular grid.
    Grid {
        /// Divisions along the pallet length.
        div_x: u32,
        /// Divisions along the pallet width.
        div_y: u32,
        /// Alternate-layer behaviour.
        interlock: Interlock,
    },
    /// Four groups of `rings` boxes turning around the pallet centre.
    Pinwheel {
        /// Ring expansion depth (k).
        rings: u32,
    },
}

impl Pattern {
    /// Number of boxes on one pallet layer.
    pub fn yield_per_layer(&self) -> u32 {
        match *self {
            Self::Grid { div_x, div_y, .. } => div_x * div_y,
            Self::Pinwheel { rings } => 4 * rings,
        }
    }

    /// Display label of the pattern.
    pub fn label(&self) -> PatternLabel {
        match *self {
            Self::Grid { interlock, .. } => match interlock {
                Interlock::NoInterlock => PatternLabel::NoInterlock,
                Interlock::PatternRotation => PatternLabel::PatternRotation,
                Interlock::BoxRotation => PatternLabel::BoxRotation,
            },
            Self::Pinwheel { rings } if rings > 1 => PatternLabel::ExpandedPinwheel,
            Self::Pinwheel { .. } => PatternLabel::Pinwheel,
        }
    }

    /// Returns true for pinwheel patterns.
    pub fn is_pinwheel(&self) -> bool {
        matches!(self, Self::Pinwheel { .. })
    }
}

/// Flat label used for reporting and deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PatternLabel {
    NoInterlock,
    PatternRotation,
    BoxRotation,
    Pinwheel,
    ExpandedPinwheel,
}

impl PatternLabel {
    /// Returns true for the alternating-rotation grid labels.
    pub fn is_rotation(&self) -> bool {
        matches!(self, Self::PatternRotation | Self::BoxRotation)
    }

    /// Returns true for both pinwheel labels.
    pub fn is_pinwheel(&self) -> bool {
        matches!(self, Self::Pinwheel | Self::ExpandedPinwheel)
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoInterlock => "No Interlock",
            Self::PatternRotation => "Pattern Rotation",
            Self::BoxRotation => "Box Rotation",
            Self::Pinwheel => "Pinwheel",
            Self::ExpandedPinwheel => "Expanded Pinwheel",
        }
    }
}

impl std::fmt::Display for PatternLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compression strength verdict for the bottom box of a stack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrengthResult {
    /// Box compression capacity (BCT).
    pub capacity: f64,
    /// Load carried by the bottom box (kg).
    pub load: f64,
    /// `capacity / load`.
    pub safety_factor: f64,
    /// Safety factor below the threshold.
    pub is_unsafe: bool,
}

/// How units sit inside one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackingDetail {
    /// Unit footprint used inside the box, plus unit height.
    pub unit: Dims3,
    /// Units along the box length.
    pub columns: u32,
    /// Units along the box width.
    pub rows: u32,
    /// Unit layers inside the box.
    pub layers: u32,
}

impl PackingDetail {
    /// Units per box.
    pub fn quantity(&self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows) * u64::from(self.layers)
    }
}

/// One feasible box and pallet arrangement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateConfiguration {
    /// Layer pattern.
    pub pattern: Pattern,
    /// Product orientation used, as (length, width, height).
    pub product_orientation: Dims3,
    /// Outer box dimensions.
    pub outer: Dims3,
    /// Inner (usable) box dimensions.
    pub inner: Dims3,
    /// In-box packing.
    pub packing: PackingDetail,
    /// Units per box.
    pub qty: u32,
    /// Boxes per pallet layer.
    pub yield_per_layer: u32,
    /// Box layers on the pallet.
    pub pallet_layers: u32,
    /// Units on the whole pallet.
    pub total: u64,
    /// Pallet deck coverage of one layer, in percent.
    pub efficiency: f64,
    /// Gross weight of one box, in kg.
    pub box_weight_kg: f64,
    /// Stack strength verdict.
    pub strength: StrengthResult,
    /// Effective load footprint (length, width) and stack height.
    pub load: Dims3,
}

impl CandidateConfiguration {
    /// Display label of the pattern.
    pub fn label(&self) -> PatternLabel {
        self.pattern.label()
    }

    /// Returns the outer footprint aspect ratio (long / short).
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.outer.long_side()) / f64::from(self.outer.short_side())
    }

    /// Returns true if the stack is flagged unsafe.
    pub fn is_unsafe(&self) -> bool {
        self.strength.is_unsafe
    }
}

/// A configuration with its score and 1-based rank.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedConfiguration {
    /// Position in the result (1 = best).
    pub rank: usize,
    /// Ranking score.
    pub score: i64,
    /// The configuration.
    pub configuration: CandidateConfiguration,
}

/// Counters collected during one search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchStats {
    /// Product orientations tried.
    pub orientations: usize,
    /// Orientation × division cells visited.
    pub cells: usize,
    /// (columns, rows) packings evaluated.
    pub packings: usize,
    /// Candidates accepted before deduplication.
    pub accepted: usize,
    /// Candidates left after deduplication.
    pub unique: usize,
}

/// Result of a configuration search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    /// Ranked configurations, best first.
    pub configurations: Vec<RankedConfiguration>,

    /// Pallet the search ran against.
    pub pallet: PalletSpec,

    /// Search counters.
    pub stats: SearchStats,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl SearchResult {
    /// Creates an empty result for a pallet.
    pub fn new(pallet: PalletSpec) -> Self {
        Self {
            configurations: Vec::new(),
            pallet,
            stats: SearchStats::default(),
            computation_time_ms: 0,
        }
    }

    /// Returns true if at least one configuration was found.
    pub fn is_feasible(&self) -> bool {
        !self.configurations.is_empty()
    }

    /// Number of returned configurations.
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// Returns true if nothing was found.
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Best configuration, if any.
    pub fn best(&self) -> Option<&RankedConfiguration> {
        self.configurations.first()
    }

    /// Configuration at a 1-based rank.
    pub fn by_rank(&self, rank: usize) -> Option<&RankedConfiguration> {
        rank.checked_sub(1).and_then(|i| self.configurations.get(i))
    }

    /// Iterates over the configurations in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateConfiguration> {
        self.configurations.iter().map(|r| &r.configuration)
    }
}
