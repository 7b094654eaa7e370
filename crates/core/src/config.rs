//! Search configuration and per-request constraints.
//!
//! [`SearchConfig`] carries the heuristic constants of the engine. Every one of
//! them has a `DEFAULT_*` constant and a builder method so that calibration can
//! be done deliberately. [`SearchConstraints`] carries what the caller asks for
//! on a single request: margin, material, quantity and weight limits.

use crate::material::{FluteKind, MaterialTable};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Heuristic constants and engine switches.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Strength table used by the compression model.
    pub materials: MaterialTable,

    /// Smallest pallet division factor per axis.
    pub min_division: u32,

    /// Largest pallet division factor per axis.
    pub max_division: u32,

    /// Number of column (and row) counts tried below the maximum, inclusive.
    pub count_window: u32,

    /// Maximum stable box height as a fraction of its long footprint side.
    pub stability_ratio: f64,

    /// Maximum long/short ratio of the outer box footprint.
    pub max_aspect_ratio: f64,

    /// How far (mm) the box height may exceed a grid cell edge.
    pub shape_tolerance: u32,

    /// Maximum length/width difference (mm) of a layer that still counts as square.
    pub near_square_tolerance: u32,

    /// Maximum length/width difference (mm) of a box that may rotate in place.
    pub box_rotation_tolerance: u32,

    /// Safety factor below which a stack is flagged unsafe.
    pub safety_threshold: f64,

    /// Lower bound for the stacking load, so a bottom box never carries zero.
    pub min_stack_load: f64,

    /// Score bonus for rotation interlock patterns.
    pub interlock_bonus: i64,

    /// Score bonus for pinwheel patterns.
    pub pinwheel_bonus: i64,

    /// Score penalty for unsafe stacks.
    pub unsafe_penalty: i64,

    /// Maximum number of ranked configurations returned.
    pub max_results: usize,

    /// Box weight ceiling (g) used when the caller sets none.
    pub unlimited_box_weight_g: f64,

    /// Evaluate grid cells on the rayon thread pool.
    pub parallel: bool,
}

impl SearchConfig {
    /// Smallest pallet division per axis.
    pub const DEFAULT_MIN_DIVISION: u32 = 2;
    /// Largest pallet division per axis.
    pub const DEFAULT_MAX_DIVISION: u32 = 6;
    /// Unit counts tried per axis, down from the maximum.
    pub const DEFAULT_COUNT_WINDOW: u32 = 3;
    /// Box height limit as a fraction of its long side.
    pub const DEFAULT_STABILITY_RATIO: f64 = 0.6;
    /// Largest long-to-short side ratio of a box footprint.
    pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 3.0;
    /// Slack (mm) allowed when a box is taller than its grid cell.
    pub const DEFAULT_SHAPE_TOLERANCE: u32 = 5;
    /// Layer side difference (mm) still counted as square.
    pub const DEFAULT_NEAR_SQUARE_TOLERANCE: u32 = 20;
    /// Box side difference (mm) still counted as square.
    pub const DEFAULT_BOX_ROTATION_TOLERANCE: u32 = 5;
    /// Safety factor below which a stack is unsafe.
    pub const DEFAULT_SAFETY_THRESHOLD: f64 = 3.0;
    /// Floor for the stacked load (kg) in the safety factor.
    pub const DEFAULT_MIN_STACK_LOAD: f64 = 0.1;
    /// Score bonus for rotated grid patterns.
    pub const DEFAULT_INTERLOCK_BONUS: i64 = 15;
    /// Score bonus for pinwheel patterns.
    pub const DEFAULT_PINWHEEL_BONUS: i64 = 20;
    /// Score penalty for unsafe stacks.
    pub const DEFAULT_UNSAFE_PENALTY: i64 = 500;
    /// Ranked configurations returned.
    pub const DEFAULT_MAX_RESULTS: usize = 12;
    /// Box weight ceiling (g) when none is given.
    pub const DEFAULT_UNLIMITED_BOX_WEIGHT_G: f64 = 999_999.0;

    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the material strength table.
    pub fn with_materials(mut self, materials: MaterialTable) -> Self {
        self.materials = materials;
        self
    }

    /// Sets the inclusive pallet division range.
    pub fn with_division_range(mut self, min: u32, max: u32) -> Self {
        self.min_division = min;
        self.max_division = max;
        self
    }

    /// Sets the count window size.
    pub fn with_count_window(mut self, window: u32) -> Self {
        self.count_window = window.max(1);
        self
    }

    /// Sets the stability ratio.
    pub fn with_stability_ratio(mut self, ratio: f64) -> Self {
        self.stability_ratio = ratio;
        self
    }

    /// Sets the maximum footprint aspect ratio.
    pub fn with_max_aspect_ratio(mut self, ratio: f64) -> Self {
        self.max_aspect_ratio = ratio;
        self
    }

    /// Sets the shape-consistency tolerance in mm.
    pub fn with_shape_tolerance(mut self, mm: u32) -> Self {
        self.shape_tolerance = mm;
        self
    }

    /// Sets the near-square layer tolerance in mm.
    pub fn with_near_square_tolerance(mut self, mm: u32) -> Self {
        self.near_square_tolerance = mm;
        self
    }

    /// Sets the box-rotation tolerance in mm.
    pub fn with_box_rotation_tolerance(mut self, mm: u32) -> Self {
        self.box_rotation_tolerance = mm;
        self
    }

    /// Sets the safety threshold.
    pub fn with_safety_threshold(mut self, threshold: f64) -> Self {
        self.safety_threshold = threshold;
        self
    }

    /// Sets the score weights: interlock bonus, pinwheel bonus, unsafe penalty.
    pub fn with_score_weights(mut self, interlock: i64, pinwheel: i64, unsafe_penalty: i64) -> Self {
        self.interlock_bonus = interlock;
        self.pinwheel_bonus = pinwheel;
        self.unsafe_penalty = unsafe_penalty;
        self
    }

    /// Sets the number of returned configurations.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    /// Enables or disables parallel cell evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.min_division == 0 || self.min_division > self.max_division {
            return Err(Error::ConfigError(format!(
                "division range {}..={} is empty or starts at zero",
                self.min_division, self.max_division
            )));
        }
        if self.count_window == 0 {
            return Err(Error::ConfigError("count window must be at least 1".into()));
        }
        for (name, value) in [
            ("stability_ratio", self.stability_ratio),
            ("max_aspect_ratio", self.max_aspect_ratio),
            ("min_stack_load", self.min_stack_load),
            ("unlimited_box_weight_g", self.unlimited_box_weight_g),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::ConfigError(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.safety_threshold.is_finite() || self.safety_threshold < 0.0 {
            return Err(Error::ConfigError(format!(
                "safety_threshold must be non-negative, got {}",
                self.safety_threshold
            )));
        }
        if self.max_results == 0 {
            return Err(Error::ConfigError("max_results must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            materials: MaterialTable::default(),
            min_division: Self::DEFAULT_MIN_DIVISION,
            max_division: Self::DEFAULT_MAX_DIVISION,
            count_window: Self::DEFAULT_COUNT_WINDOW,
            stability_ratio: Self::DEFAULT_STABILITY_RATIO,
            max_aspect_ratio: Self::DEFAULT_MAX_ASPECT_RATIO,
            shape_tolerance: Self::DEFAULT_SHAPE_TOLERANCE,
            near_square_tolerance: Self::DEFAULT_NEAR_SQUARE_TOLERANCE,
            box_rotation_tolerance: Self::DEFAULT_BOX_ROTATION_TOLERANCE,
            safety_threshold: Self::DEFAULT_SAFETY_THRESHOLD,
            min_stack_load: Self::DEFAULT_MIN_STACK_LOAD,
            interlock_bonus: Self::DEFAULT_INTERLOCK_BONUS,
            pinwheel_bonus: Self::DEFAULT_PINWHEEL_BONUS,
            unsafe_penalty: Self::DEFAULT_UNSAFE_PENALTY,
            max_results: Self::DEFAULT_MAX_RESULTS,
            unlimited_box_weight_g: Self::DEFAULT_UNLIMITED_BOX_WEIGHT_G,
            parallel: false,
        }
    }
}

/// What the caller asks for on one request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConstraints {
    /// Box margin (walls and flaps) added to every inner axis, in mm.
    pub margin: u32,
    /// Board used for the box.
    pub material: FluteKind,
    /// Minimum units per box.
    pub min_qty: u32,
    /// Maximum units per box.
    pub max_qty: u32,
    /// Maximum gross box weight in grams; non-positive means unlimited.
    pub max_box_weight_g: f64,
    /// Whether the product may be turned onto another face.
    pub allow_rotation: bool,
}

impl SearchConstraints {
    /// Creates constraints for a board kind, using its conventional margin.
    pub fn new(material: FluteKind) -> Self {
        Self {
            margin: material.default_margin(),
            material,
            min_qty: 10,
            max_qty: 100,
            max_box_weight_g: 0.0,
            allow_rotation: true,
        }
    }

    /// Overrides the box margin.
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the inclusive per-box quantity range.
    pub fn with_quantity_range(mut self, min_qty: u32, max_qty: u32) -> Self {
        self.min_qty = min_qty;
        self.max_qty = max_qty;
        self
    }

    /// Sets the per-box weight ceiling in grams.
    pub fn with_max_box_weight(mut self, grams: f64) -> Self {
        self.max_box_weight_g = grams;
        self
    }

    /// Allows or forbids product rotation.
    pub fn with_rotation(mut self, allow: bool) -> Self {
        self.allow_rotation = allow;
        self
    }

    /// Weight ceiling used by the search, substituting `unlimited` for
    /// non-positive values.
    pub fn effective_max_box_weight(&self, unlimited: f64) -> f64 {
        if self.max_box_weight_g <= 0.0 {
            unlimited
        } else {
            self.max_box_weight_g
        }
    }

    /// Validates the constraints.
    pub fn validate(&self) -> Result<()> {
        if !self.max_box_weight_g.is_finite() {
            return Err(Error::InvalidConstraints(format!(
                "box weight ceiling must be finite, got {}",
                self.max_box_weight_g
            )));
        }
        Ok(())
    }
}

impl Default for SearchConstraints {
    fn default() -> Self {
        Self::new(FluteKind::default())
    }
}
