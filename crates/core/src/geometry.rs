//! Product, box and pallet dimensions.
//!
//! All lengths are integer millimetres. Products are rectangular; the order of
//! the raw input triple matters only when rotation is disallowed.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis permutations tried when the product may be rotated.
///
/// Each entry maps (length, width, height) to indices of the raw triple.
pub const AXIS_PERMUTATIONS: [(usize, usize, usize); 6] = [
    (0, 1, 2), // Original
    (0, 2, 1), // Rotated 90° around length
    (1, 0, 2), // Rotated 90° around height
    (1, 2, 0), // Rotated around length then height
    (2, 0, 1), // Rotated 90° around width
    (2, 1, 0), // Rotated around width then length
];

/// A length × width × height triple in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dims3 {
    /// Length (first footprint axis).
    pub length: u32,
    /// Width (second footprint axis).
    pub width: u32,
    /// Height (stacking axis).
    pub height: u32,
}

impl Dims3 {
    /// Creates a new triple.
    pub const fn new(length: u32, width: u32, height: u32) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// Returns the triple as an array.
    pub fn to_array(self) -> [u32; 3] {
        [self.length, self.width, self.height]
    }

    /// Returns the longer footprint side.
    pub fn long_side(&self) -> u32 {
        self.length.max(self.width)
    }

    /// Returns the shorter footprint side.
    pub fn short_side(&self) -> u32 {
        self.length.min(self.width)
    }

    /// Returns the footprint area in mm².
    pub fn footprint_area(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width)
    }

    /// Returns true if every axis is positive.
    pub fn is_positive(&self) -> bool {
        self.length > 0 && self.width > 0 && self.height > 0
    }
}

impl std::fmt::Display for Dims3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {} x {}", self.length, self.width, self.height)
    }
}

/// The product to be boxed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductSpec {
    /// Raw dimensions as entered (order-sensitive).
    pub dimensions: Dims3,
    /// Unit weight in grams.
    pub unit_weight_g: f64,
}

impl ProductSpec {
    /// Creates a product with the given raw dimensions and unit weight.
    pub fn new(length: u32, width: u32, height: u32, unit_weight_g: f64) -> Self {
        Self {
            dimensions: Dims3::new(length, width, height),
            unit_weight_g,
        }
    }

    /// Unit weight used by the search; non-positive weights count as 1 g.
    pub fn effective_unit_weight(&self) -> f64 {
        if self.unit_weight_g <= 0.0 {
            1.0
        } else {
            self.unit_weight_g
        }
    }

    /// Returns the orientations to try as (length, width, height).
    ///
    /// With rotation disallowed this is exactly the raw triple. Otherwise it is
    /// every distinct permutation, in [`AXIS_PERMUTATIONS`] order.
    pub fn orientations(&self, allow_rotation: bool) -> Vec<Dims3> {
        enumerate_orientations(self.dimensions, allow_rotation)
    }

    /// Validates the product.
    pub fn validate(&self) -> Result<()> {
        if !self.dimensions.is_positive() {
            return Err(Error::InvalidDimensions(format!(
                "product dimensions must be positive, got {}",
                self.dimensions
            )));
        }
        if !self.unit_weight_g.is_finite() {
            return Err(Error::InvalidConstraints(format!(
                "unit weight must be finite, got {}",
                self.unit_weight_g
            )));
        }
        Ok(())
    }
}

/// Enumerates product orientations for a raw triple.
pub fn enumerate_orientations(raw: Dims3, allow_rotation: bool) -> Vec<Dims3> {
    if !allow_rotation {
        return vec![raw];
    }

    let axes = raw.to_array();
    let mut orientations: Vec<Dims3> = Vec::with_capacity(AXIS_PERMUTATIONS.len());
    for &(l, w, h) in &AXIS_PERMUTATIONS {
        let candidate = Dims3::new(axes[l], axes[w], axes[h]);
        if !orientations.contains(&candidate) {
            orientations.push(candidate);
        }
    }
    orientations
}

/// The pallet that boxes are stacked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PalletSpec {
    /// Deck length in mm.
    pub length: u32,
    /// Deck width in mm.
    pub width: u32,
    /// Usable load height above the deck in mm.
    pub load_height: u32,
}

impl PalletSpec {
    /// Creates a pallet.
    pub const fn new(length: u32, width: u32, load_height: u32) -> Self {
        Self {
            length,
            width,
            load_height,
        }
    }

    /// Standard 1100 × 1100 pallet with 1650 mm load height.
    pub const fn standard() -> Self {
        Self::new(1100, 1100, 1650)
    }

    /// Returns the deck area in mm².
    pub fn deck_area(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width)
    }

    /// Validates the pallet.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 || self.width == 0 || self.load_height == 0 {
            return Err(Error::InvalidDimensions(format!(
                "pallet dimensions must be positive, got {} x {} x {}",
                self.length, self.width, self.load_height
            )));
        }
        Ok(())
    }
}

impl Default for PalletSpec {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_fixed() {
        let product = ProductSpec::new(180, 120, 50, 5.0);
        let orientations = product.orientations(false);
        assert_eq!(orientations, vec![Dims3::new(180, 120, 50)]);
    }

    #[test]
    fn test_orientations_all_distinct() {
        let product = ProductSpec::new(180, 120, 50, 5.0);
        let orientations = product.orientations(true);
        assert_eq!(orientations.len(), 6);
        assert_eq!(orientations[0], Dims3::new(180, 120, 50));
        assert_eq!(orientations[1], Dims3::new(180, 50, 120));
        assert_eq!(orientations[5], Dims3::new(50, 120, 180));
    }

    #[test]
    fn test_orientations_with_repeats() {
        assert_eq!(enumerate_orientations(Dims3::new(100, 100, 50), true).len(), 3);
        assert_eq!(enumerate_orientations(Dims3::new(80, 80, 80), true).len(), 1);
    }

    #[test]
    fn test_effective_unit_weight() {
        assert_eq!(ProductSpec::new(1, 1, 1, 0.0).effective_unit_weight(), 1.0);
        assert_eq!(ProductSpec::new(1, 1, 1, -3.0).effective_unit_weight(), 1.0);
        assert_eq!(ProductSpec::new(1, 1, 1, 5.5).effective_unit_weight(), 5.5);
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(matches!(
            ProductSpec::new(0, 120, 50, 5.0).validate(),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(matches!(
            PalletSpec::new(1100, 0, 1650).validate(),
            Err(Error::InvalidDimensions(_))
        ));
        assert!(ProductSpec::new(1, 2, 3, f64::NAN).validate().is_err());
        assert!(PalletSpec::standard().validate().is_ok());
    }

    #[test]
    fn test_dims_helpers() {
        let d = Dims3::new(300, 200, 150);
        assert_eq!(d.long_side(), 300);
        assert_eq!(d.short_side(), 200);
        assert_eq!(d.footprint_area(), 60_000);
        assert_eq!(d.to_string(), "300 x 200 x 150");
    }
}
