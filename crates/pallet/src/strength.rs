//! Box compression strength and stack safety.
//!
//! Capacity follows the McKee-style short form
//! `BCT = 5.87 · ECT · sqrt(t · P)` with `P` the outer perimeter. The result
//! is then divided by [`STANDARD_GRAVITY`] and scaled by [`MASS_SCALE`]. The
//! pair is not a clean newton → kilogram conversion; ratings depend on it
//! exactly as written.

use u_palletize_core::{FluteKind, MaterialTable, SearchConfig, StrengthResult};

/// Empirical coefficient of the short-form compression formula.
pub const BCT_COEFFICIENT: f64 = 5.87;

/// Standard gravity (m/s²) used to turn the force into a mass equivalent.
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Scale applied after the gravity division.
pub const MASS_SCALE: f64 = 1000.0;

/// Compression capacity of a box with the given outer footprint.
///
/// Returns 0.0 when `kind` has no entry in `table`.
pub fn capacity(outer_l: u32, outer_w: u32, kind: FluteKind, table: &MaterialTable) -> f64 {
    let Some(profile) = table.get(kind) else {
        return 0.0;
    };
    let perimeter = 2.0 * (f64::from(outer_l) + f64::from(outer_w));
    let force = BCT_COEFFICIENT * profile.ect * (profile.caliper * perimeter).sqrt();
    force / STANDARD_GRAVITY * MASS_SCALE
}

/// Load on the bottom box of a stack of `pallet_layers` boxes.
///
/// Never below `min_load`.
pub fn stack_load(box_weight_kg: f64, pallet_layers: u32, min_load: f64) -> f64 {
    let load = box_weight_kg * (f64::from(pallet_layers) - 1.0);
    if load <= 0.0 {
        min_load
    } else {
        load
    }
}

/// Safety verdict for a capacity and a stack.
pub fn assess(capacity: f64, box_weight_kg: f64, pallet_layers: u32, config: &SearchConfig) -> StrengthResult {
    let load = stack_load(box_weight_kg, pallet_layers, config.min_stack_load);
    let safety_factor = capacity / load;
    StrengthResult {
        capacity,
        load,
        safety_factor,
        is_unsafe: safety_factor < config.safety_threshold,
    }
}
