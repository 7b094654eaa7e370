//! Layer stack planning.
//!
//! Given a packed box footprint, decides how many unit layers go into the box
//! and how many boxes stack on the pallet.

use u_palletize_core::SearchConfig;

/// Request-level limits shared by every packing of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLimits {
    /// Box margin in mm.
    pub margin: u32,
    /// Unit weight in grams (already normalized).
    pub unit_weight_g: f64,
    /// Box weight ceiling in grams (already normalized).
    pub max_box_weight_g: f64,
    /// Minimum units per box.
    pub min_qty: u32,
    /// Maximum units per box.
    pub max_qty: u32,
    /// Pallet load height in mm.
    pub load_height: u32,
}

impl StackLimits {
    /// Units that fit under the box weight ceiling.
    pub fn units_by_weight(&self) -> u64 {
        let units = (self.max_box_weight_g / self.unit_weight_g).trunc();
        if units <= 0.0 {
            0
        } else {
            units as u64
        }
    }
}

/// A feasible stack for one (columns, rows) packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerPlan {
    /// Unit layers inside the box.
    pub layers: u32,
    /// Units per box.
    pub qty: u32,
    /// Outer box height in mm.
    pub outer_height: u32,
    /// Box layers on the pallet.
    pub pallet_layers: u32,
}

/// Floor division of reals, exact for near-integer quotients.
///
/// Rounds `(a - a % b) / b` instead of flooring `a / b` directly, so that
/// quotients like `330.0 / 55.0` never land one below the true value.
pub(crate) fn floor_div(a: f64, b: f64) -> f64 {
    let rem = a % b;
    let mut quotient = ((a - rem) / b).round();
    if rem != 0.0 && ((rem < 0.0) != (b < 0.0)) {
        quotient -= 1.0;
    }
    quotient
}

/// Maximum unit layers that keep the box below its tipping height.
///
/// Returns `None` when not even one layer fits.
pub fn geometric_layers(long_side: u32, product_height: u32, margin: u32, config: &SearchConfig) -> Option<u32> {
    let stable_height = f64::from(long_side) * config.stability_ratio;
    let budget = stable_height - f64::from(margin);
    let layers = floor_div(budget, f64::from(product_height));

    if layers >= 1.0 {
        Some(layers as u32)
    } else if u64::from(product_height) + u64::from(margin) <= u64::from(long_side) {
        Some(1)
    } else {
        None
    }
}

/// Plans the stack for a packing of `columns × rows` units per layer.
///
/// `outer` is the outer box footprint, `cell` the pallet grid cell it came
/// from.
pub fn plan_layers(
    outer: (u32, u32),
    cell: (u32, u32),
    product_height: u32,
    columns: u32,
    rows: u32,
    limits: &StackLimits,
    config: &SearchConfig,
) -> Option<LayerPlan> {
    let per_layer = columns.checked_mul(rows)?;
    if per_layer == 0 {
        return None;
    }

    let long_side = outer.0.max(outer.1);
    let geometric = geometric_layers(long_side, product_height, limits.margin, config)?;
    let by_weight = limits.units_by_weight() / u64::from(per_layer);
    let by_weight = u32::try_from(by_weight).unwrap_or(u32::MAX);
    let by_quantity = limits.max_qty / per_layer;

    let layers = geometric.min(by_weight).min(by_quantity);
    if layers == 0 {
        return None;
    }

    let qty = per_layer * layers;
    if qty < limits.min_qty {
        return None;
    }

    let outer_height = layers * product_height + limits.margin;
    let tolerance = config.shape_tolerance;
    if outer_height > cell.0.saturating_add(tolerance)
        && outer_height > cell.1.saturating_add(tolerance)
    {
        return None;
    }

    let pallet_layers = limits.load_height / outer_height;
    if pallet_layers == 0 {
        return None;
    }

    Some(LayerPlan {
        layers,
        qty,
        outer_height,
        pallet_layers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> StackLimits {
        StackLimits {
            margin: 10,
            unit_weight_g: 5.0,
            max_box_weight_g: 999_999.0,
            min_qty: 10,
            max_qty: 100,
            load_height: 1650,
        }
    }

    #[test]
    fn test_floor_div() {
        assert_eq!(floor_div(320.0, 50.0), 6.0);
        assert_eq!(floor_div(330.0, 55.0), 6.0);
        assert_eq!(floor_div(-10.0, 50.0), -1.0);
        assert_eq!(floor_div(49.9, 50.0), 0.0);
    }

    #[test]
    fn test_geometric_layers() {
        let config = SearchConfig::default();
        // 550 * 0.6 - 10 = 320 -> 6 layers of 50
        assert_eq!(geometric_layers(550, 50, 10, &config), Some(6));
        // Too tall for the budget but fits under the long side.
        assert_eq!(geometric_layers(200, 150, 10, &config), Some(1));
        // Taller than the long side.
        assert_eq!(geometric_layers(200, 195, 10, &config), None);
    }

    #[test]
    fn test_plan_reference_packing() {
        let config = SearchConfig::default();
        // 3 x 4 units of 180 x 120 in a 550 x 550 cell.
        let plan = plan_layers((550, 490), (550, 550), 50, 3, 4, &limits(), &config).unwrap();
        assert_eq!(plan.layers, 6);
        assert_eq!(plan.qty, 72);
        assert_eq!(plan.outer_height, 310);
        assert_eq!(plan.pallet_layers, 5);
    }

    #[test]
    fn test_quantity_cap() {
        let config = SearchConfig::default();
        let mut l = limits();
        l.max_qty = 30;
        let plan = plan_layers((550, 490), (550, 550), 50, 3, 4, &l, &config).unwrap();
        assert_eq!(plan.layers, 2);
        assert_eq!(plan.qty, 24);
    }

    #[test]
    fn test_weight_cap() {
        let config = SearchConfig::default();
        let mut l = limits();
        l.max_box_weight_g = 200.0; // 40 units at 5 g
        let plan = plan_layers((550, 490), (550, 550), 50, 3, 4, &l, &config).unwrap();
        assert_eq!(plan.layers, 3);
        assert_eq!(plan.qty, 36);
    }

    #[test]
    fn test_rejections() {
        let config = SearchConfig::default();

        let mut l = limits();
        l.min_qty = 80;
        assert!(plan_layers((550, 490), (550, 550), 50, 3, 4, &l, &config).is_none());

        let mut l = limits();
        l.max_qty = 11; // fewer than one layer of 12
        assert!(plan_layers((550, 490), (550, 550), 50, 3, 4, &l, &config).is_none());

        // Box taller than both cell edges plus tolerance.
        assert!(plan_layers((550, 490), (300, 300), 50, 3, 4, &limits(), &config).is_none());

        let mut l = limits();
        l.load_height = 300;
        assert!(plan_layers((550, 490), (550, 550), 50, 3, 4, &l, &config).is_none());
    }

    #[test]
    fn test_shape_guard_needs_both_edges() {
        let config = SearchConfig::default();
        // Outer height is 310 in every case below.
        assert!(plan_layers((550, 490), (300, 550), 50, 3, 4, &limits(), &config).is_some());
        assert!(plan_layers((550, 490), (550, 300), 50, 3, 4, &limits(), &config).is_some());
        assert!(plan_layers((550, 490), (305, 305), 50, 3, 4, &limits(), &config).is_some());
        assert!(plan_layers((550, 490), (304, 304), 50, 3, 4, &limits(), &config).is_none());
    }

    #[test]
    fn test_units_per_layer_beyond_u32() {
        let config = SearchConfig::default();
        let mut l = limits();
        l.max_qty = u32::MAX;
        assert!(plan_layers((550, 490), (550, 550), 1, 100_000, 100_000, &l, &config).is_none());
        assert_eq!(geometric_layers(u32::MAX, u32::MAX, 10, &config), None);
    }
}
