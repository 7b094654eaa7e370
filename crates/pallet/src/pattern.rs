//! Pallet layer pattern classification.

use u_palletize_core::{Interlock, Pattern, SearchConfig};

/// Classified grid layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayer {
    /// The grid pattern with its interlock label.
    pub pattern: Pattern,
    /// Effective load footprint on the pallet.
    pub footprint: (u32, u32),
}

/// Classifies a `div_x × div_y` grid of boxes with outer footprint
/// `outer_l × outer_w`.
///
/// Near-square layers interlock: a non-square division turns as a whole,
/// a square division of near-square boxes turns box by box. Rotating layers
/// occupy a square of the longer layer span.
pub fn classify_grid(div_x: u32, div_y: u32, outer_l: u32, outer_w: u32, config: &SearchConfig) -> GridLayer {
    let layer_l = div_x * outer_l;
    let layer_w = div_y * outer_w;

    let interlock = if layer_l.abs_diff(layer_w) <= config.near_square_tolerance {
        if div_x != div_y {
            Interlock::PatternRotation
        } else if outer_l.abs_diff(outer_w) <= config.box_rotation_tolerance {
            Interlock::BoxRotation
        } else {
            Interlock::NoInterlock
        }
    } else {
        Interlock::NoInterlock
    };

    let footprint = if interlock.is_rotation() {
        let side = layer_l.max(layer_w);
        (side, side)
    } else {
        (layer_l, layer_w)
    };

    GridLayer {
        pattern: Pattern::Grid {
            div_x,
            div_y,
            interlock,
        },
        footprint,
    }
}

/// Pinwheel ring count for a box footprint on a pallet of `pallet_length`.
///
/// Zero when not even one ring fits.
pub fn pinwheel_rings(outer_l: u32, outer_w: u32, pallet_length: u32) -> u32 {
    if outer_w == 0 {
        return 0;
    }
    match pallet_length.checked_sub(outer_l) {
        Some(remaining) => remaining / outer_w,
        None => 0,
    }
}

/// Side of the square covered by a pinwheel with `rings` rings.
pub fn pinwheel_span(outer_l: u32, outer_w: u32, rings: u32) -> u32 {
    outer_l + rings * outer_w
}
