//! Placement coordinates for a chosen configuration.
//!
//! Pure geometry: nothing here affects ranking. Pallet coordinates put the
//! origin at a deck corner with z pointing up; every layer is centred on the
//! deck.

use nalgebra::{Point3, Vector3};
use u_palletize_core::{CandidateConfiguration, PalletSpec, Pattern};

/// An axis-aligned box at a fixed position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedBox {
    /// Layer the box belongs to (0 is the bottom).
    pub layer: u32,
    /// Position of the min corner.
    pub position: Point3<f64>,
    /// Extent along x, y and z.
    pub dimensions: Vector3<f64>,
}

impl PlacedBox {
    /// Creates a placed box.
    pub fn new(layer: u32, position: Point3<f64>, dimensions: Vector3<f64>) -> Self {
        Self {
            layer,
            position,
            dimensions,
        }
    }

    /// The max corner.
    pub fn max(&self) -> Point3<f64> {
        self.position + self.dimensions
    }

    /// Returns true if the interiors of the two boxes intersect.
    ///
    /// Boxes that only share a face do not overlap.
    pub fn overlaps(&self, other: &PlacedBox) -> bool {
        const EPS: f64 = 1e-9;
        let (a_max, b_max) = (self.max(), other.max());
        (0..3).all(|axis| {
            self.position[axis] < b_max[axis] - EPS && other.position[axis] < a_max[axis] - EPS
        })
    }
}

fn boxed(layer: u32, x: f64, y: f64, z: f64, dx: f64, dy: f64, dz: f64) -> PlacedBox {
    PlacedBox::new(layer, Point3::new(x, y, z), Vector3::new(dx, dy, dz))
}

/// Boxes of one pallet layer.
pub fn pallet_layer_layout(
    candidate: &CandidateConfiguration,
    pallet: &PalletSpec,
    layer_index: u32,
) -> Vec<PlacedBox> {
    let outer_l = f64::from(candidate.outer.length);
    let outer_w = f64::from(candidate.outer.width);
    let height = f64::from(candidate.outer.height);
    let z = f64::from(layer_index) * height;
    let odd = layer_index % 2 == 1;
    let deck_l = f64::from(pallet.length);
    let deck_w = f64::from(pallet.width);

    match candidate.pattern {
        Pattern::Grid {
            div_x,
            div_y,
            interlock,
        } => {
            let (cols, rows, box_l, box_w) = if odd && interlock.is_rotation() {
                (div_y, div_x, outer_w, outer_l)
            } else {
                (div_x, div_y, outer_l, outer_w)
            };
            let offset_x = (deck_l - f64::from(cols) * box_l) / 2.0;
            let offset_y = (deck_w - f64::from(rows) * box_w) / 2.0;

            let mut boxes = Vec::with_capacity((cols * rows) as usize);
            for col in 0..cols {
                for row in 0..rows {
                    boxes.push(boxed(
                        layer_index,
                        offset_x + f64::from(col) * box_l,
                        offset_y + f64::from(row) * box_w,
                        z,
                        box_l,
                        box_w,
                        height,
                    ));
                }
            }
            boxes
        }
        Pattern::Pinwheel { rings } => {
            let k = f64::from(rings);
            let span = outer_l + k * outer_w;
            let offset_x = (deck_l - span) / 2.0;
            let offset_y = (deck_w - span) / 2.0;

            let mut boxes = Vec::with_capacity(4 * rings as usize);
            for i in 0..rings {
                let i = f64::from(i);
                let local = [
                    (0.0, i * outer_w, outer_l, outer_w),
                    (outer_l + i * outer_w, 0.0, outer_w, outer_l),
                    (k * outer_w, outer_l + i * outer_w, outer_l, outer_w),
                    (i * outer_w, k * outer_w, outer_w, outer_l),
                ];
                for (x, y, dx, dy) in local {
                    let (x, y, dx, dy) = if odd { (y, x, dy, dx) } else { (x, y, dx, dy) };
                    boxes.push(boxed(
                        layer_index,
                        offset_x + x,
                        offset_y + y,
                        z,
                        dx,
                        dy,
                        height,
                    ));
                }
            }
            boxes
        }
    }
}

/// Boxes of every pallet layer, bottom up.
pub fn pallet_layout(candidate: &CandidateConfiguration, pallet: &PalletSpec) -> Vec<PlacedBox> {
    (0..candidate.pallet_layers)
        .flat_map(|layer| pallet_layer_layout(candidate, pallet, layer))
        .collect()
}

/// Product units inside one box, relative to the inner cavity corner.
pub fn box_interior_layout(candidate: &CandidateConfiguration) -> Vec<PlacedBox> {
    let detail = &candidate.packing;
    let d1 = f64::from(detail.unit.length);
    let d2 = f64::from(detail.unit.width);
    let h = f64::from(detail.unit.height);

    let mut units = Vec::with_capacity(detail.quantity() as usize);
    for layer in 0..detail.layers {
        for col in 0..detail.columns {
            for row in 0..detail.rows {
                units.push(boxed(
                    layer,
                    f64::from(col) * d1,
                    f64::from(row) * d2,
                    f64::from(layer) * h,
                    d1,
                    d2,
                    h,
                ));
            }
        }
    }
    units
}
