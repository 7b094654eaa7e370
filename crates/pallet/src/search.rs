//! Grid and layout search.
//!
//! The search space is the cartesian product of product orientations and
//! pallet division pairs. Each (orientation, division) cell is evaluated on its
//! own: both in-cell orientations of the product footprint, and a window of
//! near-maximal column and row counts. Every packing that survives the layer
//! planner becomes a grid candidate; the maximal packing of each in-cell
//! orientation may additionally become a pinwheel candidate.
//!
//! Cells share nothing but read-only inputs, so they can be evaluated on the
//! rayon pool. Outcomes are collected in cell order either way, which keeps the
//! candidate sequence identical between serial and parallel runs.

use rayon::prelude::*;
use u_palletize_core::{
    CandidateConfiguration, Dims3, FluteKind, PackingDetail, PalletSpec, Pattern, ProductSpec,
    SearchConfig, SearchConstraints, SearchStats, StrengthResult,
};

use crate::layer::{plan_layers, LayerPlan, StackLimits};
use crate::pattern::{classify_grid, pinwheel_rings, pinwheel_span};
use crate::strength;

/// Normalized, read-only inputs of one search pass.
#[derive(Debug, Clone)]
pub struct SearchContext<'a> {
    /// Target pallet.
    pub pallet: PalletSpec,
    /// Board used for every box.
    pub material: FluteKind,
    /// Stack limits derived from the constraints.
    pub limits: StackLimits,
    /// Product orientations to try.
    pub orientations: Vec<Dims3>,
    /// Heuristic constants.
    pub config: &'a SearchConfig,
}

impl<'a> SearchContext<'a> {
    /// Builds the context, normalizing weights.
    pub fn new(
        product: &ProductSpec,
        pallet: &PalletSpec,
        constraints: &SearchConstraints,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            pallet: *pallet,
            material: constraints.material,
            limits: StackLimits {
                margin: constraints.margin,
                unit_weight_g: product.effective_unit_weight(),
                max_box_weight_g: constraints.effective_max_box_weight(config.unlimited_box_weight_g),
                min_qty: constraints.min_qty,
                max_qty: constraints.max_qty,
                load_height: pallet.load_height,
            },
            orientations: product.orientations(constraints.allow_rotation),
            config,
        }
    }
}

/// One (orientation, division) pair of the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchCell {
    /// Product orientation (length, width, height).
    pub orientation: Dims3,
    /// Pallet divisions along its length.
    pub div_x: u32,
    /// Pallet divisions along its width.
    pub div_y: u32,
}

/// Candidates produced by one cell.
#[derive(Debug, Clone, Default)]
pub struct CellOutcome {
    /// Accepted candidates in enumeration order.
    pub candidates: Vec<CandidateConfiguration>,
    /// (columns, rows) packings evaluated.
    pub packings: usize,
}

/// All (div_x, div_y) pairs, `div_x` outer.
pub fn division_pairs(config: &SearchConfig) -> impl Iterator<Item = (u32, u32)> + Clone {
    let (min, max) = (config.min_division, config.max_division);
    (min..=max).flat_map(move |x| (min..=max).map(move |y| (x, y)))
}

/// The search space: every orientation crossed with every division pair.
pub fn cells<'a>(
    orientations: &'a [Dims3],
    config: &SearchConfig,
) -> impl Iterator<Item = SearchCell> + 'a {
    let pairs = division_pairs(config);
    orientations.iter().flat_map(move |&orientation| {
        pairs.clone().map(move |(div_x, div_y)| SearchCell {
            orientation,
            div_x,
            div_y,
        })
    })
}

/// Counts from `max` down through `window` values, stopping above zero.
pub fn count_window(max: u32, window: u32) -> impl Iterator<Item = u32> + Clone {
    let low = max.saturating_sub(window.saturating_sub(1)).max(1);
    (low..=max).rev()
}

/// Runs the whole search and returns candidates in enumeration order.
pub fn run(ctx: &SearchContext<'_>) -> (Vec<CandidateConfiguration>, SearchStats) {
    let mut stats = SearchStats {
        orientations: ctx.orientations.len(),
        ..SearchStats::default()
    };

    let outcomes: Vec<CellOutcome> = if ctx.config.parallel {
        let all: Vec<SearchCell> = cells(&ctx.orientations, ctx.config).collect();
        all.par_iter().map(|cell| evaluate_cell(ctx, *cell)).collect()
    } else {
        cells(&ctx.orientations, ctx.config)
            .map(|cell| evaluate_cell(ctx, cell))
            .collect()
    };

    stats.cells = outcomes.len();
    let mut candidates = Vec::new();
    for outcome in outcomes {
        stats.packings += outcome.packings;
        candidates.extend(outcome.candidates);
    }
    stats.accepted = candidates.len();

    log::debug!(
        "search visited {} cells, {} packings, accepted {} candidates",
        stats.cells,
        stats.packings,
        stats.accepted
    );

    (candidates, stats)
}

/// Evaluates one orientation/division cell.
pub fn evaluate_cell(ctx: &SearchContext<'_>, cell: SearchCell) -> CellOutcome {
    let mut outcome = CellOutcome::default();
    let margin = ctx.limits.margin;
    let product = cell.orientation;

    let grid_l = ctx.pallet.length / cell.div_x;
    let grid_w = ctx.pallet.width / cell.div_y;
    let min_side = product.short_side();

    let (Some(usable_l), Some(usable_w)) = (grid_l.checked_sub(margin), grid_w.checked_sub(margin)) else {
        return outcome;
    };
    if usable_l < min_side || usable_w < min_side {
        return outcome;
    }

    let window = ctx.config.count_window;
    for (d1, d2) in [
        (product.length, product.width),
        (product.width, product.length),
    ] {
        let max_columns = usable_l / d1;
        let max_rows = usable_w / d2;
        if max_columns == 0 || max_rows == 0 {
            continue;
        }

        for columns in count_window(max_columns, window) {
            for rows in count_window(max_rows, window) {
                outcome.packings += 1;

                let Some(packing) = pack(ctx, (grid_l, grid_w), product, (d1, d2), columns, rows) else {
                    continue;
                };

                outcome
                    .candidates
                    .push(grid_candidate(ctx, &packing, cell.div_x, cell.div_y));

                if columns == max_columns && rows == max_rows {
                    if let Some(pinwheel) = pinwheel_candidate(ctx, &packing) {
                        outcome.candidates.push(pinwheel);
                    }
                }
            }
        }
    }

    outcome
}

/// A box that passed the footprint and stack checks, before pattern choice.
#[derive(Debug, Clone, Copy)]
struct Packing {
    orientation: Dims3,
    detail: PackingDetail,
    inner: Dims3,
    outer: Dims3,
    plan: LayerPlan,
    box_weight_kg: f64,
    strength: StrengthResult,
}

fn pack(
    ctx: &SearchContext<'_>,
    cell: (u32, u32),
    orientation: Dims3,
    (d1, d2): (u32, u32),
    columns: u32,
    rows: u32,
) -> Option<Packing> {
    let config = ctx.config;
    let margin = ctx.limits.margin;

    let inner_l = columns * d1;
    let inner_w = rows * d2;
    let outer_l = inner_l + margin;
    let outer_w = inner_w + margin;

    let long_side = outer_l.max(outer_w);
    let short_side = outer_l.min(outer_w);
    if short_side > 0 && f64::from(long_side) / f64::from(short_side) > config.max_aspect_ratio {
        return None;
    }

    let plan = plan_layers(
        (outer_l, outer_w),
        cell,
        orientation.height,
        columns,
        rows,
        &ctx.limits,
        config,
    )?;

    let box_weight_kg = f64::from(plan.qty) * ctx.limits.unit_weight_g / 1000.0;
    let capacity = strength::capacity(outer_l, outer_w, ctx.material, &config.materials);
    let strength = strength::assess(capacity, box_weight_kg, plan.pallet_layers, config);

    Some(Packing {
        orientation,
        detail: PackingDetail {
            unit: Dims3::new(d1, d2, orientation.height),
            columns,
            rows,
            layers: plan.layers,
        },
        inner: Dims3::new(inner_l, inner_w, plan.layers * orientation.height),
        outer: Dims3::new(outer_l, outer_w, plan.outer_height),
        plan,
        box_weight_kg,
        strength,
    })
}

fn efficiency(outer: Dims3, yield_per_layer: u32, pallet: &PalletSpec) -> f64 {
    let covered = outer.footprint_area() * u64::from(yield_per_layer);
    covered as f64 / pallet.deck_area() as f64 * 100.0
}

fn assemble(
    ctx: &SearchContext<'_>,
    packing: &Packing,
    pattern: Pattern,
    footprint: (u32, u32),
) -> CandidateConfiguration {
    let yield_per_layer = pattern.yield_per_layer();
    let pallet_layers = packing.plan.pallet_layers;
    CandidateConfiguration {
        pattern,
        product_orientation: packing.orientation,
        outer: packing.outer,
        inner: packing.inner,
        packing: packing.detail,
        qty: packing.plan.qty,
        yield_per_layer,
        pallet_layers,
        total: u64::from(yield_per_layer) * u64::from(pallet_layers) * u64::from(packing.plan.qty),
        efficiency: efficiency(packing.outer, yield_per_layer, &ctx.pallet),
        box_weight_kg: packing.box_weight_kg,
        strength: packing.strength,
        load: Dims3::new(footprint.0, footprint.1, pallet_layers * packing.outer.height),
    }
}

fn grid_candidate(ctx: &SearchContext<'_>, packing: &Packing, div_x: u32, div_y: u32) -> CandidateConfiguration {
    let layer = classify_grid(
        div_x,
        div_y,
        packing.outer.length,
        packing.outer.width,
        ctx.config,
    );
    assemble(ctx, packing, layer.pattern, layer.footprint)
}

fn pinwheel_candidate(ctx: &SearchContext<'_>, packing: &Packing) -> Option<CandidateConfiguration> {
    let (outer_l, outer_w) = (packing.outer.length, packing.outer.width);
    let rings = pinwheel_rings(outer_l, outer_w, ctx.pallet.length);
    if rings == 0 {
        return None;
    }
    let span = pinwheel_span(outer_l, outer_w, rings);
    Some(assemble(ctx, packing, Pattern::Pinwheel { rings }, (span, span)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_palletize_core::PatternLabel;

    fn scenario_a() -> (ProductSpec, PalletSpec, SearchConstraints) {
        (
            ProductSpec::new(180, 120, 50, 5.0),
            PalletSpec::standard(),
            SearchConstraints::new(FluteKind::AFlute)
                .with_margin(10)
                .with_quantity_range(10, 100)
                .with_rotation(true),
        )
    }

    #[test]
    fn test_division_pairs() {
        let config = SearchConfig::default();
        let pairs: Vec<_> = division_pairs(&config).collect();
        assert_eq!(pairs.len(), 25);
        assert_eq!(pairs[0], (2, 2));
        assert_eq!(pairs[1], (2, 3));
        assert_eq!(pairs[24], (6, 6));
    }

    #[test]
    fn test_cells_cross_product() {
        let config = SearchConfig::default();
        let orientations = vec![Dims3::new(1, 2, 3), Dims3::new(3, 2, 1)];
        let all: Vec<_> = cells(&orientations, &config).collect();
        assert_eq!(all.len(), 50);
        assert_eq!(all[25].orientation, Dims3::new(3, 2, 1));
        assert_eq!((all[25].div_x, all[25].div_y), (2, 2));
    }

    #[test]
    fn test_count_window() {
        assert_eq!(count_window(5, 3).collect::<Vec<_>>(), vec![5, 4, 3]);
        assert_eq!(count_window(2, 3).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(count_window(1, 3).collect::<Vec<_>>(), vec![1]);
        assert_eq!(count_window(4, 1).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_reference_cell() {
        let (product, pallet, constraints) = scenario_a();
        let config = SearchConfig::default();
        let ctx = SearchContext::new(&product, &pallet, &constraints, &config);

        let outcome = evaluate_cell(
            &ctx,
            SearchCell {
                orientation: Dims3::new(180, 120, 50),
                div_x: 2,
                div_y: 2,
            },
        );

        // The maximal 3 x 4 packing of 180 x 120 in a 540 x 540 usable cell.
        let first = &outcome.candidates[0];
        assert_eq!(first.outer, Dims3::new(550, 490, 310));
        assert_eq!(first.inner, Dims3::new(540, 480, 300));
        assert_eq!(first.qty, 72);
        assert_eq!(first.yield_per_layer, 4);
        assert_eq!(first.pallet_layers, 5);
        assert_eq!(first.total, 4 * 5 * 72);
        assert_eq!(first.load, Dims3::new(1100, 980, 1550));
        assert!(!first.is_unsafe());

        // 1100 - 550 = 550 leaves one ring of 490.
        let second = &outcome.candidates[1];
        assert_eq!(second.label(), PatternLabel::Pinwheel);
        assert_eq!(second.yield_per_layer, 4);
        assert_eq!(second.load, Dims3::new(1040, 1040, 1550));
        assert_eq!(outcome.packings, 18);
    }

    #[test]
    fn test_cell_too_small() {
        let (product, pallet, constraints) = scenario_a();
        let config = SearchConfig::default();
        let ctx = SearchContext::new(&product, &pallet, &constraints, &config);

        // 1100 / 6 = 183, minus margin leaves 173, shorter than the 500 mm short side.
        let outcome = evaluate_cell(
            &ctx,
            SearchCell {
                orientation: Dims3::new(600, 500, 50),
                div_x: 6,
                div_y: 6,
            },
        );
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.packings, 0);
    }

    #[test]
    fn test_serial_and_parallel_agree() {
        let (product, pallet, constraints) = scenario_a();
        let serial = SearchConfig::default();
        let parallel = SearchConfig::default().with_parallel(true);

        let (a, sa) = run(&SearchContext::new(&product, &pallet, &constraints, &serial));
        let (b, sb) = run(&SearchContext::new(&product, &pallet, &constraints, &parallel));
        assert_eq!(a, b);
        assert_eq!(sa, sb);
        assert_eq!(sa.cells, 6 * 25);
    }
}
