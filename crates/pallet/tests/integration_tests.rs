//! Integration tests for u-palletize-pallet.

use u_palletize_core::{
    Dims3, Error, FluteKind, MaterialProfile, MaterialTable, Pattern, PatternLabel,
};
use u_palletize_pallet::search::{self, SearchContext};
use u_palletize_pallet::{
    pallet_layout, ranking, PalletSpec, Palletizer, ProductSpec, SearchConfig, SearchConstraints,
};

fn reference_product() -> ProductSpec {
    ProductSpec::new(180, 120, 50, 5.0)
}

fn reference_constraints() -> SearchConstraints {
    SearchConstraints::new(FluteKind::AFlute)
        .with_margin(10)
        .with_quantity_range(10, 100)
        .with_rotation(true)
}

mod scenario_tests {
    use super::*;

    #[test]
    fn test_reference_product() {
        let result = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &reference_constraints())
            .unwrap();

        assert!(result.is_feasible());
        assert!(result.len() <= 12);
        for ranked in &result.configurations {
            let c = &ranked.configuration;
            assert!((10..=100).contains(&c.qty), "qty {}", c.qty);
            assert!(c.aspect_ratio() <= 3.0, "aspect {}", c.aspect_ratio());
        }
        for pair in result.configurations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        for (i, ranked) in result.configurations.iter().enumerate() {
            assert_eq!(ranked.rank, i + 1);
        }
    }

    #[test]
    fn test_quantity_ceiling_below_minimum() {
        let constraints = reference_constraints().with_quantity_range(10, 5);
        let result = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &constraints)
            .unwrap();
        assert!(result.is_empty());
        assert!(result.best().is_none());
    }

    #[test]
    fn test_oversized_pallet_with_tiny_units() {
        // Halving the deck already gives more units per layer than u32 can count.
        let result = Palletizer::default_config()
            .solve(
                &ProductSpec::new(1, 1, 1, 1.0),
                &PalletSpec::new(200_000, 200_000, 1650),
                &reference_constraints(),
            )
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_near_square_uneven_division_is_pattern_rotation() {
        let config = SearchConfig::default();
        for product in [
            reference_product(),
            ProductSpec::new(95, 64, 40, 12.0),
            ProductSpec::new(210, 150, 80, 40.0),
        ] {
            let constraints = reference_constraints();
            let pallet = PalletSpec::standard();
            let ctx = SearchContext::new(&product, &pallet, &constraints, &config);
            let (candidates, _) = search::run(&ctx);

            for c in &candidates {
                if let Pattern::Grid { div_x, div_y, .. } = c.pattern {
                    let layer_l = div_x * c.outer.length;
                    let layer_w = div_y * c.outer.width;
                    if div_x != div_y && layer_l.abs_diff(layer_w) <= 20 {
                        assert_eq!(c.label(), PatternLabel::PatternRotation);
                    }
                }
            }
        }
    }
}

mod invariant_tests {
    use super::*;

    #[test]
    fn test_candidate_invariants() {
        let config = SearchConfig::default();
        let product = reference_product();
        let pallet = PalletSpec::standard();
        let constraints = reference_constraints();
        let ctx = SearchContext::new(&product, &pallet, &constraints, &config);
        let (candidates, stats) = search::run(&ctx);

        assert!(!candidates.is_empty());
        assert_eq!(stats.accepted, candidates.len());

        for c in &candidates {
            assert_eq!(c.yield_per_layer, c.pattern.yield_per_layer());
            assert_eq!(
                c.total,
                u64::from(c.yield_per_layer) * u64::from(c.pallet_layers) * u64::from(c.qty)
            );
            assert_eq!(u64::from(c.qty), c.packing.quantity());
            assert_eq!(c.outer.length, c.inner.length + 10);
            assert_eq!(c.outer.width, c.inner.width + 10);
            assert_eq!(c.outer.height, c.inner.height + 10);
            assert!(c.load.height <= pallet.load_height);
            assert!(c.pallet_layers >= 1);
            assert!(c.efficiency > 0.0 && c.efficiency <= 100.0 + 1e-9);
            assert_eq!(c.is_unsafe(), c.strength.safety_factor < 3.0);
            assert!((c.box_weight_kg - f64::from(c.qty) * 5.0 / 1000.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_results_have_unique_signatures() {
        let result = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &reference_constraints())
            .unwrap();

        let mut signatures: Vec<_> = result.iter().map(ranking::signature).collect();
        let before = signatures.len();
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), before);
    }

    #[test]
    fn test_pinwheel_follows_maximal_grid() {
        let config = SearchConfig::default();
        let product = reference_product();
        let pallet = PalletSpec::standard();
        let constraints = reference_constraints();
        let ctx = SearchContext::new(&product, &pallet, &constraints, &config);
        let (candidates, _) = search::run(&ctx);

        let mut pinwheels = 0;
        for (i, c) in candidates.iter().enumerate() {
            if let Pattern::Pinwheel { rings } = c.pattern {
                pinwheels += 1;
                assert!(rings >= 1);
                assert!(i > 0);
                let grid = &candidates[i - 1];
                assert!(!grid.pattern.is_pinwheel());
                assert_eq!(grid.outer, c.outer);
                assert_eq!(grid.qty, c.qty);
                let span = c.outer.length + rings * c.outer.width;
                assert!(span <= pallet.length);
                assert_eq!(c.load, Dims3::new(span, span, c.load.height));
            }
        }
        assert!(pinwheels > 0);
    }

    #[test]
    fn test_exact_quantity() {
        let constraints = reference_constraints().with_quantity_range(72, 72);
        let result = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &constraints)
            .unwrap();
        assert!(result.is_feasible());
        assert!(result.iter().all(|c| c.qty == 72));
    }

    #[test]
    fn test_box_weight_ceiling() {
        let constraints = reference_constraints().with_max_box_weight(200.0);
        let result = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &constraints)
            .unwrap();
        assert!(result.is_feasible());
        assert!(result.iter().all(|c| c.qty <= 40));
    }

    #[test]
    fn test_fixed_orientation() {
        let constraints = reference_constraints().with_rotation(false);
        let result = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &constraints)
            .unwrap();
        assert!(result.is_feasible());
        assert_eq!(result.stats.orientations, 1);
        assert!(result
            .iter()
            .all(|c| c.product_orientation == Dims3::new(180, 120, 50)));
    }

    #[test]
    fn test_layout_matches_candidate() {
        let pallet = PalletSpec::standard();
        let result = Palletizer::default_config()
            .solve(&reference_product(), &pallet, &reference_constraints())
            .unwrap();

        for c in result.iter() {
            let boxes = pallet_layout(c, &pallet);
            assert_eq!(boxes.len() as u64, c.total / u64::from(c.qty));
        }
    }
}

mod determinism_tests {
    use super::*;

    #[test]
    fn test_repeatable() {
        let palletizer = Palletizer::default_config();
        let a = palletizer
            .solve(&reference_product(), &PalletSpec::standard(), &reference_constraints())
            .unwrap();
        let b = palletizer
            .solve(&reference_product(), &PalletSpec::standard(), &reference_constraints())
            .unwrap();
        assert_eq!(a.configurations, b.configurations);
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let serial = Palletizer::default_config()
            .solve(&reference_product(), &PalletSpec::standard(), &reference_constraints())
            .unwrap();
        let parallel = Palletizer::new(SearchConfig::default().with_parallel(true))
            .solve(&reference_product(), &PalletSpec::standard(), &reference_constraints())
            .unwrap();
        assert_eq!(serial.configurations, parallel.configurations);
        assert_eq!(serial.stats, parallel.stats);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_zero_dimension() {
        let err = Palletizer::default_config()
            .solve(
                &ProductSpec::new(180, 0, 50, 5.0),
                &PalletSpec::standard(),
                &reference_constraints(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions(_)));
    }

    #[test]
    fn test_zero_pallet() {
        let err = Palletizer::default_config()
            .solve(
                &reference_product(),
                &PalletSpec::new(0, 1100, 1650),
                &reference_constraints(),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions(_)));
    }

    #[test]
    fn test_non_positive_weights_are_normalized() {
        let product = ProductSpec::new(180, 120, 50, 0.0);
        let constraints = reference_constraints().with_max_box_weight(-1.0);
        let result = Palletizer::default_config()
            .solve(&product, &PalletSpec::standard(), &constraints)
            .unwrap();
        assert!(result.is_feasible());
        assert!(result.iter().all(|c| (c.box_weight_kg - f64::from(c.qty) / 1000.0).abs() < 1e-12));
    }

    #[test]
    fn test_unknown_material_is_unsafe() {
        let table = MaterialTable::from_entries([(FluteKind::AFlute, MaterialProfile::new(5.0, 5.0))]);
        let config = SearchConfig::default().with_materials(table);
        let constraints = SearchConstraints::new(FluteKind::AbFlute);
        let result = Palletizer::new(config)
            .solve(&reference_product(), &PalletSpec::standard(), &constraints)
            .unwrap();

        assert!(result.is_feasible());
        for ranked in &result.configurations {
            assert!(ranked.configuration.is_unsafe());
            assert_eq!(ranked.configuration.strength.capacity, 0.0);
        }
    }
}
