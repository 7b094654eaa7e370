//! Configuration search entry point.

use std::time::Instant;

use u_palletize_core::{PalletSpec, ProductSpec, Result, SearchConfig, SearchConstraints, SearchResult};

use crate::ranking;
use crate::search::{self, SearchContext};

/// Searches box and pallet configurations for a product.
#[derive(Debug, Clone, Default)]
pub struct Palletizer {
    config: SearchConfig,
}

impl Palletizer {
    /// Creates a palletizer with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Creates a palletizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(SearchConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the search and returns up to `max_results` ranked configurations.
    ///
    /// An empty result is not an error; invalid inputs are.
    pub fn solve(
        &self,
        product: &ProductSpec,
        pallet: &PalletSpec,
        constraints: &SearchConstraints,
    ) -> Result<SearchResult> {
        self.config.validate()?;
        product.validate()?;
        pallet.validate()?;
        constraints.validate()?;

        if constraints.min_qty > constraints.max_qty {
            log::warn!(
                "quantity range {}..={} is empty, no configuration can qualify",
                constraints.min_qty,
                constraints.max_qty
            );
        }

        let start = Instant::now();
        let ctx = SearchContext::new(product, pallet, constraints, &self.config);
        log::debug!(
            "searching {} orientations of {} on {} x {} pallet ({} board, margin {})",
            ctx.orientations.len(),
            product.dimensions,
            pallet.length,
            pallet.width,
            constraints.material,
            constraints.margin
        );

        let (candidates, mut stats) = search::run(&ctx);
        let unique = ranking::deduplicate(candidates);
        stats.unique = unique.len();

        let mut result = SearchResult::new(*pallet);
        result.configurations = ranking::rank(unique, &self.config);
        result.stats = stats;
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        match result.best() {
            Some(best) => log::info!(
                "found {} configurations ({} unique), best {} with {} units in {}ms",
                result.len(),
                stats.unique,
                best.configuration.label(),
                best.configuration.total,
                result.computation_time_ms
            ),
            None => log::info!(
                "no feasible configuration after {} packings in {}ms",
                stats.packings,
                result.computation_time_ms
            ),
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_palletize_core::{Error, FluteKind};

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = SearchConfig::default();
        config.max_results = 0;
        let err = Palletizer::new(config)
            .solve(
                &ProductSpec::new(180, 120, 50, 5.0),
                &PalletSpec::standard(),
                &SearchConstraints::new(FluteKind::AFlute),
            )
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_empty_quantity_range_is_not_an_error() {
        let result = Palletizer::default_config()
            .solve(
                &ProductSpec::new(180, 120, 50, 5.0),
                &PalletSpec::standard(),
                &SearchConstraints::new(FluteKind::AFlute).with_quantity_range(50, 10),
            )
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats.accepted, 0);
    }

    #[test]
    fn test_stats_are_recorded() {
        let result = Palletizer::default_config()
            .solve(
                &ProductSpec::new(180, 120, 50, 5.0),
                &PalletSpec::standard(),
                &SearchConstraints::new(FluteKind::AFlute),
            )
            .unwrap();
        assert_eq!(result.stats.orientations, 6);
        assert_eq!(result.stats.cells, 150);
        assert!(result.stats.accepted >= result.stats.unique);
        assert!(result.stats.unique >= result.len());
        assert!(result.len() <= 12);
    }
}
