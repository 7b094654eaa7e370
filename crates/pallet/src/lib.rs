//! # U-Palletize Pallet
//!
//! Box configuration search for the U-Palletize planner.
//!
//! Given a product, a pallet and per-request constraints, the search
//! enumerates ways to pack the product into a corrugated box and to stack
//! those boxes on the pallet, rates each box against a compression strength
//! model, and returns a short ranked list.
//!
//! ## Features
//!
//! - Exhaustive orientation × pallet-division enumeration
//! - Layer planning capped by stability, weight and quantity
//! - Interlocking grid and pinwheel layer patterns
//! - Short-form box compression strength and safety factor
//! - Optional parallel evaluation (rayon), with identical output
//! - Placement coordinates for drawing a chosen configuration
//!
//! ## Example
//!
//! ```rust
//! use u_palletize_core::{FluteKind, PalletSpec, ProductSpec, SearchConstraints};
//! use u_palletize_pallet::Palletizer;
//!
//! let product = ProductSpec::new(180, 120, 50, 5.0);
//! let constraints = SearchConstraints::new(FluteKind::AFlute).with_margin(10);
//!
//! let result = Palletizer::default_config()
//!     .solve(&product, &PalletSpec::standard(), &constraints)
//!     .unwrap();
//!
//! assert!(result.len() <= 12);
//! ```

pub mod layer;
pub mod layout;
pub mod palletizer;
pub mod pattern;
pub mod ranking;
pub mod search;
pub mod strength;

// Re-exports
pub use layout::{box_interior_layout, pallet_layer_layout, pallet_layout, PlacedBox};
pub use palletizer::Palletizer;
pub use ranking::{rank, score};
pub use u_palletize_core::{
    CandidateConfiguration, Error, PalletSpec, ProductSpec, RankedConfiguration, Result,
    SearchConfig, SearchConstraints, SearchResult,
};
