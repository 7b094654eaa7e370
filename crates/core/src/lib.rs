//! # U-Palletize Core
//!
//! Core types shared by the U-Palletize box and pallet planner.
//!
//! This crate holds the data model; the search itself lives in
//! `u-palletize-pallet`.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Dims3`], [`ProductSpec`], [`PalletSpec`] and the
//!   product orientation enumerator
//! - **Materials**: [`FluteKind`], [`MaterialProfile`], [`MaterialTable`]
//! - **Configuration**: [`SearchConfig`] (heuristic constants) and
//!   [`SearchConstraints`] (per-request limits)
//! - **Results**: [`CandidateConfiguration`], [`Pattern`], [`SearchResult`]
//!
//! ## Configuration
//!
//! ```rust
//! use u_palletize_core::{FluteKind, SearchConfig, SearchConstraints};
//!
//! let config = SearchConfig::new()
//!     .with_safety_threshold(3.0)
//!     .with_max_results(12);
//!
//! let constraints = SearchConstraints::new(FluteKind::AFlute)
//!     .with_quantity_range(10, 100)
//!     .with_rotation(true);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod geometry;
pub mod material;
pub mod result;

// Re-exports
pub use config::{SearchConfig, SearchConstraints};
pub use error::{Error, Result};
pub use geometry::{enumerate_orientations, Dims3, PalletSpec, ProductSpec, AXIS_PERMUTATIONS};
pub use material::{FluteKind, MaterialProfile, MaterialTable};
pub use result::{
    CandidateConfiguration, Interlock, PackingDetail, Pattern, PatternLabel,
    RankedConfiguration, SearchResult, SearchStats, StrengthResult,
};
