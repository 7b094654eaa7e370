//! Error types for U-Palletize.

use thiserror::Error;

/// Result type alias for U-Palletize operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur before a configuration search starts.
///
/// The search itself never fails: an empty result is reported through
/// [`SearchResult::is_feasible`](crate::result::SearchResult::is_feasible),
/// and an unknown material only degrades the strength verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Product or pallet dimensions are malformed or non-positive.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Weights or quantity bounds cannot be used for a search.
    #[error("Invalid constraints: {0}")]
    InvalidConstraints(String),

    /// Heuristic constants in the search configuration are out of range.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
