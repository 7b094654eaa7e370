//! Scoring, deduplication and ranking of candidate configurations.

use std::collections::HashSet;

use u_palletize_core::{CandidateConfiguration, Dims3, PatternLabel, RankedConfiguration, SearchConfig};

/// Identity of a configuration for deduplication purposes.
///
/// Two candidates with the same outer box, pattern label, units per box,
/// boxes per layer and product orientation are the same recommendation.
pub type Signature = (Dims3, PatternLabel, u32, u32, Dims3);

/// Computes the deduplication signature of a configuration.
pub fn signature(candidate: &CandidateConfiguration) -> Signature {
    (
        candidate.outer,
        candidate.label(),
        candidate.qty,
        candidate.yield_per_layer,
        candidate.product_orientation,
    )
}

/// Scores a configuration.
///
/// Total units, plus a bonus for interlocking patterns, minus a penalty for
/// unsafe stacks. Unsafe configurations stay in the result but sink.
pub fn score(candidate: &CandidateConfiguration, config: &SearchConfig) -> i64 {
    let label = candidate.label();
    let bonus = if label.is_pinwheel() {
        config.pinwheel_bonus
    } else if label.is_rotation() {
        config.interlock_bonus
    } else {
        0
    };
    let penalty = if candidate.is_unsafe() {
        config.unsafe_penalty
    } else {
        0
    };
    i64::try_from(candidate.total).unwrap_or(i64::MAX) + bonus - penalty
}

/// Keeps the first candidate of every signature, preserving order.
pub fn deduplicate(candidates: Vec<CandidateConfiguration>) -> Vec<CandidateConfiguration> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|c| seen.insert(signature(c)))
        .collect()
}

/// Scores, sorts by descending score and truncates.
///
/// Expects candidates already passed through [`deduplicate`]. The sort is
/// stable, so ties keep enumeration order.
pub fn rank(candidates: Vec<CandidateConfiguration>, config: &SearchConfig) -> Vec<RankedConfiguration> {
    let mut scored: Vec<(i64, CandidateConfiguration)> = candidates
        .into_iter()
        .map(|c| (score(&c, config), c))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(config.max_results)
        .enumerate()
        .map(|(i, (score, configuration))| RankedConfiguration {
            rank: i + 1,
            score,
            configuration,
        })
        .collect()
}
