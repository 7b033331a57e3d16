//! Position-to-score mapping
//!
//! A match with `T` finishing positions awards position `p` a score
//! proportional to `alpha^(T - p) - 1`, normalized over all positions. The
//! last position always scores 0 and the scores of all positions sum to 1.

use crate::error::{RatingError, RatingResult};

/// How much more the top position earns than intermediate positions
pub const DEFAULT_ALPHA: f64 = 4.0;

/// Score awarded to a match where everybody shares one position
pub const SHARED_POSITION_SCORE: f64 = 0.5;

/// Normalized outcome score for finishing at `position` (1 = best) out of
/// `total_positions`
pub fn final_score(position: usize, total_positions: usize, alpha: f64) -> RatingResult<f64> {
    if total_positions < 1 || position < 1 || position > total_positions {
        return Err(RatingError::InvalidPosition {
            position,
            total_positions,
        });
    }

    if total_positions == 1 {
        return Ok(SHARED_POSITION_SCORE);
    }

    // alpha == 1 zeroes every term and alpha < 1 inverts the ranking
    if !alpha.is_finite() || alpha <= 1.0 {
        return Err(RatingError::InvalidParameter {
            message: format!("alpha must be greater than 1, got {}", alpha),
        });
    }

    let term = |p: usize| alpha.powf((total_positions - p) as f64) - 1.0;
    let total: f64 = (1..=total_positions).map(term).sum();

    Ok(term(position) / total)
}

/// Scores for every position of a match with `total_positions` groups,
/// best position first
pub fn position_scores(total_positions: usize, alpha: f64) -> RatingResult<Vec<f64>> {
    (1..=total_positions)
        .map(|position| final_score(position, total_positions, alpha))
        .collect()
}
