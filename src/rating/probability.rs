//! Round-robin winning probability model
//!
//! Every player is paired with every other player in the field. A player's
//! expected score is the sum of its pairwise Elo win chances, normalized by
//! the number of pairs so that the whole field sums to 1.

use crate::error::{RatingError, RatingResult};
use crate::types::Ratings;

/// Rating gap at which the stronger player is a heavy favourite
pub const DEFAULT_DIFF: f64 = 700.0;

/// Pairwise Elo win chance of a player rated `rating` against `opponent`
pub fn pairwise_win_chance(rating: f64, opponent: f64, diff: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / diff))
}

/// Expected share of pairwise wins for every player in `ratings`
///
/// The result keeps the order of `ratings`. Fails with
/// [`RatingError::DegenerateField`] when fewer than two players are given,
/// since no pair can be formed.
pub fn winning_probability(ratings: &Ratings, diff: f64) -> RatingResult<Ratings> {
    if !diff.is_finite() || diff <= 0.0 {
        return Err(RatingError::InvalidParameter {
            message: format!("diff must be a positive number, got {}", diff),
        });
    }

    let players = ratings.len();
    if players < 2 {
        return Err(RatingError::DegenerateField { players });
    }

    let pairs = (players * (players - 1)) as f64 / 2.0;

    Ok(ratings
        .iter()
        .map(|(player_id, rating)| {
            let wins: f64 = ratings
                .iter()
                .filter(|(other_id, _)| *other_id != player_id)
                .map(|(_, other)| pairwise_win_chance(rating, other, diff))
                .sum();
            (player_id.clone(), wins / pairs)
        })
        .collect())
}
