//! Rating calculator trait and the multiplayer Elo implementation
//!
//! This module defines the interface for rating calculations and provides
//! the generalized Elo update used for matches with tied finishing positions.

use crate::config::RatingConfig;
use crate::error::{RatingError, RatingResult};
use crate::rating::probability::winning_probability;
use crate::rating::score::position_scores;
use crate::types::{Match, Rating, RatingChange, Ratings, RATING_FLOOR};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a rating calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCalculationResult {
    /// Every player's proposed rating, before the floor clamp
    pub ratings: Ratings,
    /// Rating changes for the participants, in match order
    pub rating_changes: Vec<RatingChange>,
}

/// Trait for calculating rating changes after matches
pub trait RatingCalculator: Send + Sync {
    /// Calculate new ratings for all players based on a match result
    ///
    /// # Arguments
    /// * `ratings` - Current rating of every known player
    /// * `game` - Position groups of the match, best first
    ///
    /// # Returns
    /// Proposed ratings for every player (unclamped) and the participants'
    /// rating changes. Nothing is applied when an error is returned.
    fn calculate_rating_changes(
        &self,
        ratings: &Ratings,
        game: &Match,
    ) -> RatingResult<RatingCalculationResult>;

    /// Expected share of pairwise wins for every player in `ratings`
    fn winning_probability(&self, ratings: &Ratings) -> RatingResult<Ratings>;

    /// Get the initial rating for new players
    fn initial_rating(&self) -> Rating;

    /// Lowest rating a player may be left with
    fn rating_floor(&self) -> Rating {
        RATING_FLOOR
    }

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}

/// Elo generalized to N players and more than two outcomes
///
/// Each participant's actual score comes from its finishing position, its
/// expected score from a round-robin against the other participants of the
/// same match. The difference, scaled by `award * (M - 1)` for a match of `M`
/// players, is added to its rating.
#[derive(Debug, Clone, Default)]
pub struct MultiEloCalculator {
    config: RatingConfig,
}

impl MultiEloCalculator {
    /// Create a new calculator, rejecting invalid parameters
    pub fn new(config: RatingConfig) -> RatingResult<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }
}

impl RatingCalculator for MultiEloCalculator {
    fn calculate_rating_changes(
        &self,
        ratings: &Ratings,
        game: &Match,
    ) -> RatingResult<RatingCalculationResult> {
        game.validate()?;

        let scores = position_scores(game.total_positions(), self.config.alpha)?;

        // Only the match participants form the field for expected scores
        let mut field = Ratings::with_capacity(game.participant_count());
        let mut placements = Vec::with_capacity(game.participant_count());
        for (position, player_id) in game.placements() {
            let rating = ratings
                .get(player_id)
                .ok_or_else(|| RatingError::UnknownPlayer {
                    player_id: player_id.clone(),
                })?;
            field.insert(player_id.clone(), rating);
            placements.push((position, scores[position - 1]));
        }

        let probabilities = winning_probability(&field, self.config.diff)?;
        let stake = self.config.award * (field.len() - 1) as f64;

        let mut updated = ratings.clone();
        let mut rating_changes = Vec::with_capacity(field.len());
        for (((player_id, old_rating), expected), (position, score)) in
            field.iter().zip(probabilities.values()).zip(placements)
        {
            let new_rating = old_rating + stake * (score - expected);
            updated.insert(player_id.clone(), new_rating);

            debug!(
                player_id = %player_id,
                position,
                score,
                expected,
                old_rating,
                new_rating,
                "Calculated rating change"
            );

            rating_changes.push(RatingChange {
                player_id: player_id.clone(),
                position,
                score,
                expected,
                old_rating,
                new_rating,
            });
        }

        Ok(RatingCalculationResult {
            ratings: updated,
            rating_changes,
        })
    }

    fn winning_probability(&self, ratings: &Ratings) -> RatingResult<Ratings> {
        winning_probability(ratings, self.config.diff)
    }

    fn initial_rating(&self) -> Rating {
        self.config.initial_rating
    }

    fn rating_floor(&self) -> Rating {
        self.config.rating_floor
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}

/// New ratings for every player after `game`, using the default diff and
/// alpha and the given `award`
///
/// The result is not clamped to the rating floor; players absent from the
/// match keep their rating. Each call builds and validates a fresh
/// calculator. For a custom diff or alpha, or to avoid the rebuild across
/// many matches, construct a [`MultiEloCalculator`] once and call
/// [`RatingCalculator::calculate_rating_changes`] on it.
pub fn update_ratings(ratings: &Ratings, game: &Match, award: f64) -> RatingResult<Ratings> {
    let calculator = MultiEloCalculator::new(RatingConfig {
        award,
        ..RatingConfig::default()
    })?;

    Ok(calculator.calculate_rating_changes(ratings, game)?.ratings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::rating::DEFAULT_AWARD;

    fn two_player_ratings() -> Ratings {
        Ratings::from([("A", 1500.0), ("B", 1500.0)])
    }

    #[test]
    fn test_two_player_win() {
        let game = Match::from_groups(vec![vec!["A"], vec!["B"]]);
        let updated = update_ratings(&two_player_ratings(), &game, DEFAULT_AWARD).unwrap();

        assert_eq!(updated.get("A"), Some(1525.0));
        assert_eq!(updated.get("B"), Some(1475.0));
    }

    #[test]
    fn test_rating_changes_report_inputs() {
        let calculator = MultiEloCalculator::default();
        let game = Match::from_groups(vec![vec!["A"], vec!["B"]]);

        let result = calculator
            .calculate_rating_changes(&two_player_ratings(), &game)
            .unwrap();

        assert_eq!(result.rating_changes.len(), 2);

        let winner = &result.rating_changes[0];
        assert_eq!(winner.player_id, "A");
        assert_eq!(winner.position, 1);
        assert_eq!(winner.score, 1.0);
        assert_eq!(winner.expected, 0.5);
        assert_eq!(winner.delta(), 25.0);

        let loser = &result.rating_changes[1];
        assert_eq!(loser.player_id, "B");
        assert_eq!(loser.position, 2);
        assert_eq!(loser.delta(), -25.0);
    }

    #[test]
    fn test_tied_players_share_a_score() {
        let ratings = Ratings::from([("A", 1500.0), ("B", 1500.0), ("C", 1500.0)]);
        let game = Match::from_groups(vec![vec!["A", "B"], vec!["C"]]);

        let result = MultiEloCalculator::default()
            .calculate_rating_changes(&ratings, &game)
            .unwrap();

        let a = &result.rating_changes[0];
        let b = &result.rating_changes[1];
        assert_eq!(a.score, b.score);
        assert_eq!(a.new_rating, b.new_rating);

        // Two positions: the shared first place scores 1, the last 0.
        // Each expects 1/3 of the pairwise wins, stake is 50 * 2.
        let gain = 100.0 * (1.0 - 1.0 / 3.0);
        assert!((a.new_rating - (1500.0 + gain)).abs() < 1e-9);
        assert!((result.ratings.get("C").unwrap() - (1500.0 - 100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_bystanders_keep_their_rating() {
        let ratings = Ratings::from([("A", 1500.0), ("B", 1500.0), ("C", 1612.0)]);
        let game = Match::from_groups(vec![vec!["B"], vec!["A"]]);

        let updated = update_ratings(&ratings, &game, DEFAULT_AWARD).unwrap();

        assert_eq!(updated.get("C"), Some(1612.0));
        let players: Vec<&str> = updated.players().map(String::as_str).collect();
        assert_eq!(players, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_expected_score_is_match_local() {
        // A strong bystander must not change the participants' expectations
        let ratings = Ratings::from([("A", 1500.0), ("B", 1500.0), ("Champion", 2400.0)]);
        let game = Match::from_groups(vec![vec!["A"], vec!["B"]]);

        let updated = update_ratings(&ratings, &game, DEFAULT_AWARD).unwrap();
        assert_eq!(updated.get("A"), Some(1525.0));
        assert_eq!(updated.get("B"), Some(1475.0));
    }

    #[test]
    fn test_upset_moves_ratings_further() {
        let ratings = Ratings::from([("fav", 1700.0), ("dog", 1450.0)]);

        let expected_result = Match::from_groups(vec![vec!["fav"], vec!["dog"]]);
        let upset = Match::from_groups(vec![vec!["dog"], vec!["fav"]]);

        let calm = update_ratings(&ratings, &expected_result, DEFAULT_AWARD).unwrap();
        let shock = update_ratings(&ratings, &upset, DEFAULT_AWARD).unwrap();

        let calm_gain = calm.get("fav").unwrap() - 1700.0;
        let shock_gain = shock.get("dog").unwrap() - 1450.0;
        assert!(calm_gain > 0.0);
        assert!(shock_gain > calm_gain);
    }

    #[test]
    fn test_rating_changes_are_zero_sum() {
        let ratings = Ratings::from([("A", 1610.0), ("B", 1480.0), ("C", 1525.0), ("D", 1400.0)]);
        let game = Match::from_groups(vec![vec!["C"], vec!["A"], vec!["D"], vec!["B"]]);

        let result = MultiEloCalculator::default()
            .calculate_rating_changes(&ratings, &game)
            .unwrap();

        let net: f64 = result.rating_changes.iter().map(RatingChange::delta).sum();
        assert!(net.abs() < 1e-9);
    }

    #[test]
    fn test_unknown_player_rejects_match() {
        let ratings = Ratings::from([("A", 1500.0)]);
        let game = Match::from_groups(vec![vec!["A"], vec!["B"]]);

        assert_eq!(
            update_ratings(&ratings, &game, DEFAULT_AWARD),
            Err(RatingError::UnknownPlayer {
                player_id: "B".to_string()
            })
        );
    }

    #[test]
    fn test_single_participant_is_degenerate() {
        let game = Match::from_groups(vec![vec!["A"]]);
        assert_eq!(
            update_ratings(&two_player_ratings(), &game, DEFAULT_AWARD),
            Err(RatingError::DegenerateField { players: 1 })
        );
    }

    #[test]
    fn test_single_group_of_many_is_a_draw() {
        let ratings = Ratings::from([("A", 1550.0), ("B", 1450.0)]);
        let game = Match::from_groups(vec![vec!["A", "B"]]);

        let updated = update_ratings(&ratings, &game, DEFAULT_AWARD).unwrap();

        // Both score 0.5, so the favourite loses what the underdog gains
        assert!(updated.get("A").unwrap() < 1550.0);
        assert!(updated.get("B").unwrap() > 1450.0);
    }

    #[test]
    fn test_malformed_matches() {
        let calculator = MultiEloCalculator::default();
        let ratings = two_player_ratings();

        let duplicate = Match::from_groups(vec![vec!["A"], vec!["A"]]);
        assert!(matches!(
            calculator.calculate_rating_changes(&ratings, &duplicate),
            Err(RatingError::DuplicatePlayer { .. })
        ));

        let empty = Match::new(vec![]);
        assert!(matches!(
            calculator.calculate_rating_changes(&ratings, &empty),
            Err(RatingError::InvalidMatch { .. })
        ));
    }

    #[test]
    fn test_calculator_rejects_invalid_config() {
        let config = RatingConfig {
            alpha: 0.5,
            ..RatingConfig::default()
        };
        assert!(MultiEloCalculator::new(config).is_err());
    }

    #[test]
    fn test_calculator_config_json() {
        let calculator = MultiEloCalculator::default();
        let config = calculator.config();

        assert_eq!(config["award"], 50.0);
        assert_eq!(config["diff"], 700.0);
        assert_eq!(calculator.initial_rating(), 1500.0);
        assert_eq!(calculator.rating_floor(), 1400.0);
    }
}
