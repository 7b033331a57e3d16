//! Test fixtures and mock implementations for integration testing

#![allow(dead_code)]

use podium_elo::error::{RatingError, RatingResult};
use podium_elo::rating::{RatingCalculationResult, RatingCalculator};
use podium_elo::types::{Match, Rating, RatingChange, Ratings};
use std::sync::Mutex;

/// Four regulars of a weekly game night
pub fn game_night_ratings() -> Ratings {
    Ratings::from([
        ("Trung", 1500.0),
        ("Michael", 1500.0),
        ("Asier", 1500.0),
        ("Christian", 1500.0),
    ])
}

/// A short season of game-night results, ties included
pub fn game_night_matches() -> Vec<Match> {
    vec![
        Match::from_groups(vec![vec!["Trung"], vec!["Michael"], vec!["Asier"], vec!["Christian"]]),
        Match::from_groups(vec![vec!["Asier", "Christian"], vec!["Trung", "Michael"]]),
        Match::from_groups(vec![vec!["Michael"], vec!["Trung", "Asier"], vec!["Christian"]]),
        Match::from_groups(vec![vec!["Christian"], vec!["Asier"]]),
        Match::from_groups(vec![vec!["Trung", "Michael", "Asier"]]),
    ]
}

pub const GAME_NIGHT_TOML: &str = r#"
matches = [
    [["Trung"], ["Michael"], ["Asier"], ["Christian"]],
    [["Asier", "Christian"], ["Trung", "Michael"]],
    [["Michael"], ["Trung", "Asier"], ["Christian"]],
    [["Christian"], ["Asier"]],
    [["Trung", "Michael", "Asier"]],
]

[ratings]
Trung = 1500
Michael = 1500
"#;

/// Mock calculator that shifts every participant by a fixed amount and
/// records the ratings it was asked to work from
#[derive(Debug)]
pub struct FixedShiftCalculator {
    shift: f64,
    calls: Mutex<Vec<Ratings>>,
}

impl FixedShiftCalculator {
    pub fn new(shift: f64) -> Self {
        Self {
            shift,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Ratings passed to each calculation (for testing)
    pub fn get_calls(&self) -> Vec<Ratings> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl RatingCalculator for FixedShiftCalculator {
    fn calculate_rating_changes(
        &self,
        ratings: &Ratings,
        game: &Match,
    ) -> RatingResult<RatingCalculationResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ratings.clone());
        }

        let mut updated = ratings.clone();
        let mut rating_changes = Vec::new();
        for (position, player_id) in game.placements() {
            let old_rating = ratings
                .get(player_id)
                .ok_or_else(|| RatingError::UnknownPlayer {
                    player_id: player_id.clone(),
                })?;
            let new_rating = old_rating + self.shift;
            updated.insert(player_id.clone(), new_rating);
            rating_changes.push(RatingChange {
                player_id: player_id.clone(),
                position,
                score: 0.0,
                expected: 0.0,
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
        let share = 1.0 / ratings.len().max(1) as f64;
        Ok(ratings.players().map(|player_id| (player_id.clone(), share)).collect())
    }

    fn initial_rating(&self) -> Rating {
        1500.0
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({ "type": "fixed_shift", "shift": self.shift })
    }
}
