//! Rating history across a session of matches
//!
//! [`HistoryTracker`] owns the session's [`RatingStore`] and keeps one rating
//! snapshot per player for the initial state and after every recorded match.

use crate::config::RatingConfig;
use crate::error::{RatingError, RatingResult};
use crate::rating::calculator::{MultiEloCalculator, RatingCalculator};
use crate::rating::storage::RatingStore;
use crate::types::{Match, PlayerId, Rating, RatingChange, Ratings};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Every rating a player has held during the session, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub player_id: PlayerId,
    pub ratings: Vec<Rating>,
}

impl PlayerHistory {
    pub fn initial_rating(&self) -> Option<Rating> {
        self.ratings.first().copied()
    }

    pub fn final_rating(&self) -> Option<Rating> {
        self.ratings.last().copied()
    }

    pub fn peak_rating(&self) -> Option<Rating> {
        self.ratings.iter().copied().reduce(f64::max)
    }

    /// Index and rounded value of the last snapshot, as labelled on charts
    pub fn final_annotation(&self) -> Option<(usize, i64)> {
        let last = self.final_rating()?;
        Some((self.ratings.len() - 1, last.round() as i64))
    }
}

/// Applies matches in order and records every player's rating after each
///
/// Rating state is sequential: each match is scored against the clamped
/// result of the previous one. Clone the tracker to explore alternative
/// outcomes without touching the original session.
#[derive(Debug, Clone)]
pub struct HistoryTracker<C = MultiEloCalculator> {
    calculator: C,
    store: RatingStore,
    history: Vec<PlayerHistory>,
    matches_recorded: usize,
}

impl HistoryTracker<MultiEloCalculator> {
    /// Start a session with the default rating parameters
    pub fn new(initial_ratings: &Ratings) -> Self {
        Self::with_calculator(initial_ratings, MultiEloCalculator::default())
    }

    /// Start a session with custom rating parameters
    pub fn from_config(initial_ratings: &Ratings, config: RatingConfig) -> RatingResult<Self> {
        Ok(Self::with_calculator(
            initial_ratings,
            MultiEloCalculator::new(config)?,
        ))
    }
}

impl<C: RatingCalculator> HistoryTracker<C> {
    /// Start a session: clamp the initial ratings and take snapshot 0
    pub fn with_calculator(initial_ratings: &Ratings, calculator: C) -> Self {
        let store = RatingStore::with_ratings(initial_ratings, calculator.rating_floor());
        let history = store
            .ratings()
            .iter()
            .map(|(player_id, rating)| PlayerHistory {
                player_id: player_id.clone(),
                ratings: vec![rating],
            })
            .collect();

        Self {
            calculator,
            store,
            history,
            matches_recorded: 0,
        }
    }

    /// Apply one match: update, clamp and append a snapshot for every player
    ///
    /// A rejected match leaves the current ratings and the history untouched.
    /// Players must have been registered when the session started, and the
    /// calculator may not introduce new ones.
    pub fn record_match(&mut self, game: &Match) -> RatingResult<Vec<RatingChange>> {
        self.ensure_registered(game.participants())?;

        let result = self
            .calculator
            .calculate_rating_changes(self.store.ratings(), game)?;
        self.ensure_registered(result.ratings.players())?;

        self.store.apply_ratings(&result.ratings);
        self.snapshot();
        self.matches_recorded += 1;

        info!(
            game = self.matches_recorded,
            participants = result.rating_changes.len(),
            positions = game.total_positions(),
            "Recorded match"
        );

        Ok(result.rating_changes)
    }

    /// Apply matches in order, stopping at the first rejected one
    ///
    /// Matches before the rejected one stay recorded.
    pub fn record_matches<'a, I>(&mut self, games: I) -> RatingResult<usize>
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let mut recorded = 0;
        for game in games {
            self.record_match(game)?;
            recorded += 1;
        }
        Ok(recorded)
    }

    fn ensure_registered<'a, I>(&self, players: I) -> RatingResult<()>
    where
        I: IntoIterator<Item = &'a PlayerId>,
    {
        let ratings = self.store.ratings();
        match players.into_iter().find(|player_id| !ratings.contains(player_id)) {
            Some(player_id) => Err(RatingError::UnknownPlayer {
                player_id: player_id.clone(),
            }),
            None => Ok(()),
        }
    }

    fn snapshot(&mut self) {
        // The player set is fixed at construction, so the store and the
        // history share one ordering
        for (entry, (_, rating)) in self.history.iter_mut().zip(self.store.ratings().iter()) {
            entry.ratings.push(rating);
        }
    }

    /// Expected share of pairwise wins across every registered player
    ///
    /// This is the population-wide view; rating updates only ever compare
    /// the participants of a single match.
    pub fn winning_probability(&self) -> RatingResult<Ratings> {
        self.calculator.winning_probability(self.store.ratings())
    }

    pub fn ratings(&self) -> &Ratings {
        self.store.ratings()
    }

    pub fn history(&self) -> &[PlayerHistory] {
        &self.history
    }

    pub fn history_of(&self, player_id: &str) -> Option<&[Rating]> {
        self.history
            .iter()
            .find(|entry| entry.player_id == player_id)
            .map(|entry| entry.ratings.as_slice())
    }

    pub fn matches_recorded(&self) -> usize {
        self.matches_recorded
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }
}
