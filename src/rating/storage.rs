//! Current ratings with the rating floor enforced on every write

use crate::types::{PlayerId, Rating, Ratings, RATING_FLOOR};
use tracing::warn;

/// Clamp every rating in `proposed` up to `floor`
pub fn clamp_ratings(proposed: &Ratings, floor: Rating) -> Ratings {
    proposed
        .iter()
        .map(|(player_id, rating)| (player_id.clone(), rating.max(floor)))
        .collect()
}

/// Holds the current rating of every registered player
///
/// Writes only go through [`RatingStore::apply_ratings`], so no stored
/// rating is ever below the floor.
#[derive(Debug, Clone)]
pub struct RatingStore {
    ratings: Ratings,
    floor: Rating,
}

impl RatingStore {
    /// Create an empty store with the given floor
    pub fn new(floor: Rating) -> Self {
        Self {
            ratings: Ratings::new(),
            floor,
        }
    }

    /// Create a store seeded with clamped `initial` ratings
    pub fn with_ratings(initial: &Ratings, floor: Rating) -> Self {
        let mut store = Self::new(floor);
        store.apply_ratings(initial);
        store
    }

    /// Clamp `proposed` to the floor and write it over the current ratings
    ///
    /// Players missing from `proposed` keep their stored rating; new players
    /// are appended after the existing ones.
    pub fn apply_ratings(&mut self, proposed: &Ratings) -> &Ratings {
        for (player_id, rating) in proposed.iter() {
            if rating < self.floor {
                warn!(
                    player_id = %player_id,
                    proposed = rating,
                    floor = self.floor,
                    "Rating raised to floor"
                );
            }
            self.ratings.insert(player_id.clone(), rating.max(self.floor));
        }
        &self.ratings
    }

    pub fn ratings(&self) -> &Ratings {
        &self.ratings
    }

    pub fn get(&self, player_id: &str) -> Option<Rating> {
        self.ratings.get(player_id)
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> + '_ {
        self.ratings.players()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn floor(&self) -> Rating {
        self.floor
    }
}

impl Default for RatingStore {
    fn default() -> Self {
        Self::new(RATING_FLOOR)
    }
}
