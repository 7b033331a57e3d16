//! Common types used throughout the rating engine

use crate::error::{RatingError, RatingResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Unique identifier for players
pub type PlayerId = String;

/// A player's skill rating
pub type Rating = f64;

/// Rating given to players with no recorded rating
pub const DEFAULT_RATING: Rating = 1500.0;

/// No rating is stored below this value
pub const RATING_FLOOR: Rating = 1400.0;

/// Ratings keyed by player, iterated in the order players were first inserted
///
/// Reports and histories depend on a stable player order, so this keeps an
/// explicit entry list next to the lookup index instead of relying on hash
/// map iteration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ratings {
    entries: Vec<(PlayerId, Rating)>,
    index: HashMap<PlayerId, usize>,
}

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Insert or overwrite a rating, returning the previous value
    ///
    /// Overwriting keeps the player's original position in the ordering.
    pub fn insert(&mut self, player_id: impl Into<PlayerId>, rating: Rating) -> Option<Rating> {
        let player_id = player_id.into();
        match self.index.get(&player_id) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot].1, rating)),
            None => {
                self.index.insert(player_id.clone(), self.entries.len());
                self.entries.push((player_id, rating));
                None
            }
        }
    }

    pub fn get(&self, player_id: &str) -> Option<Rating> {
        self.index.get(player_id).map(|&slot| self.entries[slot].1)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.index.contains_key(player_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, Rating)> + '_ {
        self.entries.iter().map(|(player_id, rating)| (player_id, *rating))
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerId> + '_ {
        self.entries.iter().map(|(player_id, _)| player_id)
    }

    pub fn values(&self) -> impl Iterator<Item = Rating> + '_ {
        self.entries.iter().map(|(_, rating)| *rating)
    }
}

impl<K: Into<PlayerId>> FromIterator<(K, Rating)> for Ratings {
    fn from_iter<I: IntoIterator<Item = (K, Rating)>>(iter: I) -> Self {
        let mut ratings = Ratings::new();
        for (player_id, rating) in iter {
            ratings.insert(player_id, rating);
        }
        ratings
    }
}

impl<K: Into<PlayerId>, const N: usize> From<[(K, Rating); N]> for Ratings {
    fn from(entries: [(K, Rating); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Ratings {
    type Item = (PlayerId, Rating);
    type IntoIter = std::vec::IntoIter<(PlayerId, Rating)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Ratings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (player_id, rating) in &self.entries {
            map.serialize_entry(player_id, rating)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ratings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RatingsVisitor;

        impl<'de> Visitor<'de> for RatingsVisitor {
            type Value = Ratings;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of player identifiers to ratings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Ratings, A::Error> {
                let mut ratings = Ratings::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((player_id, rating)) = access.next_entry::<PlayerId, Rating>()? {
                    ratings.insert(player_id, rating);
                }
                Ok(ratings)
            }
        }

        deserializer.deserialize_map(RatingsVisitor)
    }
}

/// Outcome of one match: position groups from best to worst
///
/// `[[A], [B, C], [D]]` means A finished first, B and C tied for second and
/// D finished last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Match {
    groups: Vec<Vec<PlayerId>>,
}

impl Match {
    pub fn new(groups: Vec<Vec<PlayerId>>) -> Self {
        Self { groups }
    }

    /// Build a match from anything shaped like a list of groups of names
    pub fn from_groups<G, S>(groups: impl IntoIterator<Item = G>) -> Self
    where
        G: IntoIterator<Item = S>,
        S: Into<PlayerId>,
    {
        Self {
            groups: groups
                .into_iter()
                .map(|group| group.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn groups(&self) -> &[Vec<PlayerId>] {
        &self.groups
    }

    /// Number of distinct finishing positions (groups, not players)
    pub fn total_positions(&self) -> usize {
        self.groups.len()
    }

    /// Number of individual players across all groups
    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Every participant with its 1-based finishing position
    pub fn placements(&self) -> impl Iterator<Item = (usize, &PlayerId)> + '_ {
        self.groups
            .iter()
            .enumerate()
            .flat_map(|(slot, group)| group.iter().map(move |player_id| (slot + 1, player_id)))
    }

    pub fn participants(&self) -> impl Iterator<Item = &PlayerId> + '_ {
        self.groups.iter().flatten()
    }

    /// Check the match is a proper partition: at least one group, no empty
    /// groups and nobody listed twice
    pub fn validate(&self) -> RatingResult<()> {
        if self.groups.is_empty() {
            return Err(RatingError::InvalidMatch {
                reason: "match has no position groups".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.participant_count());
        for (position, group) in self.groups.iter().enumerate() {
            if group.is_empty() {
                return Err(RatingError::InvalidMatch {
                    reason: format!("position group {} is empty", position + 1),
                });
            }
            for player_id in group {
                if !seen.insert(player_id.as_str()) {
                    return Err(RatingError::DuplicatePlayer {
                        player_id: player_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Rating change for one participant of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    /// 1-based finishing position
    pub position: usize,
    /// Actual outcome score in [0, 1]
    pub score: f64,
    /// Expected share of pairwise wins within the match
    pub expected: f64,
    pub old_rating: Rating,
    /// Rating before the floor clamp
    pub new_rating: Rating,
}

impl RatingChange {
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}
