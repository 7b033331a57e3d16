//! Rating system configuration

use crate::error::{RatingError, RatingResult};
use crate::rating::probability::DEFAULT_DIFF;
use crate::rating::score::DEFAULT_ALPHA;
use crate::types::{Rating, DEFAULT_RATING, RATING_FLOOR};
use serde::{Deserialize, Serialize};

/// Default K-factor: rating points at stake per opponent
pub const DEFAULT_AWARD: f64 = 50.0;

/// Parameters of the multiplayer Elo system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Rating for players with no recorded rating
    pub initial_rating: Rating,
    /// Lowest rating a player can be left with
    pub rating_floor: Rating,
    /// Rating gap controlling how steeply win probability changes
    pub diff: f64,
    /// K-factor scaling every rating change
    pub award: f64,
    /// Weighting of the top position against intermediate ones
    pub alpha: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            initial_rating: DEFAULT_RATING,
            rating_floor: RATING_FLOOR,
            diff: DEFAULT_DIFF,
            award: DEFAULT_AWARD,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> RatingResult<()> {
        if !self.initial_rating.is_finite() {
            return Err(invalid("Initial rating must be a finite number"));
        }

        if !self.rating_floor.is_finite() {
            return Err(invalid("Rating floor must be a finite number"));
        }

        if !self.diff.is_finite() || self.diff <= 0.0 {
            return Err(invalid("Diff must be positive"));
        }

        if !self.award.is_finite() || self.award < 0.0 {
            return Err(invalid("Award must be non-negative"));
        }

        if !self.alpha.is_finite() || self.alpha <= 1.0 {
            return Err(invalid("Alpha must be greater than 1"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> RatingError {
    RatingError::InvalidParameter {
        message: message.to_string(),
    }
}
