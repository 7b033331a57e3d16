//! Multiplayer Elo rating engine
//!
//! This module provides the round-robin probability model, the
//! position-to-score mapping, the rating update rule, floor-clamped rating
//! storage and per-player rating history.

pub mod calculator;
pub mod history;
pub mod probability;
pub mod score;
pub mod storage;

// Re-export commonly used types
pub use calculator::{
    update_ratings, MultiEloCalculator, RatingCalculationResult, RatingCalculator,
};
pub use history::{HistoryTracker, PlayerHistory};
pub use probability::winning_probability;
pub use score::final_score;
pub use storage::{clamp_ratings, RatingStore};
