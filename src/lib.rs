//! Podium Elo - multiplayer Elo ratings with tied finishing positions
//!
//! This crate generalizes the Elo rating update to matches between any
//! number of players whose result is an ordered list of position groups,
//! and tracks every player's rating across a session of matches.

pub mod config;
pub mod error;
pub mod rating;
pub mod records;
pub mod report;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, RatingResult, Result};
pub use types::*;

// Re-export key components
pub use rating::{HistoryTracker, MultiEloCalculator, RatingCalculator, RatingStore};
pub use records::Session;
pub use report::HistoryReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
