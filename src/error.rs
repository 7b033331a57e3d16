//! Error types for the rating engine
//!
//! Engine operations return [`RatingError`] so callers can tell the failure
//! kinds apart. Application code (configuration, records loading, the CLI)
//! uses anyhow and wraps engine errors with context.

/// Result type alias for application-level code
pub type Result<T> = anyhow::Result<T>;

/// Result type alias for rating engine operations
pub type RatingResult<T> = std::result::Result<T, RatingError>;

/// Errors raised by the rating engine
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Unknown player: {player_id}")]
    UnknownPlayer { player_id: String },

    #[error("Invalid position {position} for a match with {total_positions} position(s)")]
    InvalidPosition {
        position: usize,
        total_positions: usize,
    },

    #[error("Degenerate field: {players} player(s), at least 2 are needed to form a pair")]
    DegenerateField { players: usize },

    #[error("Player appears more than once in a match: {player_id}")]
    DuplicatePlayer { player_id: String },

    #[error("Invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error("Invalid rating parameter: {message}")]
    InvalidParameter { message: String },
}
