//! Session records: initial ratings and the ordered list of match results
//!
//! A session file is TOML or JSON, chosen by file extension:
//!
//! ```toml
//! matches = [
//!     [["Trung"], ["Michael", "Asier"], ["Christian"]],
//!     [["Asier"], ["Trung"]],
//! ]
//!
//! [ratings]
//! Trung = 1500
//! Michael = 1550
//! ```
//!
//! Players that appear in matches without a listed rating start at the
//! configured initial rating.

use crate::error::Result;
use crate::types::{Match, Rating, Ratings};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Everything needed to replay a rating session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Explicit starting ratings
    #[serde(default)]
    pub ratings: Ratings,
    /// Match results in the order they were played
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Session {
    /// Load a session file, picking the format from its extension
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => bail!(
                "Unsupported records file {}: expected a .toml or .json extension",
                path.display()
            ),
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read records file {}", path.display()))?;
        let session =
            parse(&contents).with_context(|| format!("Invalid records file {}", path.display()))?;

        debug!(
            path = %path.display(),
            players = session.ratings.len(),
            matches = session.matches.len(),
            "Loaded session records"
        );

        Ok(session)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Starting ratings for every player in the session
    ///
    /// Listed players come first in file order, followed by unlisted match
    /// participants at `default_rating` in order of first appearance.
    pub fn initial_ratings(&self, default_rating: Rating) -> Ratings {
        let mut ratings = self.ratings.clone();
        for player_id in self.matches.iter().flat_map(|game| game.participants()) {
            if !ratings.contains(player_id) {
                ratings.insert(player_id.clone(), default_rating);
            }
        }
        ratings
    }
}
