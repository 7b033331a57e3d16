//! Session reporting: final standings, rating trajectories and chart labels

use crate::error::Result;
use crate::rating::calculator::RatingCalculator;
use crate::rating::history::{HistoryTracker, PlayerHistory};
use crate::types::{PlayerId, Rating, Ratings};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Label for the last point of a player's rating trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub player_id: PlayerId,
    /// Snapshot index of the final point (0 is the initial rating)
    pub index: usize,
    /// Final rating rounded to the nearest integer
    pub label: i64,
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: usize,
    pub player_id: PlayerId,
    pub rating: Rating,
    /// Net change since the start of the session
    pub change: f64,
    pub peak: Rating,
}

/// Everything a reporting or charting collaborator needs from a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    /// Rating parameters the session was played with
    pub parameters: serde_json::Value,
    pub matches_recorded: usize,
    pub final_ratings: Ratings,
    pub histories: Vec<PlayerHistory>,
    pub annotations: Vec<Annotation>,
}

impl HistoryReport {
    pub fn from_tracker<C: RatingCalculator>(tracker: &HistoryTracker<C>) -> Self {
        let annotations = tracker
            .history()
            .iter()
            .filter_map(|entry| {
                entry
                    .final_annotation()
                    .map(|(index, label)| Annotation {
                        player_id: entry.player_id.clone(),
                        index,
                        label,
                    })
            })
            .collect();

        Self {
            parameters: tracker.calculator().config(),
            matches_recorded: tracker.matches_recorded(),
            final_ratings: tracker.ratings().clone(),
            histories: tracker.history().to_vec(),
            annotations,
        }
    }

    /// Players ordered by final rating, best first
    ///
    /// Equal ratings keep registration order and share a rank.
    pub fn leaderboard(&self) -> Vec<Standing> {
        let mut rows: Vec<&PlayerHistory> = self.histories.iter().collect();
        rows.sort_by(|a, b| {
            let a = a.final_rating().unwrap_or(f64::MIN);
            let b = b.final_rating().unwrap_or(f64::MIN);
            b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut standings: Vec<Standing> = Vec::with_capacity(rows.len());
        for (slot, entry) in rows.into_iter().enumerate() {
            let rating = entry.final_rating().unwrap_or_default();
            let rank = match standings.last() {
                Some(previous) if previous.rating == rating => previous.rank,
                _ => slot + 1,
            };
            standings.push(Standing {
                rank,
                player_id: entry.player_id.clone(),
                rating,
                change: rating - entry.initial_rating().unwrap_or(rating),
                peak: entry.peak_rating().unwrap_or(rating),
            });
        }
        standings
    }

    /// Plain-text leaderboard for terminal output
    pub fn render_table(&self) -> Result<String> {
        let standings = self.leaderboard();
        let name_width = standings
            .iter()
            .map(|row| row.player_id.chars().count())
            .max()
            .unwrap_or(0)
            .max("Player".len());

        let mut out = String::new();
        writeln!(
            out,
            "Ratings after {} match(es)",
            self.matches_recorded
        )?;
        writeln!(
            out,
            "{:>4}  {:<width$}  {:>8}  {:>8}  {:>8}",
            "Rank",
            "Player",
            "Rating",
            "Change",
            "Peak",
            width = name_width
        )?;
        for row in &standings {
            writeln!(
                out,
                "{:>4}  {:<width$}  {:>8.1}  {:>+8.1}  {:>8.1}",
                row.rank,
                row.player_id,
                row.rating,
                row.change,
                row.peak,
                width = name_width
            )?;
        }
        Ok(out)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
