//! Parameters of a book building run. The builder reads these from the
//! `[book]` table of its toml config file, missing keys fall back to the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::BookError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Positions reached fewer times than this are dropped from the book.
    pub min_games: u32,
    /// Only the first `max_depth` moves of a game are looked at.
    pub max_depth: usize,
    /// Records examined per corpus file.
    pub max_games: usize,
    /// A continuation must be played in at least this fraction of the games
    /// that reached its position (rounded down, but at least once).
    pub survival_fraction: f64,
    /// Games with fewer moves than this are ignored completely.
    pub min_game_length: usize,
    /// Log a progress line after this many records.
    pub progress_interval: usize,
}

impl Default for BookConfig {
    fn default() -> Self {
        BookConfig {
            min_games: 3,
            max_depth: 15,
            max_games: 100_000,
            survival_fraction: 0.15,
            min_game_length: 4,
            progress_interval: 1000,
        }
    }
}

impl BookConfig {
    pub fn validate(&self) -> Result<(), BookError> {
        if self.max_depth == 0 {
            return Err(BookError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_games == 0 {
            return Err(BookError::InvalidConfig(
                "max_games must be at least 1".to_string(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(BookError::InvalidConfig(
                "progress_interval must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.survival_fraction) {
            return Err(BookError::InvalidConfig(format!(
                "survival_fraction must be within [0, 1], got {}",
                self.survival_fraction
            )));
        }
        Ok(())
    }
}
