//! Counts how often each move history was reached and which moves followed it.
//!
//! The table only ever grows here. Pruning happens in [`crate::filter`].

use fxhash::FxHashMap;

use crate::types::{MoveToken, PositionKey};
use crate::BookConfig;

/// A move that was played after some position, and how often.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Continuation {
    pub mv: MoveToken,
    pub count: u32,
}

/// Statistics for one move history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionEntry {
    /// How often this exact history was reached. This is not the sum of the
    /// continuation counts, because games may end (or hit the depth limit) here.
    pub total_games: u32,
    /// Moves played next, in the order they were first seen.
    pub continuations: Vec<Continuation>,
}

impl PositionEntry {
    fn record_continuation(&mut self, mv: &MoveToken) {
        match self.continuations.iter_mut().find(|c| &c.mv == mv) {
            Some(continuation) => continuation.count += 1,
            None => self.continuations.push(Continuation {
                mv: mv.clone(),
                count: 1,
            }),
        }
    }

    pub fn count_of(&self, mv: &str) -> Option<u32> {
        self.continuations
            .iter()
            .find(|c| c.mv.as_str() == mv)
            .map(|c| c.count)
    }
}

/// The frequency table of one corpus.
#[derive(Clone, Debug)]
pub struct PositionTable {
    pub(crate) positions: FxHashMap<PositionKey, PositionEntry>,
    max_depth: usize,
    min_game_length: usize,
    games_processed: usize,
}

impl PositionTable {
    pub fn new(max_depth: usize, min_game_length: usize) -> Self {
        PositionTable {
            positions: FxHashMap::default(),
            max_depth,
            min_game_length,
            games_processed: 0,
        }
    }

    pub fn from_config(config: &BookConfig) -> Self {
        Self::new(config.max_depth, config.min_game_length)
    }

    /// Folds the moves of one game into the table. Returns false if the game
    /// was too short to be counted.
    pub fn process_game(&mut self, moves: &[MoveToken]) -> bool {
        if moves.len() < self.min_game_length {
            return false;
        }

        let considered = &moves[..moves.len().min(self.max_depth)];
        for i in 0..considered.len() {
            let key = PositionKey::from_moves(&considered[..=i]);
            let entry = self.positions.entry(key).or_default();
            entry.total_games += 1;

            if let Some(next_move) = considered.get(i + 1) {
                entry.record_continuation(next_move);
            }
        }

        self.games_processed += 1;
        true
    }

    pub fn get(&self, key: &str) -> Option<&PositionEntry> {
        self.positions.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PositionKey, &PositionEntry)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of games that were long enough to be counted.
    pub fn games_processed(&self) -> usize {
        self.games_processed
    }
}
