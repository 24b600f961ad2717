//! The opening book as handed to the engine: two lists of lines, one for each
//! side. Each line is a move history followed by a move that is worth playing
//! after it, all separated by spaces.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::aggregator::PositionTable;
use crate::types::BookSide;
use crate::BookError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBook {
    pub white: Vec<String>,
    pub black: Vec<String>,
}

impl OpeningBook {
    /// Turns a filtered table into book lines. All continuations of a position
    /// go into the same bucket, chosen by the length of the position's history.
    ///
    /// The order of positions is whatever the table iterates in. Within a
    /// position, continuations keep the order they were first seen in.
    pub fn generate(table: &PositionTable) -> Self {
        let mut book = OpeningBook::default();
        for (key, entry) in table.iter() {
            let bucket = book.lines_mut(key.side_to_move());
            for continuation in &entry.continuations {
                bucket.push(key.line_with(&continuation.mv));
            }
        }
        book
    }

    pub fn lines(&self, side: BookSide) -> &[String] {
        match side {
            BookSide::White => &self.white,
            BookSide::Black => &self.black,
        }
    }

    fn lines_mut(&mut self, side: BookSide) -> &mut Vec<String> {
        match side {
            BookSide::White => &mut self.white,
            BookSide::Black => &mut self.black,
        }
    }

    /// Union of two books, bucket by bucket. Lines are compared as plain
    /// strings; the result has no duplicates and is sorted.
    pub fn merge(self, other: OpeningBook) -> OpeningBook {
        fn union(a: Vec<String>, b: Vec<String>) -> Vec<String> {
            a.into_iter()
                .chain(b)
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect()
        }

        OpeningBook {
            white: union(self.white, other.white),
            black: union(self.black, other.black),
        }
    }

    pub fn len(&self) -> usize {
        self.white.len() + self.black.len()
    }

    pub fn is_empty(&self) -> bool {
        self.white.is_empty() && self.black.is_empty()
    }

    pub fn parse(json_string: &str) -> Result<Self, BookError> {
        Ok(serde_json::from_str(json_string)?)
    }

    pub fn write(&self) -> Result<String, BookError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
