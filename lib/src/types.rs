use std::borrow::Borrow;
use std::convert::TryFrom;
use std::fmt;
use std::fmt::Display;

use lazy_regex::regex;
use serde::{Deserialize, Serialize};

/// Separator between moves inside a position key and inside an emitted book line.
pub const MOVE_SEPARATOR: &str = " ";

/// Bucket of the opening book a line is sorted into.
///
/// The label is decided by the length of the prefix alone (even => White,
/// odd => Black). Consumers of the book rely on this exact convention, so it
/// is not derived from any board state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookSide {
    White,
    Black,
}

impl BookSide {
    pub fn from_ply_count(ply_count: usize) -> Self {
        if ply_count % 2 == 0 {
            BookSide::White
        } else {
            BookSide::Black
        }
    }
}

/// One half-move in short algebraic notation, e.g. `e4`, `Nbd7`, `exd5`, `e8=Q`.
///
/// Check and mate markers are removed on construction. Anything that does not
/// look like a move afterwards (castling included) is rejected.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveToken(String);

impl MoveToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MoveToken {
    type Error = &'static str;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        const ERROR_TEXT: &str =
            "Error: I am looking for a move in short algebraic notation like 'e4' or 'Nxf7'.";

        let stripped = raw.replace(['+', '#'], "");
        if stripped.len() < 2 {
            return Err(ERROR_TEXT);
        }
        if regex!(r"^[NBRQK]?[a-h]?[1-8]?x?[a-h][1-8](=[NBRQ])?$").is_match(&stripped) {
            Ok(MoveToken(stripped))
        } else {
            Err(ERROR_TEXT)
        }
    }
}

impl fmt::Debug for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The literal move history of a game up to some ply, joined with
/// [`MOVE_SEPARATOR`]. Two keys are equal iff they list the same moves in the
/// same order. Transpositions are different keys.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey(String);

impl PositionKey {
    /// Builds the key for a (non-empty) move history.
    pub fn from_moves(moves: &[MoveToken]) -> Self {
        let mut key = String::new();
        for (i, mv) in moves.iter().enumerate() {
            if i > 0 {
                key.push_str(MOVE_SEPARATOR);
            }
            key.push_str(mv.as_str());
        }
        PositionKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The moves of this key in the order they were played.
    pub fn moves(&self) -> impl Iterator<Item = &str> {
        self.0.split(MOVE_SEPARATOR)
    }

    pub fn ply_count(&self) -> usize {
        self.moves().count()
    }

    /// Which bucket every continuation of this key is sorted into.
    pub fn side_to_move(&self) -> BookSide {
        BookSide::from_ply_count(self.ply_count())
    }

    /// The book line "key + separator + continuation".
    pub fn line_with(&self, continuation: &MoveToken) -> String {
        format!("{}{}{}", self.0, MOVE_SEPARATOR, continuation)
    }
}

impl Borrow<str> for PositionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
pub(crate) fn tokens(line: &str) -> Vec<MoveToken> {
    line.split_whitespace()
        .map(|t| MoveToken::try_from(t).unwrap())
        .collect()
}
