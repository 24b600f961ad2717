//! Pulls the list of moves out of a single game record.
//!
//! This is purely lexical. There is no board, so illegal or even impossible
//! move sequences are accepted as long as each token looks like a move.

use lazy_regex::regex;
use log::trace;

use crate::types::MoveToken;

const RESULT_MARKERS: [&str; 3] = ["1-0", "0-1", "1/2-1/2"];

/// Returns the moves of a game record in the order they were played. Returns
/// an empty list if the record has no move text.
pub fn extract_moves(record: &str) -> Vec<MoveToken> {
    let Some(move_text) = find_move_text(record) else {
        return vec![];
    };

    // Optional move number ("12. ") followed by the move itself. Only the move
    // is kept.
    let move_pattern = regex!(r"(\d+\.\s*)?([NBRQK]?[a-h]?[1-8]?x?[a-h][1-8](?:=[NBRQ])?[+#]?)");

    move_pattern
        .captures_iter(move_text)
        .filter_map(|captures| {
            let body = captures.get(2)?.as_str();
            match MoveToken::try_from(body) {
                Ok(mv) => Some(mv),
                Err(_) => {
                    trace!("Dropping token {body:?}");
                    None
                }
            }
        })
        .collect()
}

/// The move text is the last line that is neither a tag nor a bare result.
fn find_move_text(record: &str) -> Option<&str> {
    record.lines().rev().map(str::trim).find(|line| {
        !line.is_empty()
            && !line.starts_with('[')
            && !RESULT_MARKERS.iter().any(|marker| line.starts_with(marker))
    })
}
