//! Cuts a corpus of concatenated PGN games into one text slice per game.
//!
//! A new game starts wherever a blank line is followed by an `[Event` tag.
//! We don't look at the content at all, so broken records just come out as
//! short or empty slices and the extractor finds no moves in them.

/// Blank line followed by the first tag of the next game.
const RECORD_DELIMITER: &str = "\n\n[Event";
/// Length of the blank line part of the delimiter. The record itself starts
/// at the `[Event` tag.
const BLANK_LINE: usize = 2;

/// Lazy iterator over the records of a corpus.
pub struct RecordSplitter<'a> {
    rest: Option<&'a str>,
    first: bool,
}

impl<'a> RecordSplitter<'a> {
    pub fn new(corpus: &'a str) -> Self {
        RecordSplitter {
            rest: Some(corpus),
            first: true,
        }
    }
}

impl<'a> Iterator for RecordSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        // Every record after the first one begins with its own delimiter.
        let skip = if self.first { 0 } else { BLANK_LINE };
        self.first = false;

        let end = match rest[skip..].find(RECORD_DELIMITER) {
            Some(offset) => {
                self.rest = Some(&rest[skip + offset..]);
                skip + offset
            }
            None => {
                self.rest = None;
                rest.len()
            }
        };
        Some(&rest[skip..end])
    }
}

/// Splits `corpus` into at most `max_records` game records. Records that
/// don't contain a game still count towards the limit.
pub fn split_records(corpus: &str, max_records: usize) -> impl Iterator<Item = &str> {
    RecordSplitter::new(corpus).take(max_records)
}
