//! Builds an opening book for a chess engine from a corpus of recorded games.
//!
//! The pipeline is: split the corpus into game records, extract the moves of
//! each game, count move histories and the moves that followed them, prune
//! what was rarely seen and finally write out the surviving lines.

pub mod aggregator;
pub mod book;
pub mod config;
pub mod corpus;
pub mod extractor;
pub mod filter;
pub mod progress;
pub mod splitter;
pub mod types;

use std::path::PathBuf;

pub use aggregator::{Continuation, PositionEntry, PositionTable};
pub use book::OpeningBook;
pub use config::BookConfig;
pub use corpus::{build_book, process_corpus, process_corpus_file, CorpusReport, CorpusRun};
pub use extractor::extract_moves;
pub use filter::{filter_weak_signal, FilterReport};
pub use splitter::split_records;
pub use types::{BookSide, MoveToken, PositionKey, MOVE_SEPARATOR};

#[derive(thiserror::Error, Debug)]
pub enum BookError {
    #[error("Could not read corpus file {path:?}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid book configuration: {0}")]
    InvalidConfig(String),
    #[error("The book JSON is malformed.")]
    BookJson(#[from] serde_json::Error),
}
