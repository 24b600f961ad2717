//! Drives the whole pipeline for one or more corpus files.
//!
//! Every corpus gets its own position table. Counts from different corpora are
//! never added up, only the finished books are merged.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::aggregator::PositionTable;
use crate::book::OpeningBook;
use crate::extractor::extract_moves;
use crate::filter::{filter_with_config, FilterReport};
use crate::progress::Progress;
use crate::splitter::split_records;
use crate::{BookConfig, BookError};

/// Counters collected while processing one corpus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpusReport {
    /// Records looked at, including ones without moves.
    pub records: usize,
    /// Records where at least one move was found.
    pub games_with_moves: usize,
    /// Games that were long enough to be counted.
    pub games_aggregated: usize,
    pub positions_before_filter: usize,
    pub filter: FilterReport,
    pub white_lines: usize,
    pub black_lines: usize,
}

/// State of the book building for a single corpus.
pub struct CorpusRun<'c> {
    config: &'c BookConfig,
    table: PositionTable,
    report: CorpusReport,
}

impl<'c> CorpusRun<'c> {
    pub fn new(config: &'c BookConfig) -> Self {
        CorpusRun {
            config,
            table: PositionTable::from_config(config),
            report: CorpusReport::default(),
        }
    }

    /// Extracts the moves of one record and counts them.
    pub fn add_record(&mut self, record: &str) {
        self.report.records += 1;
        let moves = extract_moves(record);
        if moves.is_empty() {
            return;
        }
        self.report.games_with_moves += 1;
        if self.table.process_game(&moves) {
            self.report.games_aggregated += 1;
        }
    }

    /// Feeds all records of a corpus, respecting `max_games`.
    pub fn add_corpus(&mut self, corpus: &str) {
        let found = split_records(corpus, self.config.max_games).count();
        info!("Found {} games", found);

        let mut progress = Progress::new("games", self.config.progress_interval);
        for record in split_records(corpus, self.config.max_games) {
            self.add_record(record);
            progress.tick();
        }
        info!(
            "Processed {} games total ({} records)",
            self.report.games_with_moves, self.report.records
        );
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }

    /// Prunes the table and turns it into a book.
    pub fn finish(mut self) -> (OpeningBook, CorpusReport) {
        self.report.positions_before_filter = self.table.len();
        self.report.filter = filter_with_config(&mut self.table, self.config);

        let book = OpeningBook::generate(&self.table);
        self.report.white_lines = book.white.len();
        self.report.black_lines = book.black.len();
        debug!(
            "Book has {} white and {} black lines",
            self.report.white_lines, self.report.black_lines
        );
        (book, self.report)
    }
}

/// Builds the book of a single corpus that is already in memory.
pub fn process_corpus(corpus: &str, config: &BookConfig) -> (OpeningBook, CorpusReport) {
    let mut run = CorpusRun::new(config);
    run.add_corpus(corpus);
    run.finish()
}

/// Reads a corpus file and builds its book. Invalid UTF-8 sequences are
/// dropped instead of failing the whole file.
pub fn process_corpus_file(
    path: &Path,
    config: &BookConfig,
) -> Result<(OpeningBook, CorpusReport), BookError> {
    info!("Processing {}...", path.display());
    let bytes = fs::read(path).map_err(|source| BookError::CorpusRead {
        path: path.to_path_buf(),
        source,
    })?;
    let corpus = decode_ignoring_invalid(&bytes);
    Ok(process_corpus(&corpus, config))
}

/// Decodes UTF-8 and silently skips every byte sequence that isn't valid.
fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Builds one book per corpus file and merges them. The first file that can't
/// be read aborts the whole run.
pub fn build_book<P: AsRef<Path>>(
    paths: &[P],
    config: &BookConfig,
) -> Result<(OpeningBook, Vec<CorpusReport>), BookError> {
    config.validate()?;

    let mut merged = OpeningBook::default();
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let (book, report) = process_corpus_file(path.as_ref(), config)?;
        merged = merged.merge(book);
        reports.push(report);
    }
    Ok((merged, reports))
}
