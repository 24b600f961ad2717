use std::fs;
use std::path::PathBuf;

use openingbook::{build_book, process_corpus, BookConfig, BookError, BookSide, OpeningBook};

/// Five blitz games that all start 1. e4 e5 2. Nf3. Black answers Nc6 in four
/// of them and d6 in one.
const FIVE_GAMES: &str = include_str!("data/five_games.pgn");

fn sorted(lines: &[String]) -> Vec<String> {
    let mut lines = lines.to_vec();
    lines.sort();
    lines
}

fn temp_file(name: &str, content: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("openingbook-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn five_games_end_to_end() {
    let (book, report) = process_corpus(FIVE_GAMES, &BookConfig::default());

    assert_eq!(report.records, 5);
    assert_eq!(report.games_aggregated, 5);

    // floor(5 * 0.15) = 0, so a single game is enough for d6 to stay.
    assert_eq!(
        sorted(book.lines(BookSide::Black)),
        vec!["e4 e5", "e4 e5 Nf3 Nc6", "e4 e5 Nf3 d6"]
    );
    assert_eq!(
        sorted(book.lines(BookSide::White)),
        vec![
            "e4 e5 Nf3",
            "e4 e5 Nf3 Nc6 Bb5",
            "e4 e5 Nf3 Nc6 Bc4",
            "e4 e5 Nf3 Nc6 Nc3",
            "e4 e5 Nf3 Nc6 d4",
        ]
    );
}

#[test]
fn every_line_is_a_move_sequence_without_duplicates() {
    let (book, _) = process_corpus(FIVE_GAMES, &BookConfig::default());
    for side in [BookSide::White, BookSide::Black] {
        let lines = book.lines(side);
        let mut unique = sorted(lines);
        unique.dedup();
        assert_eq!(unique.len(), lines.len());

        for line in lines {
            let moves: Vec<&str> = line.split(' ').collect();
            assert!(moves.len() >= 2);
            // The bucket is decided by the length of the prefix.
            assert_eq!(BookSide::from_ply_count(moves.len() - 1), side);
        }
    }
}

#[test]
fn stricter_thresholds_prune_more() {
    let config = BookConfig {
        min_games: 5,
        ..BookConfig::default()
    };
    let (book, _) = process_corpus(FIVE_GAMES, &config);
    assert_eq!(sorted(&book.white), vec!["e4 e5 Nf3"]);
    assert_eq!(sorted(&book.black), vec!["e4 e5", "e4 e5 Nf3 Nc6", "e4 e5 Nf3 d6"]);

    let config = BookConfig {
        survival_fraction: 0.5,
        ..BookConfig::default()
    };
    let (book, _) = process_corpus(FIVE_GAMES, &config);
    // floor(5 * 0.5) = 2 removes d6, floor(4 * 0.5) = 2 removes all fourth moves.
    assert_eq!(sorted(&book.black), vec!["e4 e5", "e4 e5 Nf3 Nc6"]);
    assert_eq!(sorted(&book.white), vec!["e4 e5 Nf3"]);
}

#[test]
fn depth_limit_shortens_lines() {
    let config = BookConfig {
        max_depth: 3,
        ..BookConfig::default()
    };
    let (book, _) = process_corpus(FIVE_GAMES, &config);
    assert_eq!(sorted(&book.white), vec!["e4 e5 Nf3"]);
    assert_eq!(sorted(&book.black), vec!["e4 e5"]);
}

#[test]
fn merging_files_is_a_union() {
    let first = temp_file("first.pgn", FIVE_GAMES.as_bytes());
    let second = temp_file("second.pgn", FIVE_GAMES.as_bytes());

    let (single, _) = build_book(&[&first], &BookConfig::default()).unwrap();
    let (merged, reports) = build_book(&[&first, &second], &BookConfig::default()).unwrap();

    assert_eq!(reports.len(), 2);
    assert_eq!(merged, single);
    assert_eq!(merged.len(), 8);
}

#[test]
fn counts_are_not_shared_between_files() {
    // Each half alone has too few games for "d4", together they would have enough.
    let half = "[Event \"a\"]\n\n1. d4 d5 2. c4 e6\n\n[Event \"b\"]\n\n1. d4 d5 2. c4 e6\n";
    let first = temp_file("half_one.pgn", half.as_bytes());
    let second = temp_file("half_two.pgn", half.as_bytes());

    let (merged, _) = build_book(&[first, second], &BookConfig::default()).unwrap();
    assert_eq!(merged, OpeningBook::default());
}

#[test]
fn broken_bytes_are_tolerated() {
    let mut content = FIVE_GAMES.as_bytes().to_vec();
    content.extend_from_slice(b"\n\n[Event \"broken\"]\n\n1. e4 \xff\xfe e5 2. N");
    let path = temp_file("broken.pgn", &content);

    let (book, reports) = build_book(&[path], &BookConfig::default()).unwrap();
    assert_eq!(reports[0].records, 6);
    assert!(book.black.contains(&"e4 e5".to_string()));
}

#[test]
fn invalid_bytes_inside_a_move_are_dropped() {
    let game = b"[Event \"x\"]\n\n1. e4 e\xff5 2. Nf3 Nc6 1-0\n";
    let content = [&game[..], &game[..], &game[..]].join(&b"\n"[..]);
    let path = temp_file("invalid_in_move.pgn", &content);

    let (book, reports) = build_book(&[path], &BookConfig::default()).unwrap();
    assert_eq!(reports[0].games_aggregated, 3);
    assert_eq!(book.black, vec!["e4 e5", "e4 e5 Nf3 Nc6"]);
    assert_eq!(book.white, vec!["e4 e5 Nf3"]);
}

#[test]
fn missing_file_aborts() {
    let existing = temp_file("exists.pgn", FIVE_GAMES.as_bytes());
    let missing = existing.with_file_name("missing.pgn");
    match build_book(&[existing, missing.clone()], &BookConfig::default()) {
        Err(BookError::CorpusRead { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected a read error, got {:?}", other.map(|(book, _)| book)),
    }
}
