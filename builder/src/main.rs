//! Builds the opening book from one or more plain text PGN databases and
//! writes it as a JavaScript module (or json) for the engine.
mod config;
mod writer;

#[macro_use]
extern crate log;

use std::fs::{read_to_string, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use config::{BuilderConfig, OutputFormat};
use openingbook::{build_book, CorpusReport, OpeningBook};

#[derive(Parser, Debug)]
#[command(about = r#"Builds an opening book from PGN game databases.

Every corpus file is counted and filtered on its own, the resulting books are
merged. Settings come from book-config.toml (or --config), flags override them."#)]
struct Cli {
    #[arg(help = "Plain text PGN files. Replaces the corpus_files from the config.")]
    corpus: Vec<PathBuf>,

    #[arg(long, short, help = "Path of the toml config file.")]
    config: Option<PathBuf>,

    #[arg(long, short, help = "Where the book is written.")]
    output: Option<String>,

    #[arg(long, value_enum, help = "Format of the written book.")]
    format: Option<OutputFormat>,

    #[arg(long, help = "A previously built json book to merge into the result.")]
    merge: Vec<String>,

    #[arg(long, help = "Minimum number of games for a position to stay in the book.")]
    min_games: Option<u32>,

    #[arg(long, help = "Only this many moves of each game are considered.")]
    max_depth: Option<usize>,

    #[arg(long, help = "Maximum number of games read from each corpus file.")]
    max_games: Option<usize>,

    #[arg(long, help = "Fraction of a position's games a move needs to be kept.")]
    survival_fraction: Option<f64>,

    #[arg(long, help = "Also write a debug log to this file.")]
    log_file: Option<String>,

    #[arg(long, short, help = "Show debug output on the terminal.")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => apply_overrides(config, &cli),
        Err(err) => {
            // With the immediate exit, we can't use error!() here.
            eprintln!("Error loading config: {err:#}");
            std::process::exit(1);
        }
    };

    init_logger(cli.verbose, config.log_file.as_deref());

    if let Err(err) = run(&config) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

/// Command line flags take precedence over the config file.
fn apply_overrides(mut config: BuilderConfig, cli: &Cli) -> BuilderConfig {
    if !cli.corpus.is_empty() {
        config.corpus_files = cli
            .corpus
            .iter()
            .map(|path| path.display().to_string())
            .collect();
    }
    if let Some(output) = &cli.output {
        config.output = output.clone();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    config.merge_books.extend(cli.merge.iter().cloned());
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    if let Some(min_games) = cli.min_games {
        config.book.min_games = min_games;
    }
    if let Some(max_depth) = cli.max_depth {
        config.book.max_depth = max_depth;
    }
    if let Some(max_games) = cli.max_games {
        config.book.max_games = max_games;
    }
    if let Some(survival_fraction) = cli.survival_fraction {
        config.book.survival_fraction = survival_fraction;
    }
    config
}

fn run(config: &BuilderConfig) -> anyhow::Result<()> {
    info!("Opening book builder");
    debug!("Running with {:?}", config);

    let (mut book, reports) = build_book(config.corpus_files.as_slice(), &config.book)?;

    if !config.merge_books.is_empty() {
        info!("Merging opening books...");
    }
    for path in &config.merge_books {
        book = book.merge(load_book(Path::new(path))?);
    }

    log_statistics(&book, &reports);

    info!("Saving opening book to {}...", config.output);
    let rendered = writer::render_book(&book, config.format, chrono::Utc::now())?;
    writer::write_book(Path::new(&config.output), &rendered)?;
    info!("Opening book saved!");

    Ok(())
}

fn load_book(path: &Path) -> anyhow::Result<OpeningBook> {
    let json = read_to_string(path)
        .with_context(|| format!("Could not read book at path: {}", path.display()))?;
    OpeningBook::parse(&json)
        .with_context(|| format!("Could not parse book at path: {}", path.display()))
}

fn log_statistics(book: &OpeningBook, reports: &[CorpusReport]) {
    let games_processed: usize = reports.iter().map(|report| report.games_with_moves).sum();
    for report in reports {
        debug!("{:?}", report);
    }

    info!("Combined opening book statistics:");
    info!("  White lines: {}", book.white.len());
    info!("  Black lines: {}", book.black.len());
    info!("  Total unique lines: {}", book.len());
    info!("  Games processed: {}", games_processed);
}

////////////////////////////////////////////////////////////////////////////////
// Set up logging //////////////////////////////////////////////////////////////
////////////////////////////////////////////////////////////////////////////////

fn init_logger(verbose: bool, log_file: Option<&str>) {
    use simplelog::*;

    let terminal_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        terminal_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(log_file) = log_file {
        match File::create(log_file) {
            Ok(file) => loggers.push(WriteLogger::new(
                LevelFilter::Debug,
                Config::default(),
                file,
            )),
            Err(err) => eprintln!("Could not create log file {log_file}: {err}"),
        }
    }

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Logger was already initialized");
    }

    debug!("Logger successfully initialized");
}
