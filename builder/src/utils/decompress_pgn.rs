//! Decompresses a Lichess PGN database from its .zst archive so that the
//! plain text can be fed into `build_book`.
mod decompress;

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

#[derive(Parser, Debug)]
#[command(about = "Decompresses a zstd compressed PGN database into a plain text file.")]
struct Cli {
    #[arg(
        default_value = "lichess_db_standard_rated_2016-03.pgn.zst",
        help = "The compressed database."
    )]
    input: PathBuf,

    #[arg(
        default_value = "lichess_games_2016.pgn",
        help = "Where the plain text PGN is written."
    )]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logger();

    info!("Decompressing {}...", cli.input.display());
    info!("Output will be saved to: {}", cli.output.display());

    match decompress::decompress_file(&cli.input, &cli.output) {
        Ok(report) => {
            info!(
                "Input file size: {:.1} MB",
                decompress::mebibytes(report.input_bytes)
            );
            info!(
                "Output file size: {:.1} MB",
                decompress::mebibytes(report.output_bytes)
            );
            info!("Compression ratio: {:.2}x", report.ratio());
            info!("Decompression complete, you can now run build_book on {}", cli.output.display());
        }
        Err(err) => {
            error!("Decompression failed: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logger() {
    use simplelog::*;

    if TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Logger was already initialized");
    }
}
