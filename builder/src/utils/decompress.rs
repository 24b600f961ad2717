//! Streams a zstd compressed PGN database (like the ones from
//! database.lichess.org) into a plain text file that `build_book` can read.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context};

/// Lichess archives may use windows larger than the decoder's default limit.
const WINDOW_LOG_MAX: u32 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecompressReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl DecompressReport {
    /// Compressed size over decompressed size.
    pub fn ratio(&self) -> f64 {
        if self.output_bytes == 0 {
            return 0.0;
        }
        self.input_bytes as f64 / self.output_bytes as f64
    }
}

pub fn mebibytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

pub fn decompress_file(input: &Path, output: &Path) -> anyhow::Result<DecompressReport> {
    if !input.exists() {
        bail!("Input file '{}' not found!", input.display());
    }
    let input_bytes = fs::metadata(input)?.len();

    let mut decoder = zstd::stream::read::Decoder::new(File::open(input)?)?;
    decoder.window_log_max(WINDOW_LOG_MAX)?;

    let mut writer = BufWriter::new(
        File::create(output)
            .with_context(|| format!("Could not create output file {}", output.display()))?,
    );
    io::copy(&mut decoder, &mut writer)
        .with_context(|| format!("Could not decompress {}", input.display()))?;
    writer.flush()?;

    let output_bytes = fs::metadata(output)?.len();
    Ok(DecompressReport {
        input_bytes,
        output_bytes,
    })
}
