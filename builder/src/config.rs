//! This module is in charge of defining the configuration format with types
//! and reading the configuration.

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use openingbook::BookConfig;
use serde::Deserialize;

/// Config file that is picked up when no `--config` is given.
pub static DEFAULT_CONFIG_FILE: &str = "book-config.toml";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JavaScript source defining `MASTER_OPENING_BOOK`.
    Js,
    /// Plain json with a `white` and a `black` list.
    Json,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Plain text PGN files. Each one gets its own statistics, the books are
    /// merged afterwards.
    pub corpus_files: Vec<String>,
    pub output: String,
    pub format: OutputFormat,
    /// Previously built books in json format that are merged into the result.
    pub merge_books: Vec<String>,
    /// Debug log is written here if set.
    pub log_file: Option<String>,
    pub book: BookConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            corpus_files: vec![
                "lichess_games.pgn".to_string(),
                "lichess_games_2016.pgn".to_string(),
            ],
            output: "master_opening_book.js".to_string(),
            format: OutputFormat::Js,
            merge_books: vec![],
            log_file: None,
            book: BookConfig::default(),
        }
    }
}

/// Loads the given config file. Without a path, the default config file is
/// used if it exists, otherwise all values are defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<BuilderConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => return Ok(BuilderConfig::default()),
    };

    let config_file = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file at path: {}", path.display()))?;
    parse_config(&config_file)
        .with_context(|| format!("Could not parse config file at path: {}", path.display()))
}

pub fn parse_config(config_file: &str) -> anyhow::Result<BuilderConfig> {
    let config: BuilderConfig = toml::from_str(config_file)?;
    config.book.validate()?;
    Ok(config)
}
