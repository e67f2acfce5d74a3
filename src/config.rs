/// Start-up configuration: built-in defaults, then an optional JSON file, then CLI flags
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::Cli;
use crate::core::audio::SoundMode;
use crate::games::garden::state::{PenaltyRule, MAX_GUESSES};

pub const DEFAULT_WORDS: [&str; 3] = ["SWIFT", "DOG", "CAT"];
pub const DEFAULT_BLOOM_DELAY_MS: u64 = 750;

/// Shape of the JSON config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub words: Option<Vec<String>>,
    pub max_guesses: Option<u8>,
    pub shuffle: Option<bool>,
    pub assets_dir: Option<PathBuf>,
    pub sound: Option<SoundMode>,
    pub bloom_delay_ms: Option<u64>,
    pub penalty_rule: Option<PenaltyRule>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub words: Vec<String>,
    pub max_guesses: u8,
    pub shuffle: bool,
    pub assets_dir: PathBuf,
    pub sound: SoundMode,
    pub bloom_delay: Duration,
    pub penalty_rule: PenaltyRule,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            max_guesses: MAX_GUESSES,
            shuffle: false,
            assets_dir: PathBuf::from("assets"),
            sound: SoundMode::default(),
            bloom_delay: Duration::from_millis(DEFAULT_BLOOM_DELAY_MS),
            penalty_rule: PenaltyRule::default(),
        }
    }
}

impl Config {
    /// Reads the file named by `--config` (if any) and layers the flags on top
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(file, cli)
    }

    pub fn merge(file: FileConfig, cli: &Cli) -> Result<Self> {
        let defaults = Config::default();

        let words = cli.words.clone().or(file.words).unwrap_or(defaults.words);
        let penalty_rule = if cli.repeat_quirk {
            PenaltyRule::RepeatQuirk
        } else {
            file.penalty_rule.unwrap_or(defaults.penalty_rule)
        };

        let config = Config {
            words: normalize_words(words)?,
            max_guesses: cli.max_guesses.or(file.max_guesses).unwrap_or(defaults.max_guesses),
            shuffle: cli.shuffle || file.shuffle.unwrap_or(defaults.shuffle),
            assets_dir: cli.assets.clone().or(file.assets_dir).unwrap_or(defaults.assets_dir),
            sound: cli.sound.or(file.sound).unwrap_or(defaults.sound),
            bloom_delay: cli
                .bloom_delay_ms
                .or(file.bloom_delay_ms)
                .map(Duration::from_millis)
                .unwrap_or(defaults.bloom_delay),
            penalty_rule,
        };

        if !(1..=MAX_GUESSES).contains(&config.max_guesses) {
            bail!("max guesses must be between 1 and {}, got {}", MAX_GUESSES, config.max_guesses);
        }

        info!(
            words = config.words.len(),
            max_guesses = config.max_guesses,
            shuffle = config.shuffle,
            sound = ?config.sound,
            rule = ?config.penalty_rule,
            "config loaded"
        );
        Ok(config)
    }

    /// Word list in play order
    pub fn word_list(&self) -> Vec<String> {
        let mut words = self.words.clone();
        if self.shuffle {
            words.shuffle(&mut rand::rng());
        }
        words
    }
}

/// Trims and uppercases every word; rejects empty lists and anything that is not A-Z
fn normalize_words(words: Vec<String>) -> Result<Vec<String>> {
    if words.is_empty() {
        bail!("word list is empty");
    }

    words
        .into_iter()
        .map(|word| {
            let word = word.trim().to_ascii_uppercase();
            if word.is_empty() {
                bail!("word list contains an empty word");
            }
            if !word.chars().all(|c| c.is_ascii_alphabetic()) {
                bail!("'{}' must contain letters A-Z only", word);
            }
            Ok(word)
        })
        .collect()
}
