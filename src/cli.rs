use std::path::PathBuf;

use clap::Parser;

use crate::core::audio::SoundMode;

#[derive(Parser, Debug, Default)]
#[command(name = "wordgarden")]
#[command(about = "🌼 Guess the hidden word before the flower loses all its leaves")]
#[command(version)]
pub struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Words to play, comma separated (e.g. "SWIFT,DOG,CAT")
    #[arg(short, long, value_delimiter = ',')]
    pub words: Option<Vec<String>>,

    /// Guesses per word (1-8)
    #[arg(short, long)]
    pub max_guesses: Option<u8>,

    /// Play the words in random order
    #[arg(long)]
    pub shuffle: bool,

    /// Directory holding the sound cue files
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// How sound cues are played
    #[arg(long, value_enum)]
    pub sound: Option<SoundMode>,

    /// Milliseconds the wilted flower shows before it settles
    #[arg(long)]
    pub bloom_delay_ms: Option<u64>,

    /// Also charge every guess after the first until the word's first miss
    #[arg(long)]
    pub repeat_quirk: bool,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
