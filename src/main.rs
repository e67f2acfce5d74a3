use std::fs::File;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wordgarden::cli::Cli;
use wordgarden::config::Config;
use wordgarden::core::{audio, engine::Engine};
use wordgarden::games::garden::{GameState, GardenGame};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The UI owns the terminal, so logs only go to a file
    if let Some(path) = &cli.log_file {
        let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = Config::from_cli(&cli)?;

    // 1. Build the session and its presentation
    let state = GameState::new(config.word_list(), config.max_guesses, config.penalty_rule);
    let cues = audio::build_player(config.sound, &config.assets_dir);
    let game = GardenGame::new(state, cues, config.bloom_delay);

    // 2. Hand the terminal to the engine
    let terminal = ratatui::init();
    let result = Engine::new(game).run(terminal).await;
    ratatui::restore();

    let game = result?;
    let state = game.state();
    info!(
        guessed = state.words_guessed(),
        missed = state.words_missed(),
        "session over"
    );
    Ok(())
}
