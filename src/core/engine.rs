use crate::core::game::{Context, Flow, Game};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::{debug, info};

const FRAME: Duration = Duration::from_millis(16);

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        // channel for messages the game schedules for itself
        let (outbox_tx, mut outbox_rx) = tokio::sync::mpsc::unbounded_channel::<G::Message>();
        let ctx = Context::new(outbox_tx);

        info!("engine started");
        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (Non-blocking)
            if crossterm::event::poll(Duration::from_millis(0))? {
                if let Event::Key(key) = crossterm::event::read()? {
                    // Windows reports releases too
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.code == KeyCode::Esc {
                        break;
                    }
                    debug!(code = ?key.code, "key");
                    if self.game.handle_input(key, &ctx) == Flow::Quit {
                        break;
                    }
                }
            }

            tokio::select! {
                Some(msg) = outbox_rx.recv() => {
                    self.game.handle_message(msg, &ctx);
                }

                // Wake up regularly so input keeps getting polled
                _ = tokio::time::sleep(FRAME) => {}
            }
        }

        info!("engine stopped");
        Ok(self.game)
    }
}
