use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::core::audio::{CuePlayer, SoundCue};
use crate::core::game::{Context, Flow, Game, Scheduled};
use crate::core::renderer::GameRenderer;
use crate::games::garden::renderer::GardenRenderer;
use crate::games::garden::state::{Feedback, GameState, SessionOutcome};

pub const NEW_ROUND_MESSAGE: &str = "How many guesses to uncover the Hidden Word?";
pub const LOST_MESSAGE: &str = "So sorry, you're all out of Guesses.";
pub const EXHAUSTED_MESSAGE: &str = "You've tried all of the Words. Restart from the beginning?";
pub const ANOTHER_WORD_LABEL: &str = "Another Word?";
pub const RESTART_LABEL: &str = "Restart Game?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GardenMsg {
    /// The wilt animation is over; show `key` unless bloom `seq` was cancelled meanwhile
    Bloom { seq: u64, key: String },
}

/// Presentation layer around `GameState`: input box, status line, image key and sound cues
pub struct GardenGame {
    state: GameState,
    input: Option<char>,
    status: String,
    image_key: String,
    bloom_delay: Duration,
    bloom_seq: u64,
    pending_bloom: Option<(u64, Scheduled)>,
    cues: Box<dyn CuePlayer>,
    renderer: GardenRenderer,
}

impl GardenGame {
    pub fn new(state: GameState, cues: Box<dyn CuePlayer>, bloom_delay: Duration) -> Self {
        let image_key = state.flower_key();
        Self {
            state,
            input: None,
            status: NEW_ROUND_MESSAGE.to_string(),
            image_key,
            bloom_delay,
            bloom_seq: 0,
            pending_bloom: None,
            cues,
            renderer: GardenRenderer,
        }
    }

    /// Submits `letter` as a guess and reacts to what the round reports back
    pub fn guess(&mut self, letter: char, ctx: &Context<GardenMsg>) {
        self.settle_bloom();

        let events = self.state.submit_guess(letter);
        if events.is_empty() {
            return;
        }
        info!(%letter, remaining = self.state.guesses_remaining(), ?events, "guess");

        if !self.state.is_round_over() {
            self.status = progress_message(self.state.guess_count());
        }
        for event in events {
            self.react(event, ctx);
        }
    }

    /// The play-again button: next word, or a fresh session when every word was played
    pub fn advance(&mut self) {
        if !self.is_awaiting_advance() {
            return;
        }
        self.settle_bloom();
        self.state.advance_round();
        self.input = None;
        self.status = NEW_ROUND_MESSAGE.to_string();
        self.image_key = self.state.flower_key();
    }

    fn react(&mut self, event: Feedback, ctx: &Context<GardenMsg>) {
        match event {
            Feedback::Correct => self.cues.play(SoundCue::Correct),
            Feedback::Incorrect => {
                self.image_key = self.state.wilt_key();
                self.cues.play(SoundCue::Incorrect);
                self.bloom_seq += 1;
                let bloom = GardenMsg::Bloom {
                    seq: self.bloom_seq,
                    key: self.state.flower_key(),
                };
                self.pending_bloom = Some((self.bloom_seq, ctx.schedule(self.bloom_delay, bloom)));
            }
            Feedback::WordGuessed { guesses } => {
                self.status = format!(
                    "You guessed it! It took you {} to guess the Word.",
                    guesses_phrase(guesses)
                );
                self.cues.play(SoundCue::WordGuessed);
            }
            Feedback::WordMissed => {
                self.status = LOST_MESSAGE.to_string();
                self.cues.play(SoundCue::WordNotGuessed);
            }
            Feedback::SessionExhausted => {
                self.status = format!("{}\n{}", self.status, EXHAUSTED_MESSAGE);
            }
        }
    }

    /// Cancels a pending bloom and shows its final image now.
    /// A bloom message already queued is dropped by its stale `seq`.
    fn settle_bloom(&mut self) {
        if let Some((_, pending)) = self.pending_bloom.take() {
            pending.cancel();
            self.image_key = self.state.flower_key();
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> Option<char> {
        self.input
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn image_key(&self) -> &str {
        &self.image_key
    }

    pub fn is_bloom_pending(&self) -> bool {
        self.pending_bloom.is_some()
    }

    /// Whether the play-again button replaces the input box
    pub fn is_awaiting_advance(&self) -> bool {
        self.state.is_round_over() || self.state.session_outcome() == SessionOutcome::AllWordsExhausted
    }

    pub fn button_label(&self) -> &'static str {
        match self.state.session_outcome() {
            SessionOutcome::AllWordsExhausted => RESTART_LABEL,
            SessionOutcome::PlayableRoundsRemain => ANOTHER_WORD_LABEL,
        }
    }
}

impl Game for GardenGame {
    type Message = GardenMsg;

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Message>) -> Flow {
        if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
            return Flow::Quit;
        }

        if self.is_awaiting_advance() {
            if event.code == KeyCode::Enter {
                self.advance();
            }
            return Flow::Continue;
        }

        match event.code {
            KeyCode::Char(c) => {
                if let Some(letter) = filter_letter(c) {
                    self.input = Some(letter);
                }
            }
            KeyCode::Backspace | KeyCode::Delete => self.input = None,
            KeyCode::Enter => {
                // nothing typed, nothing to guess
                if let Some(letter) = self.input.take() {
                    self.guess(letter, ctx);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_message(&mut self, msg: Self::Message, _ctx: &Context<Self::Message>) {
        match msg {
            GardenMsg::Bloom { seq, key } => {
                if self.pending_bloom.as_ref().map(|(pending, _)| *pending) != Some(seq) {
                    debug!(seq, "stale bloom ignored");
                    return;
                }
                debug!(%key, "bloom");
                self.pending_bloom = None;
                self.image_key = key;
            }
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        self.renderer.render(frame, self);
    }
}

/// Keeps ASCII letters only, uppercased
pub fn filter_letter(c: char) -> Option<char> {
    c.is_ascii_alphabetic().then(|| c.to_ascii_uppercase())
}

pub fn progress_message(guesses: usize) -> String {
    format!("You've made {}", guesses_phrase(guesses))
}

fn guesses_phrase(n: usize) -> String {
    if n == 1 {
        "1 guess".to_string()
    } else {
        format!("{n} guesses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_input_to_one_uppercase_letter() {
        assert_eq!(filter_letter('q'), Some('Q'));
        assert_eq!(filter_letter('7'), None);
        assert_eq!(filter_letter('é'), None);
    }

    #[test]
    fn progress_message_inflects() {
        assert_eq!(progress_message(1), "You've made 1 guess");
        assert_eq!(progress_message(3), "You've made 3 guesses");
    }
}
