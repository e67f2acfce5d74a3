//! Keyboard flow, feedback cues and the wilt/bloom image sequence.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use wordgarden::core::audio::{RecordingPlayer, SoundCue};
use wordgarden::games::garden::game::{ANOTHER_WORD_LABEL, EXHAUSTED_MESSAGE, LOST_MESSAGE, NEW_ROUND_MESSAGE, RESTART_LABEL};
use wordgarden::games::garden::{GameState, GardenGame, GardenMsg, PenaltyRule};
use wordgarden::{Context, Flow, Game};

const BLOOM: Duration = Duration::from_millis(750);

struct Harness {
    game: GardenGame,
    ctx: Context<GardenMsg>,
    rx: UnboundedReceiver<GardenMsg>,
    cues: RecordingPlayer,
}

impl Harness {
    fn new(words: &[&str]) -> Self {
        Self::with_max_guesses(words, 8)
    }

    fn with_max_guesses(words: &[&str], max_guesses: u8) -> Self {
        let state = GameState::new(words.iter().map(|w| w.to_string()).collect(), max_guesses, PenaltyRule::Strict);
        let cues = RecordingPlayer::default();
        let game = GardenGame::new(state, Box::new(cues.clone()), BLOOM);
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            game,
            ctx: Context::new(tx),
            rx,
            cues,
        }
    }

    fn key(&mut self, code: KeyCode) -> Flow {
        self.game.handle_input(KeyEvent::new(code, KeyModifiers::NONE), &self.ctx)
    }

    fn guess(&mut self, letter: char) {
        self.key(KeyCode::Char(letter));
        self.key(KeyCode::Enter);
    }

    /// Lets the bloom timer run out and delivers what it posted, as the engine would
    async fn wait_for_bloom(&mut self) {
        self.let_bloom_fire().await;
        self.deliver();
    }

    /// Lets the bloom timer post its message but leaves it queued
    async fn let_bloom_fire(&self) {
        tokio::time::sleep(BLOOM + Duration::from_millis(10)).await;
    }

    fn deliver(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.game.handle_message(msg, &self.ctx);
        }
    }

    fn screen(&self) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 32)).unwrap();
        terminal.draw(|f| self.game.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

#[tokio::test(start_paused = true)]
async fn typing_keeps_only_the_last_letter() {
    let mut h = Harness::new(&["SWIFT"]);
    h.key(KeyCode::Char('1'));
    assert_eq!(h.game.input(), None);

    h.key(KeyCode::Char('a'));
    h.key(KeyCode::Char('%'));
    h.key(KeyCode::Char('w'));
    assert_eq!(h.game.input(), Some('W'));

    h.key(KeyCode::Backspace);
    assert_eq!(h.game.input(), None);

    // empty box: Enter does nothing
    h.key(KeyCode::Enter);
    assert_eq!(h.game.state().guess_count(), 0);
    assert_eq!(h.game.status(), NEW_ROUND_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn correct_guess_reports_progress() {
    let mut h = Harness::new(&["SWIFT"]);
    h.guess('s');

    assert_eq!(h.game.input(), None);
    assert_eq!(h.game.status(), "You've made 1 guess");
    assert_eq!(h.game.state().revealed_word(), "S _ _ _ _");
    assert_eq!(h.game.image_key(), "flower8");
    assert_eq!(h.cues.played(), vec![SoundCue::Correct]);

    h.guess('w');
    assert_eq!(h.game.status(), "You've made 2 guesses");
}

#[tokio::test(start_paused = true)]
async fn wrong_guess_wilts_then_blooms() {
    let mut h = Harness::new(&["SWIFT"]);
    h.guess('z');

    assert_eq!(h.game.image_key(), "wilt7");
    assert!(h.game.is_bloom_pending());
    assert_eq!(h.game.state().guesses_remaining(), 7);
    assert_eq!(h.cues.played(), vec![SoundCue::Incorrect]);

    h.wait_for_bloom().await;
    assert_eq!(h.game.image_key(), "flower7");
    assert!(!h.game.is_bloom_pending());
}

#[tokio::test(start_paused = true)]
async fn next_guess_settles_a_pending_bloom() {
    let mut h = Harness::new(&["SWIFT"]);
    h.guess('z');
    h.guess('s');

    assert_eq!(h.game.image_key(), "flower7");
    assert!(!h.game.is_bloom_pending());

    // the cancelled timer posts nothing
    h.wait_for_bloom().await;
    assert_eq!(h.game.image_key(), "flower7");
}

#[tokio::test(start_paused = true)]
async fn queued_bloom_from_a_finished_round_is_dropped() {
    let mut h = Harness::with_max_guesses(&["CAT", "DOG"], 1);
    h.guess('z');
    assert_eq!(h.game.image_key(), "wilt0");

    // the timer has already posted, but the player moves on first
    h.let_bloom_fire().await;
    h.key(KeyCode::Enter);
    h.deliver();

    assert_eq!(h.game.state().target_word(), "DOG");
    assert_eq!(h.game.image_key(), "flower1");
    assert!(!h.game.is_bloom_pending());
}

#[tokio::test(start_paused = true)]
async fn queued_bloom_overtaken_by_a_wrong_guess_is_dropped() {
    let mut h = Harness::new(&["SWIFT"]);
    h.guess('z');
    h.let_bloom_fire().await;
    h.guess('q');
    h.deliver();

    // only the second wilt is showing, its own bloom still to come
    assert_eq!(h.game.image_key(), "wilt6");
    assert!(h.game.is_bloom_pending());

    h.wait_for_bloom().await;
    assert_eq!(h.game.image_key(), "flower6");
}

#[tokio::test(start_paused = true)]
async fn winning_offers_another_word() {
    let mut h = Harness::new(&["DOG", "CAT"]);
    for letter in ['d', 'o', 'g'] {
        h.guess(letter);
    }

    assert_eq!(h.game.status(), "You guessed it! It took you 3 guesses to guess the Word.");
    assert!(h.game.is_awaiting_advance());
    assert_eq!(h.game.button_label(), ANOTHER_WORD_LABEL);
    assert_eq!(
        h.cues.played(),
        vec![SoundCue::Correct, SoundCue::Correct, SoundCue::Correct, SoundCue::WordGuessed]
    );

    // letters are ignored while the button is up
    h.key(KeyCode::Char('x'));
    assert_eq!(h.game.input(), None);

    h.key(KeyCode::Enter);
    assert!(!h.game.is_awaiting_advance());
    assert_eq!(h.game.state().target_word(), "CAT");
    assert_eq!(h.game.status(), NEW_ROUND_MESSAGE);
    assert_eq!(h.game.image_key(), "flower8");
}

#[tokio::test(start_paused = true)]
async fn losing_the_last_word_offers_a_restart() {
    let mut h = Harness::new(&["CAT"]);
    for letter in "QWERYUIO".chars() {
        h.guess(letter);
    }

    assert_eq!(h.game.status(), format!("{LOST_MESSAGE}\n{EXHAUSTED_MESSAGE}"));
    assert_eq!(h.game.button_label(), RESTART_LABEL);
    assert_eq!(h.game.image_key(), "wilt0");
    assert_eq!(h.cues.played().last(), Some(&SoundCue::WordNotGuessed));

    h.wait_for_bloom().await;
    assert_eq!(h.game.image_key(), "flower0");

    h.key(KeyCode::Enter);
    let state = h.game.state();
    assert_eq!(state.current_word_index(), 0);
    assert_eq!(state.words_missed(), 0);
    assert_eq!(state.guesses_remaining(), 8);
    assert_eq!(h.game.button_label(), ANOTHER_WORD_LABEL);
}

#[tokio::test(start_paused = true)]
async fn ctrl_c_quits() {
    let mut h = Harness::new(&["CAT"]);
    let flow = h.game.handle_input(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &h.ctx);
    assert_eq!(flow, Flow::Quit);
    assert_eq!(h.key(KeyCode::Char('c')), Flow::Continue);
}

#[tokio::test(start_paused = true)]
async fn screen_shows_counters_word_and_flower() {
    let mut h = Harness::new(&["SWIFT", "DOG", "CAT"]);
    h.guess('i');
    let screen = h.screen();

    assert!(screen.contains("Words Guessed: 0"));
    assert!(screen.contains("Words Missed: 0"));
    assert!(screen.contains("Words to Guess: 3"));
    assert!(screen.contains("Words in Game: 3"));
    assert!(screen.contains("You've made 1 guess"));
    assert!(screen.contains("_ _ I _ _"));
    assert!(screen.contains("Guess a Letter:"));
    assert!(screen.contains("[=====]"));
}

#[tokio::test(start_paused = true)]
async fn screen_swaps_input_for_button_after_a_round() {
    let mut h = Harness::new(&["DOG"]);
    for letter in ['d', 'o', 'g'] {
        h.guess(letter);
    }
    let screen = h.screen();

    assert!(screen.contains(RESTART_LABEL));
    assert!(!screen.contains("Guess a Letter:"));
    assert!(screen.contains("D O G"));
    assert!(screen.contains("Words Guessed: 1"));
    assert!(screen.contains("Words to Guess: 0"));
}
