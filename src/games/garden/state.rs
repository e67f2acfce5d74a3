use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Guesses a fresh round starts with. Also the number of leaves on the flower.
pub const MAX_GUESSES: u8 = 8;

/// Placeholder shown for letters not uncovered yet.
pub const PLACEHOLDER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    PlayableRoundsRemain,
    AllWordsExhausted,
}

/// Decides which guesses cost a leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PenaltyRule {
    /// Only letters missing from the word are penalized.
    #[default]
    Strict,
    /// Also penalizes every guess after the first, right or wrong, until the
    /// round has taken its first penalty. Kept for parity with the first release.
    RepeatQuirk,
}

/// Everything the presentation layer reacts to after a guess, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
    WordGuessed { guesses: usize },
    WordMissed,
    SessionExhausted,
}

/// All mutable data for one play session.
#[derive(Debug, Clone)]
pub struct GameState {
    word_list: Vec<String>,
    max_guesses: u8,
    penalty_rule: PenaltyRule,
    current_word_index: usize,
    target_word: String,
    guesses: Vec<char>,
    guesses_remaining: u8,
    words_guessed: usize,
    words_missed: usize,
    round_outcome: RoundOutcome,
    session_outcome: SessionOutcome,
}

impl GameState {
    /// Builds a session over `word_list` and starts the first round.
    ///
    /// Words are expected to be uppercase ASCII letters; `Config` validates
    /// them before they get here. `max_guesses` is clamped to at least 1.
    pub fn new(word_list: Vec<String>, max_guesses: u8, penalty_rule: PenaltyRule) -> Self {
        let session_outcome = if word_list.is_empty() {
            SessionOutcome::AllWordsExhausted
        } else {
            SessionOutcome::PlayableRoundsRemain
        };
        let max_guesses = max_guesses.max(1);

        let mut state = Self {
            word_list,
            max_guesses,
            penalty_rule,
            current_word_index: 0,
            target_word: String::new(),
            guesses: Vec::new(),
            guesses_remaining: max_guesses,
            words_guessed: 0,
            words_missed: 0,
            round_outcome: RoundOutcome::InProgress,
            session_outcome,
        };
        state.start_round();
        state
    }

    /// Selects the current word and resets the per-round data.
    /// Does nothing once every word has been played.
    pub fn start_round(&mut self) {
        let Some(word) = self.word_list.get(self.current_word_index) else {
            return;
        };

        self.target_word = word.clone();
        self.guesses.clear();
        self.guesses_remaining = self.max_guesses;
        self.round_outcome = RoundOutcome::InProgress;
        info!(index = self.current_word_index, len = self.target_word.len(), "round started");
    }

    /// Adds `letter` to this round's guesses. Repeats are kept so the guess count stays honest.
    pub fn record_guess(&mut self, letter: char) {
        if !self.accepts_guesses() {
            return;
        }
        self.guesses.push(letter);
    }

    /// Applies the penalty rule for `letter` (already recorded) and resolves the round.
    pub fn evaluate_guess(&mut self, letter: char) -> Vec<Feedback> {
        if !self.accepts_guesses() {
            return Vec::new();
        }

        let mut events = Vec::new();

        if self.is_penalized(letter) {
            self.guesses_remaining = self.guesses_remaining.saturating_sub(1);
            events.push(Feedback::Incorrect);
        } else {
            events.push(Feedback::Correct);
        }
        debug!(%letter, remaining = self.guesses_remaining, "guess evaluated");

        if self.is_word_complete() {
            self.round_outcome = RoundOutcome::Won;
            self.words_guessed += 1;
            events.push(Feedback::WordGuessed {
                guesses: self.guesses.len(),
            });
        } else if self.guesses_remaining == 0 {
            self.round_outcome = RoundOutcome::Lost;
            self.words_missed += 1;
            events.push(Feedback::WordMissed);
        } else {
            return events;
        }

        info!(
            outcome = ?self.round_outcome,
            guessed = self.words_guessed,
            missed = self.words_missed,
            "round resolved"
        );

        self.current_word_index += 1;
        if self.current_word_index == self.word_list.len() {
            self.session_outcome = SessionOutcome::AllWordsExhausted;
            events.push(Feedback::SessionExhausted);
        }

        events
    }

    /// Records and evaluates one guess. Returns no events when the round is already over.
    pub fn submit_guess(&mut self, letter: char) -> Vec<Feedback> {
        if !self.accepts_guesses() {
            return Vec::new();
        }
        self.record_guess(letter);
        self.evaluate_guess(letter)
    }

    /// Moves past a resolved round: the next word, or a fresh session once all words are played.
    pub fn advance_round(&mut self) {
        match (self.session_outcome, self.round_outcome) {
            (SessionOutcome::AllWordsExhausted, _) => self.restart_session(),
            (_, RoundOutcome::InProgress) => {}
            _ => self.start_round(),
        }
    }

    pub fn restart_session(&mut self) {
        self.current_word_index = 0;
        self.words_guessed = 0;
        self.words_missed = 0;
        if !self.word_list.is_empty() {
            self.session_outcome = SessionOutcome::PlayableRoundsRemain;
        }
        info!(words = self.word_list.len(), "session restarted");
        self.start_round();
    }

    /// An empty word list never starts a round, so there is nothing to guess.
    fn accepts_guesses(&self) -> bool {
        self.round_outcome == RoundOutcome::InProgress && !self.target_word.is_empty()
    }

    fn is_penalized(&self, letter: char) -> bool {
        if !self.target_word.contains(letter) {
            return true;
        }

        match self.penalty_rule {
            PenaltyRule::Strict => false,
            // `letter` is already recorded, so it always counts as guessed
            PenaltyRule::RepeatQuirk => {
                self.guesses.len() > 1 && self.guesses_remaining == self.max_guesses
            }
        }
    }

    fn is_word_complete(&self) -> bool {
        self.target_word.chars().all(|c| self.guesses.contains(&c))
    }

    /// The target word with unguessed letters masked, letters separated by spaces.
    pub fn revealed_word(&self) -> String {
        self.target_word
            .chars()
            .map(|c| if self.guesses.contains(&c) { c } else { PLACEHOLDER })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn flower_key(&self) -> String {
        format!("flower{}", self.guesses_remaining)
    }

    pub fn wilt_key(&self) -> String {
        format!("wilt{}", self.guesses_remaining)
    }

    /// Words not yet played this session.
    pub fn words_left(&self) -> usize {
        self.word_list.len() - (self.words_guessed + self.words_missed)
    }

    pub fn word_list(&self) -> &[String] {
        &self.word_list
    }

    pub fn max_guesses(&self) -> u8 {
        self.max_guesses
    }

    pub fn penalty_rule(&self) -> PenaltyRule {
        self.penalty_rule
    }

    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn guesses(&self) -> &[char] {
        &self.guesses
    }

    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    pub fn guesses_remaining(&self) -> u8 {
        self.guesses_remaining
    }

    pub fn words_guessed(&self) -> usize {
        self.words_guessed
    }

    pub fn words_missed(&self) -> usize {
        self.words_missed
    }

    pub fn round_outcome(&self) -> RoundOutcome {
        self.round_outcome
    }

    pub fn session_outcome(&self) -> SessionOutcome {
        self.session_outcome
    }

    pub fn is_round_over(&self) -> bool {
        self.round_outcome != RoundOutcome::InProgress
    }
}
