/// Word Garden: guess the hidden word before the flower loses its leaves
pub mod art;
pub mod game;
pub mod renderer;
pub mod state;

pub use game::{GardenGame, GardenMsg};
pub use renderer::GardenRenderer;
pub use state::{Feedback, GameState, PenaltyRule, RoundOutcome, SessionOutcome};
