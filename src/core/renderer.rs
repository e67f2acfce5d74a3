/// Generic game renderer trait: drawing stays out of the game's state logic
pub trait GameRenderer<State> {
    /// Draws `state` into the Ratatui frame. Pure rendering, no game logic.
    fn render(&self, frame: &mut ratatui::Frame, state: &State);
}
