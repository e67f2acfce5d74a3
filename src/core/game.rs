/// Core game interface for the wordgarden engine
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// What the engine should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Main game trait: the engine owns the loop, the game owns its state and drawing
pub trait Game {
    /// Messages the game posts to itself through `Context::schedule`
    type Message: Send + 'static;

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Message>) -> Flow;

    /// A scheduled message came due
    fn handle_message(&mut self, msg: Self::Message, ctx: &Context<Self::Message>);

    fn render(&self, frame: &mut ratatui::Frame);
}

/// Handle given to the game for everything that outlives a single call
pub struct Context<M> {
    pub tx: UnboundedSender<M>,
}

impl<M: Send + 'static> Context<M> {
    pub fn new(tx: UnboundedSender<M>) -> Self {
        Self { tx }
    }

    /// Posts `msg` after `delay`. Dropping or cancelling the handle keeps it from arriving.
    pub fn schedule(&self, delay: Duration, msg: M) -> Scheduled {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(msg);
        });
        Scheduled { task }
    }
}

/// A pending delayed message
#[derive(Debug)]
pub struct Scheduled {
    task: JoinHandle<()>,
}

impl Scheduled {
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.task.abort();
    }
}
