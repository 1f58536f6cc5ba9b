//! Host module - the boundary between the engine and its embedding
//!
//! The engine calls into a [`Host`] for every visible change and for every
//! discrete event, and asks it for randomness. It never owns the host: a
//! [`Game`](crate::game::Game) borrows one for its whole lifetime.

use crate::piece::Piece;
use crate::playfield::Playfield;
use crate::rng::SimpleRng;
use crate::types::GameEvent;

/// Drawing, event and entropy capability supplied by the embedder
pub trait Host {
    /// Erase the visual field before a new game
    fn clear_background(&mut self);

    /// Render a piece at its current anchor and rotation
    fn draw_block(&mut self, piece: &Piece);

    /// Erase a piece previously drawn with [`Host::draw_block`]
    fn clear_block(&mut self, piece: &Piece);

    /// Render the upcoming piece in the preview area
    fn draw_preview(&mut self, piece: &Piece);

    /// Repaint every cell of the playfield
    fn paint_field(&mut self, playfield: &Playfield);

    /// Diagnostic text sink
    fn log(&mut self, _text: &str) {}

    /// Random integer in `[0, max)`
    fn random(&mut self, max: u32) -> u32;

    /// Fire-and-forget notification
    fn notify(&mut self, event: GameEvent);
}

/// A host with no display: counts draw calls, records events and log lines
///
/// Randomness comes from a seeded [`SimpleRng`], so a headless game is fully
/// reproducible. Useful for simulations, tests and benchmarks.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    rng: SimpleRng,
    events: Vec<GameEvent>,
    logs: Vec<String>,
    draws: u32,
    repaints: u32,
}

impl HeadlessHost {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            ..Self::default()
        }
    }

    /// Every event received so far, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of times `event` was received
    pub fn count(&self, event: GameEvent) -> usize {
        self.events.iter().filter(|&&e| e == event).count()
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Number of `draw_block` calls
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Number of `paint_field` calls
    pub fn repaints(&self) -> u32 {
        self.repaints
    }
}

impl Host for HeadlessHost {
    fn clear_background(&mut self) {}

    fn draw_block(&mut self, _piece: &Piece) {
        self.draws += 1;
    }

    fn clear_block(&mut self, _piece: &Piece) {}

    fn draw_preview(&mut self, _piece: &Piece) {}

    fn paint_field(&mut self, _playfield: &Playfield) {
        self.repaints += 1;
    }

    fn log(&mut self, text: &str) {
        self.logs.push(text.to_string());
    }

    fn random(&mut self, max: u32) -> u32 {
        self.rng.next_range(max)
    }

    fn notify(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
