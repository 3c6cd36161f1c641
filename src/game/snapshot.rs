use super::food::Food;
use super::grid::{Coordinate, Grid};
use super::session::GameState;
use std::collections::VecDeque;

/// Read-only view of a game session, everything a renderer needs to draw one
/// frame
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) grid: Grid,
    pub(crate) state: GameState,
    /// Snake segments, head first
    pub(crate) segments: &'a VecDeque<Coordinate>,
    pub(crate) food: Food,
    pub(crate) score: u32,
    /// The score at which the last run ended; only set in
    /// [`GameState::GameOver`]
    pub(crate) reached_score: Option<u32>,
    pub(crate) highscore: Option<u32>,
}

impl Snapshot<'_> {
    pub(crate) fn head(&self) -> Option<Coordinate> {
        self.segments.front().copied()
    }
}
