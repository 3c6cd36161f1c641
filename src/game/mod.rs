mod difficulty;
mod direction;
mod food;
mod grid;
mod session;
mod snake;
mod snapshot;
pub(crate) use self::difficulty::{Difficulty, DifficultyError, SpeedTier};
pub(crate) use self::direction::Direction;
pub(crate) use self::food::{FoodKind, FoodSpawnPolicy};
pub(crate) use self::grid::{Coordinate, Grid, GridError};
pub(crate) use self::session::{GameSession, GameSettings, GameState};
pub(crate) use self::snapshot::Snapshot;
#[cfg(test)]
pub(crate) use self::food::Food;
