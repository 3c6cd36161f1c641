use super::grid::{Coordinate, Grid};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum FoodKind {
    Plain,
    Bonus,
}

impl FoodKind {
    /// Points awarded for eating food of this kind
    pub(crate) fn value(self) -> u32 {
        match self {
            FoodKind::Plain => consts::PLAIN_FOOD_VALUE,
            FoodKind::Bonus => consts::BONUS_FOOD_VALUE,
        }
    }
}

/// The single food item on the board.  `position` is `None` while there is
/// nothing to eat.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) position: Option<Coordinate>,
    pub(crate) kind: FoodKind,
}

impl Food {
    pub(crate) fn new(position: Coordinate, kind: FoodKind) -> Food {
        Food {
            position: Some(position),
            kind,
        }
    }

    pub(crate) fn unset() -> Food {
        Food {
            position: None,
            kind: FoodKind::Plain,
        }
    }

    pub(crate) fn value(self) -> u32 {
        self.kind.value()
    }

    /// Return `true` if the food is at `point`.  Unset food never collides.
    pub(crate) fn collides_with(self, point: Coordinate) -> bool {
        self.position == Some(point)
    }
}

/// Decides where new food goes and whether it is a bonus item.
///
/// The kind is chosen by rolling two dice with `roll_sides` sides each; a
/// matching pair yields bonus food, so bonus food appears with probability
/// `1 / roll_sides`.  The position is chosen uniformly from the cells of
/// the play area that the snake does not occupy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FoodSpawnPolicy {
    roll_sides: u32,
}

impl FoodSpawnPolicy {
    /// Returns `None` if `roll_sides` is zero
    pub(crate) fn new(roll_sides: u32) -> Option<FoodSpawnPolicy> {
        (roll_sides > 0).then_some(FoodSpawnPolicy { roll_sides })
    }

    pub(crate) fn roll_sides(self) -> u32 {
        self.roll_sides
    }

    pub(crate) fn choose_kind<R: Rng + ?Sized>(self, rng: &mut R) -> FoodKind {
        let first = rng.random_range(1..=self.roll_sides);
        let second = rng.random_range(1..=self.roll_sides);
        if first == second {
            FoodKind::Bonus
        } else {
            FoodKind::Plain
        }
    }

    /// Create a new food item somewhere on `grid` not covered by `snake`.
    /// If the snake fills the whole play area, the returned food is unset.
    pub(crate) fn spawn<R: Rng + ?Sized>(self, rng: &mut R, grid: Grid, snake: &Snake) -> Food {
        let kind = self.choose_kind(rng);
        match grid.cells().filter(|&c| !snake.occupies(c)).choose(rng) {
            Some(pos) => Food::new(pos, kind),
            None => Food::unset(),
        }
    }
}

impl Default for FoodSpawnPolicy {
    fn default() -> FoodSpawnPolicy {
        FoodSpawnPolicy {
            roll_sides: consts::BONUS_ROLL_SIDES,
        }
    }
}
