use crate::consts;
use std::time::Duration;
use thiserror::Error;

/// One speed level of the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SpeedTier {
    /// The score at which this tier takes effect
    pub(crate) min_score: u32,

    /// Time between ticks while in this tier
    pub(crate) tick_interval: Duration,

    /// Amount added to the step accumulator on every tick, in grid units.
    /// The snake moves one cell each time the accumulator fills a cell.
    pub(crate) step: i32,
}

/// Maps the score of the current run to a [`SpeedTier`].
///
/// Tiers are ordered by `min_score`, and later tiers are never slower than
/// earlier ones, so as the score rises the speed only ever increases.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Difficulty {
    tiers: Vec<SpeedTier>,
}

impl Difficulty {
    pub(crate) fn new(tiers: Vec<SpeedTier>, cell_size: i32) -> Result<Difficulty, DifficultyError> {
        let Some(first) = tiers.first() else {
            return Err(DifficultyError::Empty);
        };
        if first.min_score != 0 {
            return Err(DifficultyError::NoBaseTier);
        }
        for t in &tiers {
            if t.tick_interval.is_zero() {
                return Err(DifficultyError::ZeroInterval(t.min_score));
            }
            if !(1..=cell_size).contains(&t.step) {
                return Err(DifficultyError::Step {
                    min_score: t.min_score,
                    step: t.step,
                    cell_size,
                });
            }
        }
        for pair in tiers.windows(2) {
            let [lower, upper] = pair else {
                continue;
            };
            if upper.min_score <= lower.min_score {
                return Err(DifficultyError::Unordered(upper.min_score));
            }
            if upper.tick_interval > lower.tick_interval || upper.step < lower.step {
                return Err(DifficultyError::Slower(upper.min_score));
            }
        }
        Ok(Difficulty { tiers })
    }

    /// The default tiers, advancing a full cell of `cell_size` units on
    /// every tick
    pub(crate) fn standard(cell_size: i32) -> Difficulty {
        Difficulty {
            tiers: consts::DEFAULT_TIERS
                .iter()
                .map(|&(min_score, ms)| SpeedTier {
                    min_score,
                    tick_interval: Duration::from_millis(ms),
                    step: cell_size,
                })
                .collect(),
        }
    }

    pub(crate) fn tiers(&self) -> &[SpeedTier] {
        &self.tiers
    }

    /// Return the index of the fastest tier reached at `score`
    pub(crate) fn level_for(&self, score: u32) -> usize {
        self.tiers
            .iter()
            .rposition(|t| t.min_score <= score)
            .unwrap_or_default()
    }

    pub(crate) fn tier_for(&self, score: u32) -> SpeedTier {
        self.tiers[self.level_for(score)]
    }

    pub(crate) fn base(&self) -> SpeedTier {
        self.tier_for(0)
    }
}

/// Tracks fractional progress towards the next cell-sized step
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StepAccumulator {
    counter: i32,
    cell_size: i32,
}

impl StepAccumulator {
    pub(crate) fn new(cell_size: i32) -> StepAccumulator {
        StepAccumulator {
            counter: 0,
            cell_size,
        }
    }

    /// Add `step` to the counter.  Returns `true` if a full cell has been
    /// accumulated, in which case one cell is removed from the counter and
    /// the remainder carried over.
    pub(crate) fn add(&mut self, step: i32) -> bool {
        self.counter += step;
        if self.counter >= self.cell_size {
            self.counter -= self.cell_size;
            true
        } else {
            false
        }
    }

    pub(crate) fn reset(&mut self) {
        self.counter = 0;
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum DifficultyError {
    #[error("at least one speed tier is required")]
    Empty,
    #[error("the first speed tier must start at score 0")]
    NoBaseTier,
    #[error("speed tier at score {0} has a zero tick interval")]
    ZeroInterval(u32),
    #[error("speed tier at score {min_score} has step {step}; expected 1 to {cell_size}")]
    Step {
        min_score: u32,
        step: i32,
        cell_size: i32,
    },
    #[error("speed tier at score {0} is out of order")]
    Unordered(u32),
    #[error("speed tier at score {0} is slower than the tier before it")]
    Slower(u32),
}
