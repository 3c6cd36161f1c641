use super::difficulty::{Difficulty, SpeedTier, StepAccumulator};
use super::direction::Direction;
use super::food::{Food, FoodKind, FoodSpawnPolicy};
use super::grid::Grid;
use super::snake::Snake;
use super::snapshot::Snapshot;
use crate::highscores::HighscoreStore;
use crate::ticker::TickScheduler;
use crate::util::error_chain;
use log::{debug, info, warn};
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum GameState {
    /// Waiting for the very first start intent
    NewGame,
    Running,
    /// The last run ended; waiting for a start intent to begin the next one
    GameOver,
}

/// Validated settings for a game session
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameSettings {
    pub(crate) grid: Grid,
    pub(crate) initial_length: usize,
    pub(crate) spawn_policy: FoodSpawnPolicy,
    pub(crate) difficulty: Difficulty,
}

/// What a single call to [`GameSession::tick()`] did
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The game is not running
    Idle,
    /// Time passed but the snake has not yet accumulated a full step
    Waiting,
    Moved,
    Ate(FoodKind),
    /// The snake hit a wall or itself, ending the run
    Collided,
}

/// The whole mutable state of a game: the snake, the food, the score, and
/// where in the NewGame → Running → GameOver cycle we are.
#[derive(Clone, Debug)]
pub(crate) struct GameSession<R, S> {
    rng: R,
    store: S,
    settings: GameSettings,
    state: GameState,
    snake: Snake,
    food: Food,
    score: u32,
    reached_score: Option<u32>,
    pending_direction: Option<Direction>,
    accumulator: StepAccumulator,
    tier: SpeedTier,
    ticks: u64,
}

impl<R: Rng, S: HighscoreStore> GameSession<R, S> {
    pub(crate) fn new(settings: GameSettings, mut rng: R, store: S) -> GameSession<R, S> {
        let cell_size = settings.grid.cell_size();
        let snake = Snake::new(settings.initial_length, cell_size);
        let food = settings.spawn_policy.spawn(&mut rng, settings.grid, &snake);
        let tier = settings.difficulty.base();
        GameSession {
            rng,
            store,
            state: GameState::NewGame,
            snake,
            food,
            score: 0,
            reached_score: None,
            pending_direction: None,
            accumulator: StepAccumulator::new(cell_size),
            tier,
            ticks: 0,
            settings,
        }
    }

    /// Advance the game by one tick.
    ///
    /// While running, the step accumulator is fed; once it holds a full cell
    /// the most recent direction intent is applied and the snake takes one
    /// step.  The target cell is checked before anything moves: a wall or
    /// any segment of the snake, the tail included, ends the run.
    /// Otherwise the snake grows if the food lies there and shifts if not.
    pub(crate) fn tick<T: TickScheduler + ?Sized>(&mut self, scheduler: &mut T) -> TickOutcome {
        if self.state != GameState::Running {
            return TickOutcome::Idle;
        }
        self.ticks += 1;
        if !self.accumulator.add(self.tier.step) {
            return TickOutcome::Waiting;
        }
        if let Some(direction) = self.pending_direction.take() {
            let _ = self.snake.turn(direction);
        }
        let new_head = self
            .settings
            .grid
            .offset(self.snake.head(), self.snake.direction());
        if self.snake.collides_at(self.settings.grid, new_head) {
            self.game_over(scheduler);
            return TickOutcome::Collided;
        }
        if self.food.collides_with(new_head) {
            self.snake.grow(new_head);
            let kind = self.food.kind;
            self.score = self.score.saturating_add(self.food.value());
            self.respawn_food();
            self.update_tier(scheduler);
            TickOutcome::Ate(kind)
        } else {
            self.snake.advance();
            TickOutcome::Moved
        }
    }

    /// Start a run from either the title screen or the game-over screen.
    /// Ignored while a run is in progress.
    pub(crate) fn on_start_intent(&mut self) {
        if self.state != GameState::Running {
            info!("Starting new run");
            self.state = GameState::Running;
            self.reached_score = None;
        }
    }

    /// Queue a change of direction for the next step.  Reversing into the
    /// direction of the last step is ignored, as is any direction intent
    /// outside of a run.
    pub(crate) fn on_direction_intent(&mut self, direction: Direction) {
        if self.state == GameState::Running && direction != self.snake.direction().reverse() {
            self.pending_direction = Some(direction);
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.settings.grid,
            state: self.state,
            segments: self.snake.segments(),
            food: self.food,
            score: self.score,
            reached_score: self.reached_score,
            highscore: self.store.get_highscore(),
        }
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    /// Time between ticks at the current speed tier
    pub(crate) fn tick_interval(&self) -> Duration {
        self.tier.tick_interval
    }

    fn respawn_food(&mut self) {
        self.food = self
            .settings
            .spawn_policy
            .spawn(&mut self.rng, self.settings.grid, &self.snake);
        match self.food.position {
            Some(pos) => debug!("Spawned {:?} food at ({}, {})", self.food.kind, pos.x, pos.y),
            None => debug!("No free cell left for food"),
        }
    }

    fn update_tier<T: TickScheduler + ?Sized>(&mut self, scheduler: &mut T) {
        let tier = self.settings.difficulty.tier_for(self.score);
        if tier != self.tier {
            info!(
                "Score {} reached speed level {}",
                self.score,
                self.settings.difficulty.level_for(self.score)
            );
            self.set_tier(tier, scheduler);
        }
    }

    fn set_tier<T: TickScheduler + ?Sized>(&mut self, tier: SpeedTier, scheduler: &mut T) {
        let rate_changed = tier.tick_interval != self.tier.tick_interval;
        self.tier = tier;
        if rate_changed {
            scheduler.set_tick_rate(tier.tick_interval);
        }
    }

    fn game_over<T: TickScheduler + ?Sized>(&mut self, scheduler: &mut T) {
        let reached = self.score;
        info!(
            "Run ended after {} ticks with score {reached} and length {}",
            self.ticks,
            self.snake.len()
        );
        match self.store.set_highscore(reached) {
            Ok(true) => info!("New highscore: {reached}"),
            Ok(false) => (),
            Err(e) => warn!("{}", error_chain(&e)),
        }
        self.snake.reset(self.settings.initial_length);
        self.pending_direction = None;
        self.score = 0;
        self.ticks = 0;
        self.accumulator.reset();
        self.respawn_food();
        let base = self.settings.difficulty.base();
        self.set_tier(base, scheduler);
        self.reached_score = Some(reached);
        self.state = GameState::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Coordinate;
    use crate::highscores::MemoryHighscores;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// Out of the snake's way in every test below
    const FAR_AWAY: Coordinate = Coordinate::new(300, 300);

    #[derive(Debug, Default)]
    struct RecordingScheduler(Vec<Duration>);

    impl TickScheduler for RecordingScheduler {
        fn set_tick_rate(&mut self, interval: Duration) {
            self.0.push(interval);
        }
    }

    fn settings(difficulty: Difficulty) -> GameSettings {
        GameSettings {
            grid: Grid::new(400, 10).unwrap(),
            initial_length: 4,
            spawn_policy: FoodSpawnPolicy::default(),
            difficulty,
        }
    }

    fn session_with(difficulty: Difficulty) -> GameSession<ChaCha12Rng, MemoryHighscores> {
        let mut session = GameSession::new(
            settings(difficulty),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            MemoryHighscores::default(),
        );
        session.food = Food::new(FAR_AWAY, FoodKind::Plain);
        session
    }

    fn session() -> GameSession<ChaCha12Rng, MemoryHighscores> {
        session_with(Difficulty::standard(10))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn tier(min_score: u32, interval: u64, step: i32) -> SpeedTier {
        SpeedTier {
            min_score,
            tick_interval: ms(interval),
            step,
        }
    }

    #[test]
    fn start_runs_game() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        assert_eq!(session.state(), GameState::NewGame);
        assert_eq!(session.tick(&mut sched), TickOutcome::Idle);
        session.on_start_intent();
        assert_eq!(session.state(), GameState::Running);
        let snap = session.snapshot();
        assert_eq!(snap.segments.len(), 5);
        assert!(snap.segments.iter().all(|c| c.y == 0));
        assert_eq!(snap.head(), Some(Coordinate::new(40, 0)));
        assert_eq!(snap.score, 0);
        assert_eq!(session.tick_interval(), ms(100));
    }

    #[test]
    fn new_session_food_is_placed_off_snake() {
        let session = GameSession::new(
            settings(Difficulty::standard(10)),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            MemoryHighscores::default(),
        );
        let pos = session.food.position.unwrap();
        assert!(session.settings.grid.contains(pos));
        assert!(!session.snake.occupies(pos));
    }

    #[test]
    fn moving_keeps_length() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        for i in 1..=10 {
            assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
            assert_eq!(session.snake.len(), 5);
            assert_eq!(session.snake.head(), Coordinate::new(40 + i * 10, 0));
        }
        assert!(sched.0.is_empty());
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.food = Food::new(Coordinate::new(50, 0), FoodKind::Bonus);
        assert_eq!(session.tick(&mut sched), TickOutcome::Ate(FoodKind::Bonus));
        assert_eq!(session.score, 2);
        assert_eq!(session.snake.len(), 6);
        assert_eq!(session.snake.head(), Coordinate::new(50, 0));
        // The new food cannot land on the cell just eaten, since the head is
        // now there
        let new_pos = session.food.position.unwrap();
        assert_ne!(new_pos, Coordinate::new(50, 0));
        assert!(!session.snake.occupies(new_pos));

        session.food = Food::new(Coordinate::new(60, 0), FoodKind::Plain);
        assert_eq!(session.tick(&mut sched), TickOutcome::Ate(FoodKind::Plain));
        assert_eq!(session.score, 3);
        assert_eq!(session.snake.len(), 7);
    }

    #[test]
    fn reversal_is_ignored() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Left);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.snake.direction(), Direction::Right);
        assert_eq!(session.snake.head(), Coordinate::new(50, 0));
    }

    #[test]
    fn latest_intent_wins() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Up);
        session.on_direction_intent(Direction::Down);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.snake.head(), Coordinate::new(40, 10));
        // Now travelling down; up is a reversal
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.snake.head(), Coordinate::new(40, 20));
    }

    #[test]
    fn intents_outside_a_run_are_ignored() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_direction_intent(Direction::Down);
        session.on_start_intent();
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.snake.head(), Coordinate::new(50, 0));
    }

    #[test]
    fn hitting_top_wall_ends_run() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.snapshot().reached_score, Some(0));
        assert_eq!(session.snapshot().highscore, Some(0));
    }

    #[test]
    fn hitting_right_wall_ends_run() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        // Head starts at x=40; the last legal column is x=380
        for _ in 0..34 {
            assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        }
        assert_eq!(session.snake.head(), Coordinate::new(380, 0));
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.state(), GameState::GameOver);
    }

    #[test]
    fn running_into_self_ends_run() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.food = Food::new(Coordinate::new(50, 0), FoodKind::Plain);
        assert_eq!(session.tick(&mut sched), TickOutcome::Ate(FoodKind::Plain));
        session.food = Food::new(FAR_AWAY, FoodKind::Plain);
        for d in [Direction::Down, Direction::Left] {
            session.on_direction_intent(d);
            assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        }
        assert_eq!(session.snake.head(), Coordinate::new(40, 10));
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.state(), GameState::GameOver);
        let snap = session.snapshot();
        assert_eq!(snap.reached_score, Some(1));
        assert_eq!(snap.highscore, Some(1));
        assert_eq!(snap.score, 0);
        assert_eq!(snap.segments.len(), 5);
        assert_eq!(session.snake.direction(), Direction::Right);
    }

    #[test]
    fn entering_tail_cell_ends_run() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        // A 2x2 loop: turning down aims the head at the current tail
        session.snake.body = [
            Coordinate::new(10, 0),
            Coordinate::new(0, 0),
            Coordinate::new(0, 10),
            Coordinate::new(10, 10),
        ]
        .into_iter()
        .collect();
        session.snake.direction = Direction::Right;
        session.on_direction_intent(Direction::Down);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.state(), GameState::GameOver);
        assert_eq!(session.snapshot().reached_score, Some(0));
    }

    #[test]
    fn game_over_then_start_runs_again() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.tick(&mut sched), TickOutcome::Idle);
        session.on_direction_intent(Direction::Down);
        session.on_start_intent();
        assert_eq!(session.state(), GameState::Running);
        assert_eq!(session.snapshot().reached_score, None);
        session.food = Food::new(FAR_AWAY, FoodKind::Plain);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.snake.head(), Coordinate::new(50, 0));
    }

    #[test]
    fn highscore_never_decreases() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.food = Food::new(Coordinate::new(50, 0), FoodKind::Bonus);
        let _ = session.tick(&mut sched);
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.snapshot().highscore, Some(2));
        session.on_start_intent();
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(session.snapshot().reached_score, Some(0));
        assert_eq!(session.snapshot().highscore, Some(2));
    }

    #[test]
    fn speed_rises_with_score_and_resets_after_game_over() {
        let difficulty =
            Difficulty::new(vec![tier(0, 100, 10), tier(1, 80, 10), tier(3, 60, 10)], 10).unwrap();
        let mut session = session_with(difficulty);
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        for x in [50, 60, 70] {
            session.food = Food::new(Coordinate::new(x, 0), FoodKind::Plain);
            assert_eq!(session.tick(&mut sched), TickOutcome::Ate(FoodKind::Plain));
        }
        assert_eq!(session.score, 3);
        assert_eq!(session.tick_interval(), ms(60));
        assert_eq!(sched.0, [ms(80), ms(60)]);
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert_eq!(sched.0, [ms(80), ms(60), ms(100)]);
        session.on_start_intent();
        assert_eq!(session.tick_interval(), ms(100));
    }

    #[test]
    fn bonus_can_skip_a_tier() {
        let difficulty =
            Difficulty::new(vec![tier(0, 100, 10), tier(1, 80, 10), tier(2, 60, 10)], 10).unwrap();
        let mut session = session_with(difficulty);
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.food = Food::new(Coordinate::new(50, 0), FoodKind::Bonus);
        assert_eq!(session.tick(&mut sched), TickOutcome::Ate(FoodKind::Bonus));
        assert_eq!(sched.0, [ms(60)]);
    }

    #[test]
    fn game_over_at_base_speed_keeps_rate() {
        let mut session = session();
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Up);
        assert_eq!(session.tick(&mut sched), TickOutcome::Collided);
        assert!(sched.0.is_empty());
    }

    #[test]
    fn sub_cell_steps_move_every_other_tick() {
        let difficulty = Difficulty::new(vec![tier(0, 20, 5), tier(1, 20, 10)], 10).unwrap();
        let mut session = session_with(difficulty);
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        assert_eq!(session.tick(&mut sched), TickOutcome::Waiting);
        assert_eq!(session.snake.head(), Coordinate::new(40, 0));
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.tick(&mut sched), TickOutcome::Waiting);
        session.food = Food::new(Coordinate::new(60, 0), FoodKind::Plain);
        assert_eq!(session.tick(&mut sched), TickOutcome::Ate(FoodKind::Plain));
        // Same tick interval, so the scheduler is left alone
        assert!(sched.0.is_empty());
        session.food = Food::new(FAR_AWAY, FoodKind::Plain);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
    }

    #[test]
    fn direction_intent_waits_for_next_step() {
        let difficulty = Difficulty::new(vec![tier(0, 20, 5)], 10).unwrap();
        let mut session = session_with(difficulty);
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Down);
        assert_eq!(session.tick(&mut sched), TickOutcome::Waiting);
        assert_eq!(session.snake.direction(), Direction::Right);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.snake.direction(), Direction::Down);
        assert_eq!(session.snake.head(), Coordinate::new(40, 10));
    }

    #[test]
    fn no_reversal_between_steps() {
        let difficulty = Difficulty::new(vec![tier(0, 20, 5)], 10).unwrap();
        let mut session = session_with(difficulty);
        let mut sched = RecordingScheduler::default();
        session.on_start_intent();
        session.on_direction_intent(Direction::Down);
        assert_eq!(session.tick(&mut sched), TickOutcome::Waiting);
        // Still travelling right, so left is a reversal and the queued turn
        // down survives
        session.on_direction_intent(Direction::Left);
        assert_eq!(session.tick(&mut sched), TickOutcome::Moved);
        assert_eq!(session.state(), GameState::Running);
        assert_eq!(session.snake.direction(), Direction::Down);
        assert_eq!(session.snake.head(), Coordinate::new(40, 10));
    }
}
