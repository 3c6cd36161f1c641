//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};

/// Default length of one side of the square play area, in grid units
pub(crate) const DEFAULT_EXTENT: i32 = 200;

/// Default number of grid units spanned by one cell
pub(crate) const DEFAULT_CELL_SIZE: i32 = 10;

/// Number of segments behind the head when a snake is created
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 4;

/// Number of sides on each of the two dice rolled when spawning food.  A
/// bonus item appears when both dice agree, i.e., with probability
/// `1 / BONUS_ROLL_SIDES`.
pub(crate) const BONUS_ROLL_SIDES: u32 = 6;

/// Points awarded for eating a plain food item
pub(crate) const PLAIN_FOOD_VALUE: u32 = 1;

/// Points awarded for eating a bonus food item
pub(crate) const BONUS_FOOD_VALUE: u32 = 2;

/// Default speed tiers as `(minimum score, tick interval in milliseconds)`.
/// Every default tier advances one full cell per tick.
pub(crate) const DEFAULT_TIERS: [(u32, u64); 8] = [
    (0, 100),
    (10, 90),
    (20, 80),
    (30, 60),
    (50, 50),
    (100, 40),
    (150, 30),
    (300, 20),
];

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: &str = "@@";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "[]";

/// Glyph for plain food
pub(crate) const PLAIN_FOOD_SYMBOL: &str = "()";

/// Glyph for bonus food
pub(crate) const BONUS_FOOD_SYMBOL: &str = "$$";

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for plain food
pub(crate) const PLAIN_FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for bonus food
pub(crate) const BONUS_FOOD_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Style for the score bar at the top of the screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Name of the directory (under the platform's config & data directories)
/// holding the program's files
pub(crate) const APP_DIR_NAME: &str = "gridsnake";
