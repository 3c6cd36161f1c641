use super::direction::Direction;
use super::grid::{Coordinate, Grid};
use std::collections::VecDeque;

/// Snake state.
///
/// The body is stored head first.  All coordinates are in grid units and
/// are multiples of `cell_size`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The positions of all of the cells in the snake, with the head at the
    /// front and the tail at the back.  Never empty.
    pub(super) body: VecDeque<Coordinate>,

    /// The direction in which the snake is currently travelling
    pub(super) direction: Direction,

    cell_size: i32,
}

impl Snake {
    /// Create a new snake in its starting position; see [`Snake::reset()`].
    pub(crate) fn new(initial_length: usize, cell_size: i32) -> Snake {
        let mut snake = Snake {
            body: VecDeque::new(),
            direction: Direction::Right,
            cell_size,
        };
        snake.reset(initial_length);
        snake
    }

    /// Rebuild the body as `initial_length + 1` segments along the top row,
    /// with the head furthest from the origin and the tail at the origin,
    /// facing right.
    pub(crate) fn reset(&mut self, initial_length: usize) {
        let cell_size = self.cell_size;
        self.body = std::iter::successors(Some(0i32), |&x| x.checked_add(cell_size))
            .take(initial_length.saturating_add(1))
            .map(|x| Coordinate::new(x, 0))
            .collect();
        self.body.make_contiguous().reverse();
        self.direction = Direction::Right;
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Coordinate {
        *self
            .body
            .front()
            .expect("snake body should always contain at least one segment")
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    /// Return the positions of the snake's segments, head first
    pub(crate) fn segments(&self) -> &VecDeque<Coordinate> {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn occupies(&self, pos: Coordinate) -> bool {
        self.body.contains(&pos)
    }

    /// Change the snake's direction to `direction` unless that would make it
    /// double back on itself.  Returns whether the direction was accepted.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.direction = direction;
            true
        }
    }

    /// Move the snake one step in the current direction
    pub(crate) fn advance(&mut self) {
        let (dx, dy) = self.direction.delta();
        self.move_by(dx, dy);
    }

    /// Drop the tail and push a new head at `head + (dx, dy) * cell_size`.
    /// The length is unchanged and every other segment stays where it was.
    pub(crate) fn move_by(&mut self, dx: i32, dy: i32) {
        let new_head = self.shifted_head(dx, dy);
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
            self.body.push_front(new_head);
        } else if let Some(head) = self.body.front_mut() {
            *head = new_head;
        }
    }

    /// Push a new head at `new_head` while keeping the tail, increasing the
    /// length by one
    pub(crate) fn grow(&mut self, new_head: Coordinate) {
        self.body.push_front(new_head);
    }

    /// Return `true` if moving the head to `pos` would leave `grid` or run
    /// into any segment of the snake as it stands, the tail included
    pub(crate) fn collides_at(&self, grid: Grid, pos: Coordinate) -> bool {
        !grid.contains(pos) || self.occupies(pos)
    }

    fn shifted_head(&self, dx: i32, dy: i32) -> Coordinate {
        let head = self.head();
        Coordinate::new(head.x + dx * self.cell_size, head.y + dy * self.cell_size)
    }
}
