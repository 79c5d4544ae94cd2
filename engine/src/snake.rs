use std::collections::VecDeque;

use crate::grid::Grid;
use crate::rng::SessionRng;
use crate::types::{Cell, Direction};

/// The controllable body. Head is at the front of the deque; the body
/// converges toward `length` as the snake advances.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Cell>,
    length: usize,
    direction: Direction,
    pending_direction: Option<Direction>,
    just_reset: bool,
}

impl Snake {
    pub fn new(grid: &Grid, rng: &mut SessionRng) -> Self {
        let mut snake = Self {
            body: VecDeque::new(),
            length: 1,
            direction: Direction::Up,
            pending_direction: None,
            just_reset: false,
        };
        snake.reset(grid, rng);
        snake.just_reset = false;
        snake
    }

    pub fn head(&self) -> Cell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Target length; the body may lag behind it by one segment until
    /// the next advance.
    pub fn target_length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Queue a turn for the next advance. A 180° reversal of the
    /// current direction is ignored, not queued.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(&self.direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// One movement step: commit the pending turn, push the wrapped new
    /// head, trim the tail once the body exceeds the target length.
    /// Returns the vacated tail cell so a renderer can erase it.
    pub fn advance(&mut self, grid: &Grid) -> Option<Cell> {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
        let new_head = grid.wrap(self.head(), self.direction);
        self.body.push_front(new_head);
        if self.body.len() > self.length {
            Some(self.body.pop_back().expect("Snake body should never be empty"))
        } else {
            None
        }
    }

    pub fn grow(&mut self, amount: usize) {
        self.length += amount;
    }

    /// Lower the target length and drop tail segments immediately.
    /// Callers must keep the target at 1 or above; shrinking from
    /// length 1 is a full reset, not a shrink.
    pub fn shrink(&mut self, amount: usize) -> Vec<Cell> {
        debug_assert!(self.length > amount, "shrink below length 1 requires a reset");
        self.length -= amount;
        let mut vacated = Vec::new();
        while self.body.len() > self.length {
            vacated.push(self.body.pop_back().expect("Snake body should never be empty"));
        }
        vacated
    }

    /// Head overlaps a body segment beyond the grace window. The first
    /// `grace` segments are exempt so a short snake can turn without
    /// spuriously colliding with its own neck.
    pub fn self_collision(&self, grace: usize) -> bool {
        let head = self.head();
        self.body.iter().skip(grace).any(|cell| *cell == head)
    }

    /// Back to the single-cell initial state: body at the grid center,
    /// fresh random direction, target length 1, pending turn dropped.
    pub fn reset(&mut self, grid: &Grid, rng: &mut SessionRng) {
        self.body.clear();
        self.body.push_front(grid.center());
        self.length = 1;
        self.direction = *rng.pick(&Direction::ALL);
        self.pending_direction = None;
        self.just_reset = true;
    }

    /// Observes and clears the transient reset marker, so a reset is
    /// published exactly once.
    pub fn take_just_reset(&mut self) -> bool {
        std::mem::take(&mut self.just_reset)
    }

    #[cfg(test)]
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.pending_direction = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_snake(grid: &Grid) -> (Snake, SessionRng) {
        let mut rng = SessionRng::new(42);
        let mut snake = Snake::new(grid, &mut rng);
        snake.set_direction(Direction::Right);
        (snake, rng)
    }

    #[test]
    fn test_new_snake_starts_at_center() {
        let grid = Grid::new(32, 24);
        let (snake, _) = create_snake(&grid);
        assert_eq!(snake.head(), grid.center());
        assert_eq!(snake.body_len(), 1);
        assert_eq!(snake.target_length(), 1);
    }

    #[test]
    fn test_advance_moves_head_and_vacates_tail() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        let start = snake.head();
        let vacated = snake.advance(&grid);
        assert_eq!(snake.head(), Cell::new(start.x + 1, start.y));
        assert_eq!(vacated, Some(start));
        assert_eq!(snake.body_len(), 1);
    }

    #[test]
    fn test_advance_wraps_around_the_grid() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        for _ in 0..32 {
            snake.advance(&grid);
        }
        assert_eq!(snake.head(), grid.center());
    }

    #[test]
    fn test_reversal_is_ignored() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        let start = snake.head();
        snake.set_pending_direction(Direction::Left);
        snake.advance(&grid);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(start.x + 1, start.y));
    }

    #[test]
    fn test_pending_direction_is_consumed_once() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        snake.set_pending_direction(Direction::Down);
        snake.advance(&grid);
        assert_eq!(snake.direction(), Direction::Down);
        // no queued turn left; the snake keeps going down
        let head = snake.head();
        snake.advance(&grid);
        assert_eq!(snake.head(), Cell::new(head.x, head.y + 1));
    }

    #[test]
    fn test_last_pending_direction_wins() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.advance(&grid);
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn test_grow_converges_over_ticks() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        snake.grow(3);
        assert_eq!(snake.target_length(), 4);
        assert_eq!(snake.body_len(), 1);
        for _ in 0..3 {
            assert_eq!(snake.advance(&grid), None);
        }
        assert_eq!(snake.body_len(), 4);
        // converged: further advances vacate the tail again
        assert!(snake.advance(&grid).is_some());
        assert_eq!(snake.body_len(), 4);
    }

    #[test]
    fn test_shrink_drops_tail_immediately() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        snake.grow(4);
        for _ in 0..4 {
            snake.advance(&grid);
        }
        assert_eq!(snake.body_len(), 5);
        let vacated = snake.shrink(1);
        assert_eq!(vacated.len(), 1);
        assert_eq!(snake.target_length(), 4);
        assert_eq!(snake.body_len(), 4);
    }

    #[test]
    fn test_grace_window_allows_tight_turns() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        snake.grow(3);
        for _ in 0..3 {
            snake.advance(&grid);
        }
        // length 4 snake circles a 2x2 block for a while
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];
        for turn in turns.iter().cycle().take(8) {
            snake.set_pending_direction(*turn);
            snake.advance(&grid);
            assert!(!snake.self_collision(4));
        }
    }

    #[test]
    fn test_self_collision_beyond_grace() {
        let grid = Grid::new(32, 24);
        let (mut snake, _) = create_snake(&grid);
        snake.grow(5);
        for _ in 0..5 {
            snake.advance(&grid);
        }
        // u-turn back into the fourth segment
        for turn in [Direction::Down, Direction::Left, Direction::Up] {
            snake.set_pending_direction(turn);
            snake.advance(&grid);
        }
        assert!(snake.self_collision(4));
        // a larger grace window would have excused the same overlap
        assert!(!snake.self_collision(5));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let grid = Grid::new(32, 24);
        let (mut snake, mut rng) = create_snake(&grid);
        snake.grow(5);
        for _ in 0..5 {
            snake.advance(&grid);
        }
        snake.set_pending_direction(Direction::Down);
        snake.reset(&grid, &mut rng);
        assert_eq!(snake.head(), grid.center());
        assert_eq!(snake.body_len(), 1);
        assert_eq!(snake.target_length(), 1);
        assert!(snake.take_just_reset());
        assert!(!snake.take_just_reset());
        // pending turn cleared: the next advance follows the new direction
        let direction = snake.direction();
        snake.advance(&grid);
        assert_eq!(snake.head(), grid.wrap(grid.center(), direction));
    }
}
