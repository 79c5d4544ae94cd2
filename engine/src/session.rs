use std::collections::HashSet;

use crate::error::ExhaustedSpaceError;
use crate::food::{Food, FoodKind};
use crate::grid::Grid;
use crate::log;
use crate::rng::SessionRng;
use crate::settings::SessionSettings;
use crate::snake::Snake;
use crate::spawner;
use crate::types::{Cell, Direction};

/// State published after each tick, sufficient for a renderer to draw
/// incrementally and for a caption collaborator to show speed/length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub head: Cell,
    pub body: Vec<Cell>,
    /// Cells the snake no longer occupies after this tick.
    pub vacated: Vec<Cell>,
    pub foods: Vec<FoodReport>,
    pub length: usize,
    pub speed: u32,
    pub ate: Option<FoodKind>,
    pub reset: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FoodReport {
    pub kind: FoodKind,
    pub position: Cell,
    /// Where the food sat before relocating this tick, if it did.
    pub previous_position: Option<Cell>,
}

/// The mutable root of one game: grid, snake, foods, speed, and the
/// relocation countdown. Collaborators drive it one tick at a time.
pub struct Session {
    grid: Grid,
    snake: Snake,
    // growth foods stay ordered before shrink foods; consumption is
    // first-match-wins, which makes growth the declared tie-break
    foods: Vec<Food>,
    speed: u32,
    speed_increment: u32,
    relocation_threshold: u32,
    relocation_timer: u32,
    grace: usize,
    rng: SessionRng,
}

impl Session {
    pub fn new(settings: &SessionSettings, seed: u64) -> Result<Self, ExhaustedSpaceError> {
        let grid = Grid::new(settings.grid_width, settings.grid_height);
        let mut rng = SessionRng::new(seed);
        let snake = Snake::new(&grid, &mut rng);

        let mut foods = Vec::with_capacity(settings.growth_food_count + settings.shrink_food_count);
        let mut excluded: HashSet<Cell> = snake.cells().collect();
        for _ in 0..settings.growth_food_count {
            let position = spawner::place(&grid, &excluded, &mut rng)?;
            excluded.insert(position);
            foods.push(Food::new(FoodKind::Growth, position));
        }
        for _ in 0..settings.shrink_food_count {
            let position = spawner::place(&grid, &excluded, &mut rng)?;
            excluded.insert(position);
            foods.push(Food::new(FoodKind::Shrink, position));
        }

        Ok(Self {
            grid,
            snake,
            foods,
            speed: settings.initial_speed,
            speed_increment: settings.speed_increment,
            relocation_threshold: settings.relocation_threshold,
            relocation_timer: 0,
            grace: settings.self_collision_grace,
            rng,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn length(&self) -> usize {
        self.snake.target_length()
    }

    pub fn relocation_timer(&self) -> u32 {
        self.relocation_timer
    }

    /// Forwarded to the snake; overwrites any turn queued earlier in
    /// the same tick window, and silently drops reversals.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.snake.set_pending_direction(direction);
    }

    /// One simulation step, in the canonical order: advance, food
    /// consumption, self-collision, periodic relocation, report.
    pub fn tick(&mut self) -> Result<TickReport, ExhaustedSpaceError> {
        for food in &mut self.foods {
            food.clear_previous();
        }

        let mut vacated = Vec::new();
        if let Some(tail) = self.snake.advance(&self.grid) {
            vacated.push(tail);
        }

        let head = self.snake.head();
        let mut ate = None;

        if let Some(index) = self.foods.iter().position(|food| food.consumed_by(head)) {
            ate = Some(self.foods[index].kind());
            match self.foods[index].kind() {
                FoodKind::Growth => {
                    self.snake.grow(1);
                    let length = self.snake.target_length();
                    if length % 3 == 0 {
                        self.speed += self.speed_increment;
                    }
                    log!("Growth food eaten at ({}, {}). Length: {}", head.x, head.y, length);
                }
                FoodKind::Shrink => {
                    let length = self.snake.target_length();
                    if length == 1 {
                        // shrinking from length 1 kills the snake
                        self.reset_snake();
                    } else {
                        // the crossing is tested on the pre-decrement
                        // value, mirroring the growth side
                        if length % 3 == 0 {
                            self.speed = self.speed.saturating_sub(self.speed_increment).max(1);
                        }
                        vacated.extend(self.snake.shrink(1));
                        log!(
                            "Shrink food eaten at ({}, {}). Length: {}",
                            head.x,
                            head.y,
                            self.snake.target_length()
                        );
                    }
                }
            }
            self.relocate_food(index)?;
        } else if self.snake.self_collision(self.grace) {
            self.reset_snake();
        }

        self.relocation_timer += 1;
        if self.relocation_timer >= self.relocation_threshold {
            self.relocation_timer = 0;
            for index in 0..self.foods.len() {
                self.relocate_food(index)?;
            }
        }

        let reset = self.snake.take_just_reset();
        Ok(TickReport {
            head: self.snake.head(),
            body: self.snake.cells().collect(),
            vacated,
            foods: self
                .foods
                .iter()
                .map(|food| FoodReport {
                    kind: food.kind(),
                    position: food.position(),
                    previous_position: food.previous_position(),
                })
                .collect(),
            length: self.snake.target_length(),
            speed: self.speed,
            ate,
            reset,
        })
    }

    fn reset_snake(&mut self) {
        self.snake.reset(&self.grid, &mut self.rng);
        let center = self.snake.head();
        log!("Snake reset to ({}, {})", center.x, center.y);
    }

    fn relocate_food(&mut self, index: usize) -> Result<(), ExhaustedSpaceError> {
        let mut excluded: HashSet<Cell> = self.snake.cells().collect();
        for (other, food) in self.foods.iter().enumerate() {
            if other != index {
                excluded.insert(food.position());
            }
        }
        self.foods[index].relocate(&self.grid, &excluded, &mut self.rng)
    }

    #[cfg(test)]
    pub(crate) fn set_food_position(&mut self, index: usize, position: Cell) {
        self.foods[index] = Food::new(self.foods[index].kind(), position);
    }

    #[cfg(test)]
    pub(crate) fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }
}
