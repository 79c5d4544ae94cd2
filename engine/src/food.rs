use std::collections::HashSet;

use crate::error::ExhaustedSpaceError;
use crate::grid::Grid;
use crate::rng::SessionRng;
use crate::spawner;
use crate::types::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodKind {
    /// Eating it raises the target length by one.
    Growth,
    /// Eating it lowers the target length by one.
    Shrink,
}

/// One apple on the grid. Foods are never destroyed, only repositioned;
/// `previous_position` records where it sat before a relocation so a
/// renderer can erase the stale cell.
#[derive(Clone, Debug)]
pub struct Food {
    kind: FoodKind,
    position: Cell,
    previous_position: Option<Cell>,
}

impl Food {
    pub fn new(kind: FoodKind, position: Cell) -> Self {
        Self {
            kind,
            position,
            previous_position: None,
        }
    }

    pub fn kind(&self) -> FoodKind {
        self.kind
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn previous_position(&self) -> Option<Cell> {
        self.previous_position
    }

    pub fn consumed_by(&self, head: Cell) -> bool {
        self.position == head
    }

    /// Move to a fresh cell outside `excluded` (the snake body plus
    /// every other food's position, per the placement invariant).
    pub fn relocate(
        &mut self,
        grid: &Grid,
        excluded: &HashSet<Cell>,
        rng: &mut SessionRng,
    ) -> Result<(), ExhaustedSpaceError> {
        let position = spawner::place(grid, excluded, rng)?;
        self.previous_position = Some(self.position);
        self.position = position;
        Ok(())
    }

    pub fn clear_previous(&mut self) {
        self.previous_position = None;
    }
}
