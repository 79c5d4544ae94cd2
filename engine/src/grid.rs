use crate::types::{Cell, Direction};

/// Fixed-size toroidal coordinate space. Opposite edges are adjacent,
/// so movement never leaves the grid.
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be positive");
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn capacity(&self) -> usize {
        self.width * self.height
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// One step from `cell` in `direction`, wrapping around the edges.
    pub fn wrap(&self, cell: Cell, direction: Direction) -> Cell {
        match direction {
            Direction::Up => Cell::new(cell.x, Self::wrapping_dec(cell.y, self.height)),
            Direction::Down => Cell::new(cell.x, Self::wrapping_inc(cell.y, self.height)),
            Direction::Left => Cell::new(Self::wrapping_dec(cell.x, self.width), cell.y),
            Direction::Right => Cell::new(Self::wrapping_inc(cell.x, self.width), cell.y),
        }
    }

    /// Row-major enumeration of every cell, used by the spawner's
    /// filtered draw.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    fn wrapping_inc(value: usize, max: usize) -> usize {
        if value + 1 >= max { 0 } else { value + 1 }
    }

    fn wrapping_dec(value: usize, max: usize) -> usize {
        if value == 0 { max - 1 } else { value - 1 }
    }
}
