use std::collections::HashSet;

use crate::error::ExhaustedSpaceError;
use crate::grid::Grid;
use crate::rng::SessionRng;
use crate::types::Cell;

/// Uniform draw from the cells not in `excluded`. Enumerate-and-filter
/// rather than retry-until-free, so the draw terminates unconditionally
/// and stays uniform on small grids.
pub fn place(
    grid: &Grid,
    excluded: &HashSet<Cell>,
    rng: &mut SessionRng,
) -> Result<Cell, ExhaustedSpaceError> {
    let free: Vec<Cell> = grid.cells().filter(|cell| !excluded.contains(cell)).collect();
    if free.is_empty() {
        return Err(ExhaustedSpaceError);
    }
    let index = rng.random_range(0..free.len());
    Ok(free[index])
}
