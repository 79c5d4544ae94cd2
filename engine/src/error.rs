use std::error::Error;
use std::fmt;

/// The spawner found no free cell: the snake and foods cover the whole
/// grid. Fatal to the session; callers must keep total occupancy below
/// grid capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExhaustedSpaceError;

impl fmt::Display for ExhaustedSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no free cell left on the grid")
    }
}

impl Error for ExhaustedSpaceError {}
