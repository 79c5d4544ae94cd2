//! Tick-based snake simulation on a toroidal grid. The engine owns
//! the rules only; rendering, input polling, and pacing live with the
//! caller, which drives [`Session::tick`] and reads the returned
//! [`TickReport`].

pub mod error;
pub mod food;
pub mod grid;
pub mod logger;
pub mod rng;
pub mod session;
pub mod settings;
pub mod snake;
pub mod spawner;
pub mod types;

pub use error::ExhaustedSpaceError;
pub use food::{Food, FoodKind};
pub use grid::Grid;
pub use rng::SessionRng;
pub use session::{FoodReport, Session, TickReport};
pub use settings::SessionSettings;
pub use snake::Snake;
pub use types::{Cell, Direction};
