//! Occupancy / flood-fill maze map.

pub mod cell;
pub mod grid;
pub mod solve;

pub use cell::{Direction, MapCell, MAX_GOAL_DISTANCE, MAX_WALL_DISTANCE};
pub use grid::{BrickSafety, MazeGrid};
pub use solve::SolveStats;
