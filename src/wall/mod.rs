//! Wall inference: brick geometry and the bounded wall model.

pub mod brick;
pub mod model;

pub use brick::{Brick, BrickDistance, Zone, BRICK_LENGTH_MM, BRICK_WIDTH_MM};
pub use model::{NearestBrick, SensorVerdict, WallModel, MAX_BRICKS};
