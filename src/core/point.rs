//! Point and coordinate types for the maze map.
//!
//! `Position` is a world coordinate in millimeters (f32); `GridPoint` is an
//! integer cell index in centimeters. The two are related by a fixed ×10
//! scale, flooring on the way down to cells.

use super::angle::Angle;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Millimeters per grid cell.
pub const CELL_SIZE_MM: f32 = 10.0;

/// World coordinates (millimeters, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate in millimeters
    pub x: f32,
    /// Y coordinate in millimeters
    pub y: f32,
}

impl Position {
    /// Create a new position
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Origin
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    /// Translate by the given offsets
    #[inline]
    pub fn translated(&self, dx: f32, dy: f32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// Rotate around the origin by a heading
    #[inline]
    pub fn rotated(&self, angle: Angle) -> Position {
        let (sin, cos) = angle.to_radians().sin_cos();
        Position::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Euclidean distance to another position
    #[inline]
    pub fn distance_to(&self, other: Position) -> f32 {
        self.squared_distance_to(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn squared_distance_to(&self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// The grid cell containing this position.
    #[inline]
    pub fn to_grid(&self) -> GridPoint {
        GridPoint::new(
            (self.x / CELL_SIZE_MM).floor() as i32,
            (self.y / CELL_SIZE_MM).floor() as i32,
        )
    }
}

impl Add for Position {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Position {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// Grid coordinates (integer centimeter cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridPoint {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World position of this cell's low corner.
    #[inline]
    pub fn to_position(&self) -> Position {
        Position::new(self.x as f32 * CELL_SIZE_MM, self.y as f32 * CELL_SIZE_MM)
    }

    /// Offset by cell deltas
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> GridPoint {
        GridPoint::new(self.x + dx, self.y + dy)
    }
}
