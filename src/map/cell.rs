//! Per-cell map record and the 8-way compass direction.
//!
//! Each grid cell packs its whole state into one u32 so the serial dump can
//! stream cells as fixed 6-byte records. Layout, low bit first:
//!
//! ```text
//! bit  0      been            robot has physically visited this cell
//! bit  1      blocked         too close to a wall for the robot radius
//! bits 2-4    direction       compass index, 45 degree steps
//! bits 5-15   distance_to_goal flood-fill path cost, max 2047
//! bits 16-23  distance_to_wall clamped 0-255 (cm)
//! bits 24-31  seen            saturating sensor-observation counter
//! ```

use crate::core::Angle;
use serde::{Deserialize, Serialize};

/// Largest storable flood-fill cost (11 bits).
pub const MAX_GOAL_DISTANCE: u16 = 0x7FF;

/// Largest storable wall distance (8 bits, cm).
pub const MAX_WALL_DISTANCE: u8 = u8::MAX;

/// One of the eight compass directions, 45 degrees apart.
///
/// Index 0 is east (+X) and indices increase counter-clockwise, matching
/// the heading convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    #[default]
    East = 0,
    NorthEast = 1,
    North = 2,
    NorthWest = 3,
    West = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
}

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Compass index, 0-7.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Direction for a compass index (wraps modulo 8).
    #[inline]
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 7) as usize]
    }

    /// Cell offset one step in this direction.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::North => (0, 1),
            Direction::NorthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::South => (0, -1),
            Direction::SouthEast => (1, -1),
        }
    }

    /// Flood-fill edge weight for one step: 2 for cardinal moves, 3 for
    /// diagonal (approximating 1 : sqrt(2) in integers).
    #[inline]
    pub fn step_cost(self) -> u16 {
        if self.index() % 2 == 0 { 2 } else { 3 }
    }

    /// True for the four diagonal directions.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    /// Heading for this direction.
    #[inline]
    pub fn to_angle(self) -> Angle {
        Angle::new(self.index() as i16 * 45)
    }
}

/// Packed per-cell record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapCell(u32);

const BEEN_BIT: u32 = 1;
const BLOCKED_BIT: u32 = 1 << 1;
const DIRECTION_SHIFT: u32 = 2;
const DIRECTION_MASK: u32 = 0x7 << DIRECTION_SHIFT;
const GOAL_SHIFT: u32 = 5;
const GOAL_MASK: u32 = 0x7FF << GOAL_SHIFT;
const WALL_SHIFT: u32 = 16;
const WALL_MASK: u32 = 0xFF << WALL_SHIFT;
const SEEN_SHIFT: u32 = 24;
const SEEN_MASK: u32 = 0xFF << SEEN_SHIFT;

impl MapCell {
    /// A fresh, unvisited, unsolved cell.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct a cell from its packed bits.
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The packed representation, as streamed in map dumps.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Robot has physically driven over this cell.
    #[inline]
    pub fn been(self) -> bool {
        self.0 & BEEN_BIT != 0
    }

    #[inline]
    pub fn set_been(&mut self, been: bool) {
        if been {
            self.0 |= BEEN_BIT;
        } else {
            self.0 &= !BEEN_BIT;
        }
    }

    /// Too close to a wall for the robot to occupy.
    #[inline]
    pub fn blocked(self) -> bool {
        self.0 & BLOCKED_BIT != 0
    }

    #[inline]
    pub fn set_blocked(&mut self, blocked: bool) {
        if blocked {
            self.0 |= BLOCKED_BIT;
        } else {
            self.0 &= !BLOCKED_BIT;
        }
    }

    /// Driving direction out of this cell. Meaningful only for unblocked
    /// cells after a solve.
    #[inline]
    pub fn direction(self) -> Direction {
        Direction::from_index(((self.0 & DIRECTION_MASK) >> DIRECTION_SHIFT) as u8)
    }

    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.0 = (self.0 & !DIRECTION_MASK) | ((direction.index() as u32) << DIRECTION_SHIFT);
    }

    /// Flood-fill path cost to the goal.
    #[inline]
    pub fn distance_to_goal(self) -> u16 {
        ((self.0 & GOAL_MASK) >> GOAL_SHIFT) as u16
    }

    /// Store a path cost, clamped to the 11-bit ceiling.
    #[inline]
    pub fn set_distance_to_goal(&mut self, distance: u16) {
        let clamped = distance.min(MAX_GOAL_DISTANCE) as u32;
        self.0 = (self.0 & !GOAL_MASK) | (clamped << GOAL_SHIFT);
    }

    /// Distance to the nearest wall (cm, clamped to 255).
    #[inline]
    pub fn distance_to_wall(self) -> u8 {
        ((self.0 & WALL_MASK) >> WALL_SHIFT) as u8
    }

    #[inline]
    pub fn set_distance_to_wall(&mut self, distance: u8) {
        self.0 = (self.0 & !WALL_MASK) | ((distance as u32) << WALL_SHIFT);
    }

    /// Saturating count of sensor observations at this cell.
    #[inline]
    pub fn seen(self) -> u8 {
        ((self.0 & SEEN_MASK) >> SEEN_SHIFT) as u8
    }

    /// Bump the seen counter; sticks at 255.
    #[inline]
    pub fn increment_seen(&mut self) {
        let seen = self.seen().saturating_add(1);
        self.0 = (self.0 & !SEEN_MASK) | ((seen as u32) << SEEN_SHIFT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_index(d.index()), d);
        }
    }

    #[test]
    fn test_direction_angles() {
        assert_eq!(Direction::East.to_angle().degrees(), 0);
        assert_eq!(Direction::North.to_angle().degrees(), 90);
        assert_eq!(Direction::West.to_angle().degrees(), 180);
        assert_eq!(Direction::South.to_angle().degrees(), -90);
        assert_eq!(Direction::SouthEast.to_angle().degrees(), -45);
    }

    #[test]
    fn test_step_costs() {
        assert_eq!(Direction::East.step_cost(), 2);
        assert_eq!(Direction::North.step_cost(), 2);
        assert_eq!(Direction::NorthEast.step_cost(), 3);
        assert_eq!(Direction::SouthWest.step_cost(), 3);
    }

    #[test]
    fn test_fields_are_independent() {
        let mut cell = MapCell::new();
        cell.set_been(true);
        cell.set_blocked(true);
        cell.set_direction(Direction::SouthEast);
        cell.set_distance_to_goal(1234);
        cell.set_distance_to_wall(200);
        cell.increment_seen();

        assert!(cell.been());
        assert!(cell.blocked());
        assert_eq!(cell.direction(), Direction::SouthEast);
        assert_eq!(cell.distance_to_goal(), 1234);
        assert_eq!(cell.distance_to_wall(), 200);
        assert_eq!(cell.seen(), 1);

        cell.set_blocked(false);
        assert!(!cell.blocked());
        assert!(cell.been());
        assert_eq!(cell.distance_to_goal(), 1234);
    }

    #[test]
    fn test_goal_distance_clamps() {
        let mut cell = MapCell::new();
        cell.set_distance_to_goal(5000);
        assert_eq!(cell.distance_to_goal(), MAX_GOAL_DISTANCE);
    }

    #[test]
    fn test_seen_saturates() {
        let mut cell = MapCell::new();
        for _ in 0..300 {
            cell.increment_seen();
        }
        assert_eq!(cell.seen(), 255);
    }

    #[test]
    fn test_packed_layout() {
        // The dump format depends on this exact layout.
        let mut cell = MapCell::new();
        cell.set_been(true);
        assert_eq!(cell.bits(), 0x0000_0001);

        let mut cell = MapCell::new();
        cell.set_blocked(true);
        assert_eq!(cell.bits(), 0x0000_0002);

        let mut cell = MapCell::new();
        cell.set_direction(Direction::SouthEast);
        assert_eq!(cell.bits(), 7 << 2);

        let mut cell = MapCell::new();
        cell.set_distance_to_goal(MAX_GOAL_DISTANCE);
        assert_eq!(cell.bits(), 0x7FF << 5);

        let mut cell = MapCell::new();
        cell.set_distance_to_wall(0xAB);
        assert_eq!(cell.bits(), 0xAB << 16);

        let mut cell = MapCell::new();
        cell.increment_seen();
        assert_eq!(cell.bits(), 1 << 24);
    }
}
