//! Grid storage for the maze map.
//!
//! A fixed-size flat array of packed cells, one per square centimeter of
//! maze. Public entry points validate bounds and absorb off-map queries;
//! the checked index accessor is the internal-invariant detector — an error
//! from it means a caller skipped validation, and the embedding control
//! loop must halt motion before reporting.

use crate::config::MazeConfig;
use crate::core::{Angle, GridPoint, Position, CELL_SIZE_MM};
use crate::error::{NavError, Result};
use crate::map::cell::MapCell;
use log::debug;

/// Offsets stamped around the robot by `mark_visited`, in cells (cm).
/// A sparse 9-point sample of a 100mm-radius disk, not a filled circle.
const VISIT_STAMP: [(i32, i32); 9] = [
    (0, 0),
    (10, 0),
    (-10, 0),
    (0, 10),
    (0, -10),
    (7, 7),
    (7, -7),
    (-7, 7),
    (-7, -7),
];

/// Safety of a candidate brick footprint on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrickSafety {
    /// Part of the rectangle falls outside the map.
    OutOfBounds,
    /// The robot has already driven through the rectangle, so a wall
    /// cannot be there.
    Visited,
    /// Nothing contradicts a wall in this rectangle.
    Safe,
}

/// The occupancy / flood-fill map.
///
/// `been` and `seen` layers track physical robot history and persist across
/// solves; `blocked`, `direction`, and the distance fields are planning
/// state overwritten by each solve.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    cells: Vec<MapCell>,
    width: usize,
    height: usize,
    goal: Option<Position>,
    robot_radius: f32,
}

impl MazeGrid {
    /// Create an empty grid sized for the configured maze, one cell per
    /// centimeter.
    pub fn new(config: &MazeConfig) -> Self {
        let width = (config.maze_width_mm / CELL_SIZE_MM) as usize;
        let height = (config.maze_length_mm / CELL_SIZE_MM) as usize;
        debug!("[Map] grid {}x{} cells", width, height);
        Self {
            cells: vec![MapCell::new(); width * height],
            width,
            height,
            goal: None,
            robot_radius: config.robot_radius_mm,
        }
    }

    /// Robot radius used to mark cells blocked (mm).
    #[inline]
    pub(crate) fn robot_radius(&self) -> f32 {
        self.robot_radius
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Goal position of the most recent solve.
    #[inline]
    pub fn goal(&self) -> Option<Position> {
        self.goal
    }

    pub(crate) fn set_goal(&mut self, goal: Position) {
        self.goal = Some(goal);
    }

    /// True when the cell index lies inside the grid.
    #[inline]
    pub fn contains(&self, point: GridPoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }

    /// True when a world position falls inside the grid.
    #[inline]
    pub fn contains_position(&self, position: Position) -> bool {
        self.contains(position.to_grid())
    }

    /// Flat index of a cell, or the fatal out-of-bounds error.
    #[inline]
    pub(crate) fn index(&self, point: GridPoint) -> Result<usize> {
        if self.contains(point) {
            Ok(point.y as usize * self.width + point.x as usize)
        } else {
            Err(NavError::CellOutOfBounds {
                x: point.x,
                y: point.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Copy of the cell at `point`, `None` off-map.
    #[inline]
    pub fn cell(&self, point: GridPoint) -> Option<MapCell> {
        self.index(point).ok().map(|i| self.cells[i])
    }

    pub(crate) fn cell_ref(&self, point: GridPoint) -> Result<&MapCell> {
        let i = self.index(point)?;
        Ok(&self.cells[i])
    }

    pub(crate) fn cell_mut(&mut self, point: GridPoint) -> Result<&mut MapCell> {
        let i = self.index(point)?;
        Ok(&mut self.cells[i])
    }

    /// Iterate cells in x-then-y order (the dump stream order).
    pub fn iter_xy(&self) -> impl Iterator<Item = (GridPoint, MapCell)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| {
                let point = GridPoint::new(x as i32, y as i32);
                (point, self.cells[y * self.width + x])
            })
        })
    }

    /// Driving direction at the cell containing `position`, as a heading.
    ///
    /// `None` when the position is off-map. The value is meaningful only
    /// for unblocked cells of a solved map.
    pub fn drive_direction(&self, position: Position) -> Option<Angle> {
        self.cell(position.to_grid())
            .map(|cell| cell.direction().to_angle())
    }

    /// Straight-line distance from `position` to the active goal.
    ///
    /// `None` before the first solve.
    pub fn crow_distance_to_goal(&self, position: Position) -> Option<f32> {
        self.goal.map(|goal| position.distance_to(goal))
    }

    /// Bump the seen counter at the cell containing `position`.
    ///
    /// Off-map positions are silently tolerated: implied obstacle points can
    /// land outside the maze when the pose estimate is off.
    pub fn increment_seen(&mut self, position: Position) {
        let point = position.to_grid();
        if let Ok(cell) = self.cell_mut(point) {
            cell.increment_seen();
        }
    }

    /// Stamp the robot's footprint into the `been` layer around `position`.
    ///
    /// Marks a sparse 9-point approximation of a 100mm-radius disk; offsets
    /// landing off-map are skipped.
    pub fn mark_visited(&mut self, position: Position) {
        let center = position.to_grid();
        for (dx, dy) in VISIT_STAMP {
            let point = center.offset(dx, dy);
            if let Ok(cell) = self.cell_mut(point) {
                cell.set_been(true);
            }
        }
    }

    /// Check the rectangle spanned by two world-frame corners against the
    /// visited layer.
    ///
    /// Out-of-bounds dominates: a rectangle that leaves the map is
    /// `OutOfBounds` regardless of its contents. Otherwise any visited cell
    /// inside makes it `Visited`, else `Safe`.
    pub fn check_brick_area(&self, corner_a: Position, corner_b: Position) -> BrickSafety {
        let a = corner_a.to_grid();
        let b = corner_b.to_grid();
        let min = GridPoint::new(a.x.min(b.x), a.y.min(b.y));
        let max = GridPoint::new(a.x.max(b.x), a.y.max(b.y));

        if !self.contains(min) || !self.contains(max) {
            return BrickSafety::OutOfBounds;
        }

        for x in min.x..=max.x {
            for y in min.y..=max.y {
                // Bounds proven by the corner check above.
                if let Ok(cell) = self.cell_ref(GridPoint::new(x, y)) {
                    if cell.been() {
                        return BrickSafety::Visited;
                    }
                }
            }
        }
        BrickSafety::Safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> MazeGrid {
        MazeGrid::new(&MazeConfig::default())
    }

    #[test]
    fn test_dimensions() {
        let map = grid();
        assert_eq!(map.width(), 150);
        assert_eq!(map.height(), 200);
    }

    #[test]
    fn test_contains() {
        let map = grid();
        assert!(map.contains(GridPoint::new(0, 0)));
        assert!(map.contains(GridPoint::new(149, 199)));
        assert!(!map.contains(GridPoint::new(150, 0)));
        assert!(!map.contains(GridPoint::new(0, 200)));
        assert!(!map.contains(GridPoint::new(-1, 5)));
    }

    #[test]
    fn test_index_out_of_bounds_is_error() {
        let map = grid();
        assert!(map.index(GridPoint::new(150, 0)).is_err());
        assert!(map.index(GridPoint::new(0, -1)).is_err());
    }

    #[test]
    fn test_increment_seen_off_map_is_noop() {
        let mut map = grid();
        map.increment_seen(Position::new(-50.0, 100.0));
        map.increment_seen(Position::new(100.0, 100.0));
        let cell = map.cell(GridPoint::new(10, 10)).unwrap();
        assert_eq!(cell.seen(), 1);
    }

    #[test]
    fn test_mark_visited_stamps_disk() {
        let mut map = grid();
        map.mark_visited(Position::new(750.0, 1000.0));
        let center = GridPoint::new(75, 100);
        assert!(map.cell(center).unwrap().been());
        assert!(map.cell(center.offset(10, 0)).unwrap().been());
        assert!(map.cell(center.offset(7, -7)).unwrap().been());
        // Between the stamp points nothing is marked.
        assert!(!map.cell(center.offset(5, 5)).unwrap().been());
    }

    #[test]
    fn test_mark_visited_near_edge_skips_off_map() {
        let mut map = grid();
        map.mark_visited(Position::new(0.0, 0.0));
        assert!(map.cell(GridPoint::new(0, 0)).unwrap().been());
        assert!(map.cell(GridPoint::new(10, 0)).unwrap().been());
    }

    #[test]
    fn test_check_brick_area() {
        let mut map = grid();
        assert_eq!(
            map.check_brick_area(Position::new(100.0, 100.0), Position::new(300.0, 180.0)),
            BrickSafety::Safe
        );

        map.mark_visited(Position::new(200.0, 150.0));
        assert_eq!(
            map.check_brick_area(Position::new(100.0, 100.0), Position::new(300.0, 180.0)),
            BrickSafety::Visited
        );

        // Rectangle poking past the map edge.
        assert_eq!(
            map.check_brick_area(Position::new(-40.0, 100.0), Position::new(100.0, 180.0)),
            BrickSafety::OutOfBounds
        );
    }

    #[test]
    fn test_out_of_bounds_dominates_visited() {
        let mut map = grid();
        map.mark_visited(Position::new(100.0, 100.0));
        assert_eq!(
            map.check_brick_area(Position::new(50.0, 50.0), Position::new(1600.0, 180.0)),
            BrickSafety::OutOfBounds
        );
    }

    #[test]
    fn test_drive_direction_off_map_is_none() {
        let map = grid();
        assert!(map.drive_direction(Position::new(-10.0, 0.0)).is_none());
        assert!(map.drive_direction(Position::new(100.0, 100.0)).is_some());
    }
}
