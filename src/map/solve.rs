//! Per-destination map solve: prime, flood fill, direction population.
//!
//! The solve runs in three passes over the grid:
//!
//! 1. **Prime** — every cell gets its nearest-wall distance from the wall
//!    model, a blocked flag when that distance is under the robot radius,
//!    an initial away-from-the-wall direction, and a distance-to-goal reset
//!    to the storable maximum.
//! 2. **Flood** — a FIFO relaxation fill from the goal cell over the 8
//!    neighbors, cardinal steps costing 2 and diagonal steps 3. A cell is
//!    re-enqueued only when its value strictly improves, so the fill
//!    reaches a fixed point and terminates.
//! 3. **Directions** — every unblocked cell points at the neighbor with the
//!    lowest total path cost, preferring routes through open space on ties.

use crate::core::{GridPoint, Position};
use crate::error::Result;
use crate::map::cell::{Direction, MAX_GOAL_DISTANCE};
use crate::map::grid::MazeGrid;
use crate::wall::{WallModel, Zone};
use log::debug;
use std::collections::VecDeque;

/// Counters from one solve, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Cells popped from the fill queue.
    pub pops: usize,
    /// Successful relaxations (value improvements).
    pub relaxations: usize,
}

/// Initial direction pointing away from a wall the cell is next to.
fn away_from(zone: Zone) -> Direction {
    match zone {
        Zone::Left => Direction::West,
        Zone::Right => Direction::East,
        Zone::Top => Direction::North,
        Zone::Bottom => Direction::South,
        Zone::TopLeft => Direction::NorthWest,
        Zone::TopRight => Direction::NorthEast,
        Zone::BottomLeft => Direction::SouthWest,
        Zone::BottomRight => Direction::SouthEast,
        // Inside a wall: the cell is blocked and its direction unused.
        Zone::Centre => Direction::East,
    }
}

impl MazeGrid {
    /// Prime the grid and flood-fill driving directions toward `goal`.
    ///
    /// Overwrites the blocked/direction/distance planning fields of every
    /// cell; the been/seen history layers are untouched. Errors only on an
    /// off-map goal or an internal accessor violation.
    pub fn solve(&mut self, goal: Position, walls: &WallModel) -> Result<SolveStats> {
        let goal_cell = goal.to_grid();
        self.index(goal_cell)?;

        debug!(
            "[Map] solving for goal ({:.0},{:.0}) with {} bricks",
            goal.x,
            goal.y,
            walls.len()
        );

        self.prime_from_walls(walls)?;
        let stats = self.flood_from(goal_cell)?;
        self.populate_directions(goal)?;
        self.set_goal(goal);

        debug!(
            "[Map] solved: {} pops, {} relaxations",
            stats.pops, stats.relaxations
        );
        Ok(stats)
    }

    /// Pass 1: per-cell wall distance, blocked flag, away direction, and
    /// distance-to-goal reset.
    fn prime_from_walls(&mut self, walls: &WallModel) -> Result<()> {
        let radius = self.robot_radius();
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let point = GridPoint::new(x, y);
                let nearest = match walls.nearest(point.to_position()) {
                    Some(nearest) => nearest,
                    None => continue,
                };
                let wall_cm = (nearest.distance / 10.0).clamp(0.0, 255.0) as u8;

                let cell = self.cell_mut(point)?;
                cell.set_blocked(nearest.distance < radius);
                cell.set_distance_to_wall(wall_cm);
                cell.set_direction(away_from(nearest.zone));
                cell.set_distance_to_goal(MAX_GOAL_DISTANCE);
            }
        }
        Ok(())
    }

    /// Pass 2: FIFO relaxation flood fill from the goal cell.
    ///
    /// Edge weights are small (2 and 3), so a plain queue with relaxation
    /// converges without a priority heap.
    fn flood_from(&mut self, goal_cell: GridPoint) -> Result<SolveStats> {
        let mut stats = SolveStats::default();
        let mut queue = VecDeque::new();

        self.cell_mut(goal_cell)?.set_distance_to_goal(0);
        queue.push_back(goal_cell);

        while let Some(point) = queue.pop_front() {
            stats.pops += 1;
            let base = self.cell_ref(point)?.distance_to_goal();

            for dir in Direction::ALL {
                let (dx, dy) = dir.step();
                let neighbor = point.offset(dx, dy);
                if !self.contains(neighbor) {
                    continue;
                }
                let tentative = base + dir.step_cost();
                if tentative >= MAX_GOAL_DISTANCE {
                    continue;
                }
                let cell = self.cell_mut(neighbor)?;
                if cell.blocked() {
                    continue;
                }
                if tentative < cell.distance_to_goal() {
                    cell.set_distance_to_goal(tentative);
                    queue.push_back(neighbor);
                    stats.relaxations += 1;
                }
            }
        }
        Ok(stats)
    }

    /// Pass 3: point every unblocked cell at its best neighbor.
    ///
    /// Best = lowest distance-to-goal plus step cost, tie-broken by greatest
    /// distance-to-wall. The final tie-break distance is measured from the
    /// scan cell to the goal point — constant across all candidates — so
    /// among fully tied neighbors the first in compass order wins.
    fn populate_directions(&mut self, goal: Position) -> Result<()> {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                let point = GridPoint::new(x, y);
                if self.cell_ref(point)?.blocked() {
                    continue;
                }
                let scan_pos = point.to_position();

                let mut best: Option<(Direction, u16, u8)> = None;
                let mut lowest_sq_to_goal = f32::MAX;

                for dir in Direction::ALL {
                    let (dx, dy) = dir.step();
                    let neighbor = point.offset(dx, dy);
                    if !self.contains(neighbor) {
                        continue;
                    }
                    let cell = self.cell_ref(neighbor)?;
                    let total = cell.distance_to_goal().saturating_add(dir.step_cost());
                    let wall = cell.distance_to_wall();
                    let sq_to_goal = scan_pos.squared_distance_to(goal);

                    let better = match best {
                        None => true,
                        Some((_, best_total, best_wall)) => {
                            total < best_total
                                || (total == best_total && wall > best_wall)
                                || (total == best_total
                                    && wall == best_wall
                                    && sq_to_goal < lowest_sq_to_goal)
                        }
                    };
                    if better {
                        best = Some((dir, total, wall));
                        lowest_sq_to_goal = sq_to_goal;
                    }
                }

                if let Some((dir, _, _)) = best {
                    self.cell_mut(point)?.set_direction(dir);
                }
            }
        }
        Ok(())
    }
}
