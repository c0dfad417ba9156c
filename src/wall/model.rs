//! Wall model: the bounded collection of known bricks plus the inference
//! heuristics that grow it from sensor observations.
//!
//! All mutation goes through this type. The model is append-only: bricks are
//! never moved or removed, and the list is seeded with the four boundary
//! walls so nearest-brick queries always have a candidate.

use crate::config::MazeConfig;
use crate::core::{Angle, Position};
use crate::error::{NavError, Result};
use crate::map::{BrickSafety, MazeGrid};
use crate::wall::brick::{Brick, Zone};
use log::{debug, trace};

/// Maximum number of bricks the model will hold. Insertions past this are
/// rejected and the caller continues with the less complete model.
pub const MAX_BRICKS: usize = 50;

/// Inward offset margin between a boundary edge and an inferred flush brick
/// center, beyond the half brick width (mm).
const BOUNDARY_INSET_MARGIN_MM: f32 = 5.0;

/// Minimum long/short aspect ratio for an observed line to count as straight
/// (about 9 degrees of slack).
const LINE_ASPECT_MIN: f32 = 6.0;

/// Outcome of reconciling a range reading against the wall model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorVerdict {
    /// Reading agrees with the model (or was unusable); nothing to do.
    Consistent,
    /// Reading is longer than the model predicts: a wall should have been
    /// there. The pose estimate is suspect and the caller must trigger
    /// recalibration; the core never corrects the pose itself.
    Recalibrate,
    /// Reading was shorter than predicted and a new brick was appended.
    WallAdded,
}

/// Nearest brick to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestBrick {
    /// Index into the model's brick list.
    pub index: usize,
    /// Query point's zone relative to that brick.
    pub zone: Zone,
    /// Distance to the brick boundary (0 when inside).
    pub distance: f32,
}

/// The set of all known walls.
#[derive(Clone, Debug)]
pub struct WallModel {
    bricks: Vec<Brick>,
    maze_width: f32,
    maze_length: f32,
    brick_length: i32,
    brick_width: i32,
    boundary_tolerance: f32,
    line_length_tolerance: f32,
    range_limit: i16,
    range_agreement: f32,
}

impl WallModel {
    /// Create a model seeded with the four boundary walls.
    ///
    /// Each boundary wall is centered on its maze edge, spans the full edge,
    /// and has the standard brick width, so half of it protrudes inward.
    pub fn new(config: &MazeConfig) -> Self {
        let width = config.maze_width_mm;
        let length = config.maze_length_mm;
        let bricks = vec![
            // Left and right walls run the full maze length.
            Brick::with_size(
                Position::new(0.0, length / 2.0),
                true,
                length as i32,
                config.brick_width_mm,
            ),
            Brick::with_size(
                Position::new(width, length / 2.0),
                true,
                length as i32,
                config.brick_width_mm,
            ),
            // Bottom and top walls run the full maze width.
            Brick::with_size(
                Position::new(width / 2.0, 0.0),
                false,
                width as i32,
                config.brick_width_mm,
            ),
            Brick::with_size(
                Position::new(width / 2.0, length),
                false,
                width as i32,
                config.brick_width_mm,
            ),
        ];

        Self {
            bricks,
            maze_width: width,
            maze_length: length,
            brick_length: config.brick_length_mm,
            brick_width: config.brick_width_mm,
            boundary_tolerance: config.boundary_tolerance_mm,
            line_length_tolerance: config.line_length_tolerance_mm,
            range_limit: config.range_fusion_limit_mm,
            range_agreement: config.range_agreement_mm,
        }
    }

    /// Number of bricks in the model.
    #[inline]
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    /// True when the model holds no bricks (never the case after `new`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// All bricks, boundary walls first, in insertion order.
    #[inline]
    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    /// Brick at `index`.
    ///
    /// An out-of-range index is an internal invariant violation; the caller
    /// must treat the error as fatal.
    pub fn get(&self, index: usize) -> Result<&Brick> {
        self.bricks.get(index).ok_or(NavError::BrickIndexOutOfRange {
            index,
            len: self.bricks.len(),
        })
    }

    /// The brick nearest to `target`, by boundary distance.
    ///
    /// Linear scan over the whole list; the model is small by construction.
    /// Returns `None` only for a logically empty model, which the boundary
    /// seeding rules out in practice.
    pub fn nearest(&self, target: Position) -> Option<NearestBrick> {
        let mut best: Option<(usize, f32, f32, f32, Zone)> = None;
        for (index, brick) in self.bricks.iter().enumerate() {
            let d = brick.squared_distance_to(target);
            if best.map_or(true, |(_, squared, _, _, _)| d.squared < squared) {
                best = Some((index, d.squared, d.dx, d.dy, d.zone));
            }
        }
        best.map(|(index, squared, dx, dy, zone)| NearestBrick {
            index,
            zone,
            // Same axis-aligned shortcut as Brick::distance_to.
            distance: if dx == 0.0 {
                dy.abs()
            } else if dy == 0.0 {
                dx.abs()
            } else {
                squared.sqrt()
            },
        })
    }

    /// Append a brick unless it collides with the model or the model is full.
    ///
    /// The collision test only checks whether the candidate's center lies at
    /// zero distance from an existing brick (inside its rectangle). It is not
    /// a full rectangle-overlap test: offset-center overlapping bricks pass.
    pub fn try_append(&mut self, brick: Brick) -> bool {
        if self.bricks.len() >= MAX_BRICKS {
            debug!(
                "[Walls] rejecting brick at ({:.0},{:.0}): model full ({})",
                brick.position.x, brick.position.y, MAX_BRICKS
            );
            return false;
        }
        if let Some(nearest) = self.nearest(brick.position) {
            if nearest.distance <= 0.0 {
                trace!(
                    "[Walls] rejecting brick at ({:.0},{:.0}): center inside brick {}",
                    brick.position.x, brick.position.y, nearest.index
                );
                return false;
            }
        }
        debug!(
            "[Walls] brick {} at ({:.0},{:.0}) {}",
            self.bricks.len(),
            brick.position.x,
            brick.position.y,
            if brick.vertical { "vertical" } else { "horizontal" }
        );
        self.bricks.push(brick);
        true
    }

    /// Infer a brick from a corner seen near a maze boundary.
    ///
    /// If the corner lies within the boundary tolerance of one of the four
    /// maze edges, a standard brick is placed flush against that edge
    /// (inset by half a brick width plus a small margin) and oriented
    /// parallel to it. Returns false when no edge matches or the append was
    /// rejected.
    pub fn observe_boundary_corner(&mut self, corner: Position) -> bool {
        let tol = self.boundary_tolerance;
        let inset = self.brick_width as f32 / 2.0 + BOUNDARY_INSET_MARGIN_MM;

        let brick = if corner.x.abs() <= tol {
            Brick::new(Position::new(inset, corner.y), true)
        } else if (corner.x - self.maze_width).abs() <= tol {
            Brick::new(Position::new(self.maze_width - inset, corner.y), true)
        } else if corner.y.abs() <= tol {
            Brick::new(Position::new(corner.x, inset), false)
        } else if (corner.y - self.maze_length).abs() <= tol {
            Brick::new(Position::new(corner.x, self.maze_length - inset), false)
        } else {
            trace!(
                "[Walls] corner ({:.0},{:.0}) not near any boundary",
                corner.x, corner.y
            );
            return false;
        };

        self.try_append(brick)
    }

    /// Infer a brick from a line defined by two observed corners.
    ///
    /// The line must be near-straight (long axis at least 6x the short) and
    /// its length must match one brick side within tolerance. The brick is
    /// placed behind the line as seen from the robot, so the observed face
    /// becomes the brick's near edge.
    pub fn observe_line(&mut self, robot: Position, a: Position, b: Position) -> bool {
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        let line_vertical = dy > dx;
        let (long, short) = if line_vertical { (dy, dx) } else { (dx, dy) };

        if long < LINE_ASPECT_MIN * short {
            trace!("[Walls] line too oblique: {:.0}x{:.0}", long, short);
            return false;
        }

        let seen_short_side = if (long - self.brick_width as f32).abs() <= self.line_length_tolerance
        {
            true
        } else if (long - self.brick_length as f32).abs() <= self.line_length_tolerance {
            false
        } else {
            trace!("[Walls] line length {:.0} matches no brick side", long);
            return false;
        };

        let vertical = line_vertical != seen_short_side;
        let mid = Position::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        // Center offset: half of the brick extent perpendicular to the line.
        let offset = if seen_short_side {
            self.brick_length as f32 / 2.0
        } else {
            self.brick_width as f32 / 2.0
        };
        let center = if line_vertical {
            if robot.x <= mid.x {
                Position::new(mid.x + offset, mid.y)
            } else {
                Position::new(mid.x - offset, mid.y)
            }
        } else if robot.y <= mid.y {
            Position::new(mid.x, mid.y + offset)
        } else {
            Position::new(mid.x, mid.y - offset)
        };

        self.try_append(Brick::new(center, vertical))
    }

    /// Reconcile one orthogonal range reading against the model and map.
    ///
    /// Unusable readings (negative, beyond the fusion range limit, or from a
    /// sensor not pointing within `tolerance` of a cardinal direction) are
    /// ignored. Otherwise the seen counter is bumped at the implied obstacle
    /// point, and the reading is compared with the distance the model
    /// predicts in that direction:
    ///
    /// - within the agreement tolerance: [`SensorVerdict::Consistent`];
    /// - longer than predicted: [`SensorVerdict::Recalibrate`] — the robot
    ///   saw past a modeled wall, so the pose estimate has drifted;
    /// - shorter than predicted: an unknown brick occludes the modeled wall;
    ///   a placement is attempted at the implied point.
    ///
    /// Placement is asymmetric: the horizontal candidate footprint must be
    /// clear while the vertical one overlaps already-visited floor. That
    /// shape is the only one not contradicted by where the robot has driven.
    pub fn observe_range(
        &mut self,
        robot: Position,
        sensor_angle: Angle,
        measured: i16,
        tolerance: i16,
        map: &mut MazeGrid,
    ) -> SensorVerdict {
        if measured < 0 || measured > self.range_limit || !sensor_angle.is_orthogonal(tolerance) {
            return SensorVerdict::Consistent;
        }

        let snapped = sensor_angle.closest_right_angle();
        let d = measured as f32;
        let implied = match snapped.degrees() {
            0 => robot.translated(d, 0.0),
            90 => robot.translated(0.0, d),
            180 => robot.translated(-d, 0.0),
            _ => robot.translated(0.0, -d),
        };

        map.increment_seen(implied);

        if let Some(expected) = self.predicted_distance(robot, snapped) {
            let diff = d - expected;
            if diff.abs() <= self.range_agreement {
                return SensorVerdict::Consistent;
            }
            if diff > 0.0 {
                debug!(
                    "[Walls] measured {:.0} past predicted {:.0} at {}deg: pose drift",
                    d,
                    expected,
                    snapped.degrees()
                );
                return SensorVerdict::Recalibrate;
            }
        }

        let half_l = self.brick_length as f32 / 2.0;
        let half_w = self.brick_width as f32 / 2.0;
        let vertical_safety = map.check_brick_area(
            implied.translated(-half_w, -half_l),
            implied.translated(half_w, half_l),
        );
        let horizontal_safety = map.check_brick_area(
            implied.translated(-half_l, -half_w),
            implied.translated(half_l, half_w),
        );
        trace!(
            "[Walls] candidate at ({:.0},{:.0}): vertical {:?}, horizontal {:?}",
            implied.x, implied.y, vertical_safety, horizontal_safety
        );

        if horizontal_safety == BrickSafety::Safe
            && vertical_safety == BrickSafety::Visited
            && self.try_append(Brick::new(implied, false))
        {
            return SensorVerdict::WallAdded;
        }

        SensorVerdict::Consistent
    }

    /// Distance the model predicts a range sensor at `origin` pointing in the
    /// cardinal direction `toward` would measure, or `None` when no brick
    /// lies ahead in that direction.
    pub fn predicted_distance(&self, origin: Position, toward: Angle) -> Option<f32> {
        let mut best: Option<f32> = None;
        for brick in &self.bricks {
            let bl = brick.bottom_left();
            let tr = brick.top_right();
            let hit = match toward.degrees() {
                0 if origin.y >= bl.y && origin.y <= tr.y && bl.x > origin.x => {
                    Some(bl.x - origin.x)
                }
                180 if origin.y >= bl.y && origin.y <= tr.y && tr.x < origin.x => {
                    Some(origin.x - tr.x)
                }
                90 if origin.x >= bl.x && origin.x <= tr.x && bl.y > origin.y => {
                    Some(bl.y - origin.y)
                }
                -90 if origin.x >= bl.x && origin.x <= tr.x && tr.y < origin.y => {
                    Some(origin.y - tr.y)
                }
                _ => None,
            };
            if let Some(dist) = hit {
                if best.map_or(true, |b| dist < b) {
                    best = Some(dist);
                }
            }
        }
        best
    }
}
