//! Robot pose: position plus heading.

use super::angle::Angle;
use super::point::Position;
use serde::{Deserialize, Serialize};

/// A position and heading pair.
///
/// Produced fresh from odometry each control-loop iteration and consumed by
/// the core as an input; never mutated in place.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Position in millimeters
    pub position: Position,
    /// Heading, 0° = +X, counter-clockwise positive
    pub heading: Angle,
}

impl Pose {
    /// Create a new pose
    #[inline]
    pub fn new(position: Position, heading: Angle) -> Self {
        Self { position, heading }
    }

    /// Transform a point from this pose's local frame into the world frame:
    /// rotate by the heading, then translate by the position.
    ///
    /// Used to lift sensor-local observations into robot-local coordinates
    /// and robot-local observations into the global maze frame.
    #[inline]
    pub fn transform(&self, local: Position) -> Position {
        let rotated = local.rotated(self.heading);
        rotated.translated(self.position.x, self.position.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_transform() {
        let pose = Pose::default();
        let world = pose.transform(Position::new(100.0, 50.0));
        assert_relative_eq!(world.x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(world.y, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_transform_rotates_then_translates() {
        // Robot at (500, 500) facing +Y; a point 100mm ahead in the robot
        // frame lands at (500, 600) in the world.
        let pose = Pose::new(Position::new(500.0, 500.0), Angle::new(90));
        let world = pose.transform(Position::new(100.0, 0.0));
        assert_relative_eq!(world.x, 500.0, epsilon = 1e-2);
        assert_relative_eq!(world.y, 600.0, epsilon = 1e-2);
    }

    #[test]
    fn test_transform_chains_sensor_frames() {
        // Sensor mounted 40mm left of the robot center, robot facing -X.
        let sensor_in_robot = Position::new(0.0, 40.0);
        let robot = Pose::new(Position::new(1000.0, 1000.0), Angle::new(180));
        let world = robot.transform(sensor_in_robot);
        assert_relative_eq!(world.x, 1000.0, epsilon = 1e-2);
        assert_relative_eq!(world.y, 960.0, epsilon = 1e-2);
    }
}
