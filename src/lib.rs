//! # Vyuha-Nav: Maze Navigation and Mapping Core
//!
//! The navigation core of an autonomous maze-exploring robot. It fuses
//! noisy, low-resolution range readings and wheel-odometry poses into a
//! geometric model of rectangular maze walls, maintains a probabilistic
//! occupancy / flood-fill map over that model, and reads local driving
//! directions back out of the solved map.
//!
//! Peripheral I/O (motor drivers, echo timing, transports) lives outside
//! this crate; the core consumes plain numeric readings and pose estimates
//! and produces steering headings and packed telemetry bytes.
//!
//! ## Coordinate Frame
//!
//! - World positions are f32 millimeters, origin at the maze's lower-left
//!   corner, X right, Y up.
//! - Headings are integer degrees, 0° = +X, counter-clockwise positive,
//!   wrapped to [-179, 180].
//! - Grid cells are 1 cm; the map covers the full maze bounding box.
//!
//! ## Data Flow
//!
//! ```text
//!  ┌──────────────┐   push()    ┌────────────────┐
//!  │ raw range    ├────────────►│ ReadingHistory │  denoise / gate
//!  │ readings     │             └───────┬────────┘
//!  └──────────────┘                     │ read_safe()
//!                                       ▼
//!  ┌──────────────┐   observe_* ┌────────────────┐
//!  │ odometry     ├────────────►│   WallModel    │  brick inference
//!  │ Pose         │             │  (≤50 bricks)  │  + pose-drift verdicts
//!  └──────────────┘             └───────┬────────┘
//!                                       │ solve(goal, walls)
//!                                       ▼
//!                               ┌────────────────┐
//!                               │    MazeGrid    │  prime + flood fill
//!                               │  (150x200)     │  + direction field
//!                               └───────┬────────┘
//!                                       │ drive_direction()
//!                                       ▼
//!                                steering Angle ──► motion control (external)
//! ```
//!
//! ## Modules
//!
//! - [`core`]: headings, positions, poses
//! - [`sensors`]: range-reading denoising history
//! - [`wall`]: brick geometry and the wall model with inference heuristics
//! - [`map`]: the occupancy / flood-fill grid and its solver
//! - [`io`]: packed map dumps and telemetry records
//! - [`config`]: maze geometry and tolerances
//!
//! ## Error Policy
//!
//! Sensor dropouts travel as the -1 sentinel and are absorbed locally.
//! Capacity exhaustion (full wall model) is a boolean rejection the caller
//! may ignore. Out-of-range indices reaching a checked accessor surface as
//! [`NavError`]; they indicate a logic bug, and the embedding control loop
//! must stop the motors before reporting.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod map;
pub mod sensors;
pub mod wall;

pub use config::MazeConfig;
pub use error::{NavError, Result};
pub use self::core::{Angle, GridPoint, Pose, Position};
pub use map::{BrickSafety, Direction, MapCell, MazeGrid, SolveStats, MAX_GOAL_DISTANCE};
pub use sensors::{ReadingHistory, INVALID_READING};
pub use wall::{Brick, NearestBrick, SensorVerdict, WallModel, Zone, MAX_BRICKS};
