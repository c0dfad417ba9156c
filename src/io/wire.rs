//! Telemetry records for the wireless monitoring link.
//!
//! Fixed little-endian packed layouts shared with the external monitoring
//! application; field order and widths are a compatibility contract.
//!
//! ```text
//! Pose record (6 bytes):
//! ┌───────────┬───────────┬─────────────────┐
//! │ x: i16 LE │ y: i16 LE │ heading: i16 LE │
//! └───────────┴───────────┴─────────────────┘
//!
//! Brick record (9 bytes):
//! ┌────────────┬────────────┬────────────┬────────────┬───────────┐
//! │ bl.x: i16  │ bl.y: i16  │ tr.x: i16  │ tr.y: i16  │ index: u8 │
//! └────────────┴────────────┴────────────┴────────────┴───────────┘
//! ```
//!
//! Positions are rounded to whole millimeters; maze coordinates fit i16
//! comfortably.

use crate::core::Pose;
use crate::error::Result;
use crate::wall::{Brick, WallModel};
use std::io::Write;

/// Bytes per pose record.
pub const POSE_RECORD_LEN: usize = 6;

/// Bytes per brick record.
pub const BRICK_RECORD_LEN: usize = 9;

/// Encode a pose as a packed record.
pub fn encode_pose(pose: &Pose) -> [u8; POSE_RECORD_LEN] {
    let mut record = [0u8; POSE_RECORD_LEN];
    record[0..2].copy_from_slice(&(pose.position.x.round() as i16).to_le_bytes());
    record[2..4].copy_from_slice(&(pose.position.y.round() as i16).to_le_bytes());
    record[4..6].copy_from_slice(&pose.heading.degrees().to_le_bytes());
    record
}

/// Encode a brick's corners and list index as a packed record.
pub fn encode_brick(brick: &Brick, index: u8) -> [u8; BRICK_RECORD_LEN] {
    let bl = brick.bottom_left();
    let tr = brick.top_right();
    let mut record = [0u8; BRICK_RECORD_LEN];
    record[0..2].copy_from_slice(&(bl.x.round() as i16).to_le_bytes());
    record[2..4].copy_from_slice(&(bl.y.round() as i16).to_le_bytes());
    record[4..6].copy_from_slice(&(tr.x.round() as i16).to_le_bytes());
    record[6..8].copy_from_slice(&(tr.y.round() as i16).to_le_bytes());
    record[8] = index;
    record
}

/// Write one pose record.
pub fn write_pose<W: Write>(pose: &Pose, writer: &mut W) -> Result<()> {
    writer.write_all(&encode_pose(pose))?;
    Ok(())
}

/// Write one record per brick in the model, in insertion order.
pub fn write_bricks<W: Write>(walls: &WallModel, writer: &mut W) -> Result<()> {
    for (index, brick) in walls.bricks().iter().enumerate() {
        writer.write_all(&encode_brick(brick, index as u8))?;
    }
    Ok(())
}
