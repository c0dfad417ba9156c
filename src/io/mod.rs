//! Byte-stream output: map dumps and telemetry records.

pub mod dump;
pub mod wire;

pub use dump::{write_cells, CELL_RECORD_LEN};
pub use wire::{
    encode_brick, encode_pose, write_bricks, write_pose, BRICK_RECORD_LEN, POSE_RECORD_LEN,
};
