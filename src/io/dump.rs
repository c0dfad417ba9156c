//! Map dump stream for the desktop visualization tool.
//!
//! # Record layout
//!
//! One fixed 6-byte record per cell, streamed for every cell in x-then-y
//! order (x outer, y inner):
//!
//! ```text
//! ┌───────┬───────┬──────────────────────────┐
//! │ x: u8 │ y: u8 │ packed cell bits: u32 LE │
//! └───────┴───────┴──────────────────────────┘
//! ```
//!
//! The stream is position-implicit (no header, no framing); the consumer
//! relies on the byte order and the absence of padding, so the layout must
//! not change.

use crate::error::Result;
use crate::map::MazeGrid;
use std::io::Write;

/// Bytes per cell record.
pub const CELL_RECORD_LEN: usize = 6;

/// Stream every cell of the map as packed records.
pub fn write_cells<W: Write>(grid: &MazeGrid, writer: &mut W) -> Result<()> {
    let mut record = [0u8; CELL_RECORD_LEN];
    for (point, cell) in grid.iter_xy() {
        record[0] = point.x as u8;
        record[1] = point.y as u8;
        record[2..6].copy_from_slice(&cell.bits().to_le_bytes());
        writer.write_all(&record)?;
    }
    Ok(())
}
