//! Fixed frames for bringing up a panel without a scene.

use crate::foundation::core::{FRAME_BYTES, PANEL_HEIGHT, PANEL_WIDTH, ROW_BYTES};
use crate::render::raster::MonochromeBuffer;

/// Odd rows fully lit, even rows dark.
pub fn alternating_lines() -> MonochromeBuffer {
    let mut bytes = [0u8; FRAME_BYTES];
    for (y, row) in bytes.chunks_exact_mut(ROW_BYTES).enumerate() {
        if y % 2 == 1 {
            row.fill(0xFF);
        }
    }
    MonochromeBuffer::from_bytes(bytes)
}

/// Every pixel of panel row `index % PANEL_HEIGHT` lit: both faces of one slice of the stack.
pub fn slice_row(index: usize) -> MonochromeBuffer {
    let y = index % PANEL_HEIGHT;
    let mut buffer = MonochromeBuffer::new();
    for x in 0..PANEL_WIDTH {
        buffer.set(x, y);
    }
    buffer
}

#[cfg(test)]
#[path = "../../tests/unit/render/patterns.rs"]
mod tests;
