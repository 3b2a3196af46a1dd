use crate::foundation::core::{FRAME_BYTES, PANEL_HEIGHT, PANEL_WIDTH, ROW_BYTES, Rgb8};

/// One pixel request in panel coordinates. Anything outside the panel is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelActivation {
    /// Panel column, `0` at the left edge.
    pub x: i32,
    /// Panel row.
    pub y: i32,
    /// Requested color; only lit or unlit matters.
    pub color: Rgb8,
}

/// Packed 64 x 32 monochrome bitmap, row-major, most significant bit first.
///
/// The byte layout is exactly the wire payload sent to the panel.
#[derive(Clone, PartialEq, Eq)]
pub struct MonochromeBuffer {
    bytes: [u8; FRAME_BYTES],
}

impl Default for MonochromeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MonochromeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonochromeBuffer")
            .field("lit", &self.count_lit())
            .finish()
    }
}

impl MonochromeBuffer {
    /// An all-dark buffer.
    pub fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
        }
    }

    /// Wrap a received or hand-built payload.
    pub fn from_bytes(bytes: [u8; FRAME_BYTES]) -> Self {
        Self { bytes }
    }

    /// The 256-byte wire payload.
    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.bytes
    }

    /// Set one pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize) {
        if x < PANEL_WIDTH && y < PANEL_HEIGHT {
            self.bytes[y * ROW_BYTES + x / 8] |= 0x80 >> (x % 8);
        }
    }

    /// Whether pixel `(x, y)` is lit. Out of range reads as dark.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < PANEL_WIDTH
            && y < PANEL_HEIGHT
            && self.bytes[y * ROW_BYTES + x / 8] & (0x80 >> (x % 8)) != 0
    }

    /// Number of lit pixels.
    pub fn count_lit(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Coordinates of every lit pixel, row by row.
    pub fn lit_pixels(&self) -> Vec<(usize, usize)> {
        (0..PANEL_HEIGHT)
            .flat_map(|y| (0..PANEL_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y))
            .collect()
    }

    /// Grayscale preview, each panel pixel drawn as a `scale x scale` block.
    pub fn to_luma_image(&self, scale: u32) -> image::GrayImage {
        let scale = scale.max(1);
        image::GrayImage::from_fn(
            PANEL_WIDTH as u32 * scale,
            PANEL_HEIGHT as u32 * scale,
            |px, py| {
                let lit = self.get((px / scale) as usize, (py / scale) as usize);
                image::Luma([if lit { 255 } else { 0 }])
            },
        )
    }
}

/// Pack one frame's activations into a panel buffer.
///
/// Unlit (black) colors and off-panel coordinates are skipped without error. With `mirror`
/// set, pixels in the left half are reflected onto the right half.
pub fn rasterize(activations: &[PanelActivation], mirror: bool) -> MonochromeBuffer {
    let mut buffer = MonochromeBuffer::new();
    for a in activations {
        if !a.color.is_lit() {
            continue;
        }
        let (Ok(x), Ok(y)) = (usize::try_from(a.x), usize::try_from(a.y)) else {
            continue;
        };
        if x >= PANEL_WIDTH || y >= PANEL_HEIGHT {
            continue;
        }
        let x = if mirror && x < PANEL_WIDTH / 2 {
            PANEL_WIDTH - 1 - x
        } else {
            x
        };
        buffer.set(x, y);
    }
    buffer
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
