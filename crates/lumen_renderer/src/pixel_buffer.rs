//! 8-bit RGB pixel buffer.

use rayon::prelude::*;

use crate::illumination::Color;

/// Convert a color channel in [0, 1] to a byte, clamping and rounding down.
#[inline]
fn channel_to_byte(c: f64) -> u8 {
    // NaN casts to 0
    (c.clamp(0.0, 1.0) * 255.0).floor() as u8
}

/// Convert a color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        channel_to_byte(color.x),
        channel_to_byte(color.y),
        channel_to_byte(color.z),
    ]
}

/// Rendered image, stored top row first.
///
/// Callers address rows from the bottom (row 0 is the bottom of the image,
/// matching the view-plane projection); the flip happens on write.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl PixelBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Storage index of (row, col), with row counted from the bottom.
    fn index(&self, row: u32, col: u32) -> usize {
        assert!(
            row < self.height && col < self.width,
            "Illegal pixel coordinates: row {} col {} (max row {}, max col {})",
            row,
            col,
            self.height,
            self.width
        );
        (self.height - 1 - row) as usize * self.width as usize + col as usize
    }

    /// Write a color to (row, col).
    pub fn set(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color_to_rgb(color);
    }

    /// Get the bytes of (row, col).
    pub fn get(&self, row: u32, col: u32) -> [u8; 3] {
        self.pixels[self.index(row, col)]
    }

    /// Parallel iterator over rows as `(row, pixels)`, row counted from the
    /// bottom. Rows are disjoint, so each can be filled independently.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (u32, &mut [[u8; 3]])> {
        let height = self.height;
        self.pixels
            .par_chunks_mut(self.width.max(1) as usize)
            .enumerate()
            .map(move |(stored, pixels)| (height - 1 - stored as u32, pixels))
    }

    /// Flat RGB bytes, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
