//! Fixed-size RGB frame
//!
//! The frame is always `MATRIX_SIZE` x `MATRIX_SIZE`, row-major, fully
//! defined. Writes outside the grid are silently dropped: sprites and pipes
//! routinely hang over the matrix edges.

use crate::color::Pixel;
use crate::consts::MATRIX_SIZE;

/// One rendered 64x64 frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<Pixel>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const WIDTH: usize = MATRIX_SIZE;
    pub const HEIGHT: usize = MATRIX_SIZE;
    pub const LEN: usize = MATRIX_SIZE * MATRIX_SIZE;

    /// A black frame
    pub fn new() -> Self {
        Self {
            pixels: vec![Pixel::BLACK; Self::LEN],
        }
    }

    /// Fill every pixel with `colour`
    pub fn clear(&mut self, colour: Pixel) {
        self.pixels.fill(colour);
    }

    #[inline]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= Self::WIDTH as i32 || y >= Self::HEIGHT as i32 {
            return None;
        }
        Some(y as usize * Self::WIDTH + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Pixel> {
        Self::index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel; out-of-range coordinates are a no-op
    pub fn set(&mut self, x: i32, y: i32, colour: Pixel) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = colour;
        }
    }

    /// Source-over blend `colour` at `alpha` onto the existing pixel
    pub fn blend(&mut self, x: i32, y: i32, colour: Pixel, alpha: f32) {
        if let Some(i) = Self::index(x, y) {
            self.pixels[i] = colour.over(self.pixels[i], alpha);
        }
    }

    /// Row-major pixel slice
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        self.pixels.chunks_exact(Self::WIDTH)
    }

    /// Packed RGB888 bytes, row-major
    pub fn as_rgb_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
