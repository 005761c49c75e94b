//! Frame wire formats
//!
//! A frame goes over the wire as exactly `MATRIX_SIZE * MATRIX_SIZE` bytes,
//! one per pixel, row-major, no header. Two formats have shipped to the
//! hardware and both stay supported:
//!
//! - `Rgb332`: `RRRGGGBB`, the top bits of each channel
//! - `Luma`: `round((r + g + b) * 100 / 765)`, a 0-100 intensity

use serde::{Deserialize, Serialize};

use crate::color::Pixel;
use crate::consts::FRAME_BYTES;
use crate::error::MatrixError;
use crate::framebuffer::FrameBuffer;

/// Highest value produced by the luma codec
pub const LUMA_MAX: u8 = 100;

/// Named wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameCodec {
    #[default]
    Rgb332,
    Luma,
}

impl FrameCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameCodec::Rgb332 => "rgb332",
            FrameCodec::Luma => "luma",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "rgb332" => Some(FrameCodec::Rgb332),
            "luma" | "grayscale" => Some(FrameCodec::Luma),
            _ => None,
        }
    }

    /// Encode a single pixel
    #[inline]
    pub fn encode_pixel(&self, p: Pixel) -> u8 {
        match self {
            FrameCodec::Rgb332 => encode_rgb332(p),
            FrameCodec::Luma => encode_luma(p),
        }
    }

    /// Approximate the source pixel from a wire byte
    #[inline]
    pub fn decode_pixel(&self, byte: u8) -> Pixel {
        match self {
            FrameCodec::Rgb332 => decode_rgb332(byte),
            FrameCodec::Luma => decode_luma(byte),
        }
    }

    /// Encode a whole frame
    pub fn encode(&self, frame: &FrameBuffer) -> Vec<u8> {
        frame.pixels().iter().map(|p| self.encode_pixel(*p)).collect()
    }

    /// Encode a raw row-major pixel slice covering the full matrix
    pub fn encode_pixels(&self, pixels: &[Pixel]) -> Result<Vec<u8>, MatrixError> {
        if pixels.len() != FRAME_BYTES {
            return Err(MatrixError::InvalidBufferSize {
                expected: FRAME_BYTES,
                actual: pixels.len(),
            });
        }
        Ok(pixels.iter().map(|p| self.encode_pixel(*p)).collect())
    }

    /// Encode canvas RGBA8888 data, premultiplying each colour by its alpha
    pub fn encode_rgba(&self, rgba: &[u8]) -> Result<Vec<u8>, MatrixError> {
        if rgba.len() != FRAME_BYTES * 4 {
            return Err(MatrixError::InvalidBufferSize {
                expected: FRAME_BYTES,
                actual: rgba.len() / 4,
            });
        }
        let premultiply = |c: u8, a: u8| ((c as u16 * a as u16) / 255) as u8;
        Ok(rgba
            .chunks_exact(4)
            .map(|px| {
                let a = px[3];
                let p = Pixel::new(
                    premultiply(px[0], a),
                    premultiply(px[1], a),
                    premultiply(px[2], a),
                );
                self.encode_pixel(p)
            })
            .collect())
    }

    /// Decode a wire frame back into approximate pixels
    pub fn decode(&self, bytes: &[u8]) -> Result<FrameBuffer, MatrixError> {
        if bytes.len() != FRAME_BYTES {
            return Err(MatrixError::InvalidBufferSize {
                expected: FRAME_BYTES,
                actual: bytes.len(),
            });
        }
        let mut frame = FrameBuffer::new();
        for (i, byte) in bytes.iter().enumerate() {
            let x = (i % FrameBuffer::WIDTH) as i32;
            let y = (i / FrameBuffer::WIDTH) as i32;
            frame.set(x, y, self.decode_pixel(*byte));
        }
        Ok(frame)
    }
}

/// Pack the top 3/3/2 bits of r/g/b into `RRRGGGBB`
#[inline]
pub fn encode_rgb332(p: Pixel) -> u8 {
    let r3 = p.r >> 5;
    let g3 = p.g >> 5;
    let b2 = p.b >> 6;
    (r3 << 5) | (g3 << 2) | b2
}

/// Expand `RRRGGGBB` to 8-bit channels the way the display does
#[inline]
pub fn decode_rgb332(byte: u8) -> Pixel {
    let r3 = (byte >> 5) & 0x07;
    let g3 = (byte >> 2) & 0x07;
    let b2 = byte & 0x03;
    let expand = |v: u8, max: u8| ((v as f32 / max as f32) * 255.0).round() as u8;
    Pixel::new(expand(r3, 7), expand(g3, 7), expand(b2, 3))
}

/// 0-100 intensity of the channel sum
#[inline]
pub fn encode_luma(p: Pixel) -> u8 {
    // integer round-half-up of sum * 100 / 765
    ((p.channel_sum() * 200 + 765) / 1530) as u8
}

/// Gray pixel for a 0-100 intensity
#[inline]
pub fn decode_luma(byte: u8) -> Pixel {
    let level = byte.min(LUMA_MAX);
    let v = ((level as f32 / LUMA_MAX as f32) * 255.0).round() as u8;
    Pixel::new(v, v, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rgb332_known_value() {
        assert_eq!(encode_rgb332(Pixel::new(255, 128, 64)), 0b111_100_01);
        assert_eq!(encode_rgb332(Pixel::new(255, 128, 64)), 0xE5);
    }

    #[test]
    fn test_rgb332_extremes() {
        assert_eq!(encode_rgb332(Pixel::BLACK), 0x00);
        assert_eq!(encode_rgb332(Pixel::WHITE), 0xFF);
        assert_eq!(decode_rgb332(0xFF), Pixel::WHITE);
        assert_eq!(decode_rgb332(0x00), Pixel::BLACK);
    }

    #[test]
    fn test_luma_values() {
        assert_eq!(encode_luma(Pixel::BLACK), 0);
        assert_eq!(encode_luma(Pixel::WHITE), 100);
        // 255 * 100 / 765 = 33.33
        assert_eq!(encode_luma(Pixel::new(255, 0, 0)), 33);
        // 383 * 100 / 765 = 50.07
        assert_eq!(encode_luma(Pixel::new(128, 255, 0)), 50);
        // 390 * 100 / 765 = 50.98
        assert_eq!(encode_luma(Pixel::new(130, 130, 130)), 51);
        assert_eq!(decode_luma(100), Pixel::WHITE);
        assert_eq!(decode_luma(250), Pixel::WHITE);
    }

    #[test]
    fn test_encode_frame_is_row_major() {
        let mut frame = FrameBuffer::new();
        frame.set(1, 0, Pixel::WHITE);
        frame.set(0, 1, Pixel::new(255, 0, 0));
        let bytes = FrameCodec::Rgb332.encode(&frame);
        assert_eq!(bytes.len(), FRAME_BYTES);
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[1], 0xFF);
        assert_eq!(bytes[64], 0b111_000_00);
    }

    #[test]
    fn test_encode_is_idempotent() {
        let mut frame = FrameBuffer::new();
        frame.set(10, 20, Pixel::new(90, 180, 45));
        for codec in [FrameCodec::Rgb332, FrameCodec::Luma] {
            assert_eq!(codec.encode(&frame), codec.encode(&frame));
        }
    }

    #[test]
    fn test_wrong_size_is_error() {
        let err = FrameCodec::Rgb332.encode_pixels(&[Pixel::BLACK; 10]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::InvalidBufferSize {
                expected: FRAME_BYTES,
                actual: 10
            }
        );
        assert!(FrameCodec::Luma.decode(&[0u8; 5]).is_err());
        assert!(FrameCodec::Rgb332.encode_rgba(&[0u8; 8]).is_err());
    }

    #[test]
    fn test_encode_rgba_premultiplies_alpha() {
        let mut rgba = vec![0u8; FRAME_BYTES * 4];
        rgba[..4].copy_from_slice(&[255, 255, 255, 255]);
        rgba[4..8].copy_from_slice(&[255, 255, 255, 128]);
        rgba[8..12].copy_from_slice(&[255, 255, 255, 0]);
        let bytes = FrameCodec::Rgb332.encode_rgba(&rgba).unwrap();
        assert_eq!(bytes[0], 0xFF);
        // 255 * 128 / 255 = 128 -> r3 = 4, g3 = 4, b2 = 2
        assert_eq!(bytes[1], 0b100_100_10);
        assert_eq!(bytes[2], 0x00);
    }

    #[test]
    fn test_codec_names() {
        assert_eq!(FrameCodec::from_str("RGB332"), Some(FrameCodec::Rgb332));
        assert_eq!(FrameCodec::from_str("luma"), Some(FrameCodec::Luma));
        assert_eq!(FrameCodec::from_str("jpeg"), None);
        assert_eq!(serde_json::to_string(&FrameCodec::Luma).unwrap(), "\"luma\"");
    }

    proptest! {
        #[test]
        fn rgb332_keeps_top_bits(r: u8, g: u8, b: u8) {
            let decoded = decode_rgb332(encode_rgb332(Pixel::new(r, g, b)));
            prop_assert_eq!(decoded.r >> 5, r >> 5);
            prop_assert_eq!(decoded.g >> 5, g >> 5);
            prop_assert_eq!(decoded.b >> 6, b >> 6);
            // quantization error bounded by one step of each field
            prop_assert!((decoded.r as i32 - r as i32).abs() <= 37);
            prop_assert!((decoded.g as i32 - g as i32).abs() <= 37);
            prop_assert!((decoded.b as i32 - b as i32).abs() <= 85);
        }

        #[test]
        fn luma_in_range(r: u8, g: u8, b: u8) {
            let p = Pixel::new(r, g, b);
            let byte = encode_luma(p);
            prop_assert!(byte <= LUMA_MAX);
            let exact = p.channel_sum() as f64 * 100.0 / 765.0;
            prop_assert!((byte as f64 - exact).abs() <= 0.5);
        }
    }
}
