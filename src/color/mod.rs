//! Colour handling
//!
//! `Pixel` is the value type written into frames; `palette` maps the UI's
//! colour modes to base colours and jitter widths.

pub mod palette;
pub mod pixel;

pub use palette::{
    ANIMATED_RAINBOW_JITTER, ColourMode, DEFAULT_JITTER, Palette, interpolate, jitter,
    randomness_for,
};
pub use pixel::Pixel;
