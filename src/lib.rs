//! Totem Matrix - simulations streamed to a 64x64 LED matrix
//!
//! Core modules:
//! - `color`: Pixels, colour modes and multi-stop palettes
//! - `framebuffer`: Fixed 64x64 RGB frame with clipped drawing
//! - `sim`: Deterministic simulations (particle toy, flappy game)
//! - `renderer`: Rasterizes simulation state into a frame
//! - `codec`: RGB332 and luma wire formats
//! - `rng`: Injectable uniform randomness
//! - `clock`: Fixed-interval scheduling and single-flight frame sending
//! - `session`: Particle toy and flappy sessions driven by the clock
//! - `platform`: Browser bindings

pub mod clock;
pub mod codec;
pub mod color;
pub mod error;
pub mod framebuffer;
pub mod platform;
pub mod renderer;
pub mod rng;
pub mod session;
pub mod settings;
pub mod sim;

pub use codec::FrameCodec;
pub use color::{ColourMode, Palette, Pixel};
pub use error::MatrixError;
pub use framebuffer::FrameBuffer;
pub use settings::{Config, ParticleSettings};

use glam::Vec2;

/// Matrix and timing constants
pub mod consts {
    /// Matrix edge length in pixels (the display is square)
    pub const MATRIX_SIZE: usize = 64;
    /// Bytes in one encoded frame (one byte per pixel)
    pub const FRAME_BYTES: usize = MATRIX_SIZE * MATRIX_SIZE;

    /// Particle physics/render tick (60 Hz)
    pub const PARTICLE_TICK_MS: f64 = 1000.0 / 60.0;
    /// Game physics/render tick (20 Hz)
    pub const GAME_TICK_MS: f64 = 50.0;
    /// Encode/send tick (10 Hz)
    pub const SEND_TICK_MS: f64 = 100.0;
    /// Maximum catch-up steps per driver per advance call
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Clamp a pointer position into buffer coordinates
///
/// Non-finite coordinates are treated as no pointer at all.
#[inline]
pub fn clamp_pointer(point: Vec2) -> Option<Vec2> {
    if !point.is_finite() {
        return None;
    }
    let max = (consts::MATRIX_SIZE - 1) as f32;
    Some(point.clamp(Vec2::ZERO, Vec2::splat(max)))
}
