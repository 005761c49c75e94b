//! Software rendering module
//!
//! Rasterizes simulation state into a `FrameBuffer`. Every function here is a
//! pure function of the state it is given.

pub mod game;
pub mod particles;
pub mod shapes;
pub mod sprites;

pub use game::{render_game, score_colour};
pub use particles::render_particles;
