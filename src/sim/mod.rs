//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected randomness only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod game;
pub mod particles;
pub mod state;
pub mod tick;

pub use difficulty::{DifficultyTable, Tier};
pub use game::ObstacleGame;
pub use particles::{FULL_LIFETIME, MAX_PARTICLES, Particle, ParticleSystem};
pub use state::{Bird, Edge, GameState, Lifecycle, Pipe};
pub use tick::{activate, collides, tick};
