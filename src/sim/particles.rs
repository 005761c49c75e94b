//! Particle emitter
//!
//! Particles are spawned at the pointer, drift under per-tick gravity and fade
//! out as their lifetime counts down from [`FULL_LIFETIME`].

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::{Palette, Pixel, jitter, randomness_for};
use crate::rng::UniformSource;
use crate::settings::ParticleSettings;

/// Lifetime of a freshly spawned particle
pub const FULL_LIFETIME: f32 = 100.0;
/// Maximum live particles; the oldest are dropped first
pub const MAX_PARTICLES: usize = 512;

/// A single particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Counts down to 0; removed once it gets there
    pub lifetime: f32,
    pub colour: Pixel,
}

impl Particle {
    /// Remaining life as a fraction in `[0, 1]`
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        (self.lifetime / FULL_LIFETIME).clamp(0.0, 1.0)
    }
}

/// Owns all live particles
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    /// Oldest first
    particles: VecDeque<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Create one particle at `at` and add it to the system
    ///
    /// `phase` is the animation phase used by animated colour modes.
    pub fn spawn(
        &mut self,
        at: Vec2,
        settings: &ParticleSettings,
        palette: &Palette,
        phase: f32,
        rng: &mut impl UniformSource,
    ) -> Particle {
        let half = settings.spread / 2.0;
        let vel = Vec2::new(rng.range(-half, half), rng.range(-half, half));
        let base = palette.colour_or_default(settings.colour, phase);
        let colour = jitter(base, randomness_for(settings.colour), rng);
        let particle = Particle {
            pos: at,
            vel,
            lifetime: FULL_LIFETIME,
            colour,
        };
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
        particle
    }

    /// Integrate motion and fading for one tick, dropping expired particles
    pub fn advance(&mut self, settings: &ParticleSettings) {
        let decay = settings.decay_per_tick();
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += settings.gravity;
            p.lifetime -= decay;
        }
        self.particles.retain(|p| p.lifetime > 0.0);
    }
}
