//! Interactive sessions
//!
//! Each session owns one simulation plus its inputs and RNG, and plugs into
//! [`SimulationClock`](crate::clock::SimulationClock) through [`Simulation`].

use glam::Vec2;

use crate::clamp_pointer;
use crate::clock::Simulation;
use crate::color::Palette;
use crate::consts::{GAME_TICK_MS, PARTICLE_TICK_MS};
use crate::framebuffer::FrameBuffer;
use crate::renderer::{render_game, render_particles};
use crate::rng::SimRng;
use crate::settings::{Config, GameConfig, ParticleSettings};
use crate::sim::{Lifecycle, ObstacleGame, ParticleSystem};

/// Ticks for one full sweep of an animated palette (5 s at 60 Hz)
pub const ANIMATION_PERIOD_TICKS: u64 = 300;

/// Seed used when the config does not pin one
pub const DEFAULT_SEED: u64 = 0x746f_7465_6d;

/// Particle emitter following the pointer
#[derive(Debug, Clone)]
pub struct ParticleToy {
    system: ParticleSystem,
    settings: ParticleSettings,
    palette: Palette,
    pointer: Option<Vec2>,
    rng: SimRng,
    ticks: u64,
}

impl ParticleToy {
    pub fn new(settings: ParticleSettings, palette: Palette, seed: u64) -> Self {
        Self {
            system: ParticleSystem::new(),
            settings: settings.clamped(),
            palette,
            pointer: None,
            rng: SimRng::new(seed),
            ticks: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.particles,
            config.palette.clone(),
            config.seed.unwrap_or(DEFAULT_SEED),
        )
    }

    /// Pointer in buffer coordinates, `None` when released
    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer.and_then(clamp_pointer);
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Takes effect immediately, including the spawn cadence
    pub fn set_settings(&mut self, settings: ParticleSettings) {
        self.settings = settings.clamped();
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Position in the animated palette sweep, in `[0, 1)`
    pub fn phase(&self) -> f32 {
        (self.ticks % ANIMATION_PERIOD_TICKS) as f32 / ANIMATION_PERIOD_TICKS as f32
    }
}

impl Simulation for ParticleToy {
    fn tick_interval_ms(&self) -> f64 {
        PARTICLE_TICK_MS
    }

    fn spawn_interval_ms(&self) -> Option<f64> {
        self.settings.spawn_interval_ms()
    }

    fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.system.advance(&self.settings);
    }

    fn spawn_tick(&mut self) {
        let Some(at) = self.pointer else { return };
        let phase = self.phase();
        self.system
            .spawn(at, &self.settings, &self.palette, phase, &mut self.rng);
    }

    fn render(&self, frame: &mut FrameBuffer) {
        render_particles(frame, &self.system, &self.settings);
    }
}

/// Flappy game with its RNG; spawns are frame-counted inside the game
#[derive(Debug, Clone)]
pub struct FlappySession {
    game: ObstacleGame,
    rng: SimRng,
}

impl FlappySession {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            game: ObstacleGame::new(config),
            rng: SimRng::new(seed),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.game.clone(), config.seed.unwrap_or(DEFAULT_SEED))
    }

    /// Start, flap, or nothing when dead
    pub fn activate(&mut self) {
        self.game.activate();
    }

    pub fn game(&self) -> &ObstacleGame {
        &self.game
    }

    pub fn set_config(&mut self, config: GameConfig) {
        self.game.set_config(config);
    }
}

impl Simulation for FlappySession {
    fn tick_interval_ms(&self) -> f64 {
        GAME_TICK_MS
    }

    fn tick(&mut self) {
        // the killing tick itself is not death time
        let was_dead = self.game.state().lifecycle == Lifecycle::Dead;
        self.game.tick(&mut self.rng);
        if was_dead {
            self.game.elapse((GAME_TICK_MS / 1000.0) as f32);
        }
    }

    fn render(&self, frame: &mut FrameBuffer) {
        render_game(frame, self.game.state());
    }
}
