//! Flappy game owner
//!
//! Wraps the game state with its config and the real-time death timer.

use super::state::{GameState, Lifecycle};
use super::tick::{activate, tick};
use crate::rng::UniformSource;
use crate::settings::GameConfig;

#[derive(Debug, Clone)]
pub struct ObstacleGame {
    state: GameState,
    config: GameConfig,
    /// Seconds spent in `Dead`
    dead_for: f32,
}

impl Default for ObstacleGame {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl ObstacleGame {
    pub fn new(config: GameConfig) -> Self {
        Self {
            state: GameState::new(&config),
            config,
            dead_for: 0.0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the tunables; takes effect on the next tick
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    pub fn activate(&mut self) {
        activate(&mut self.state, &self.config);
    }

    pub fn tick(&mut self, rng: &mut impl UniformSource) {
        tick(&mut self.state, &self.config, rng);
    }

    /// Let `seconds` of real time pass; returns true if the game was reset
    pub fn elapse(&mut self, seconds: f32) -> bool {
        if self.state.lifecycle != Lifecycle::Dead {
            self.dead_for = 0.0;
            return false;
        }
        self.dead_for += seconds.max(0.0);
        if self.dead_for >= self.config.death_timeout_secs {
            log::info!("Resetting after death (score {})", self.state.score);
            self.reset();
            return true;
        }
        false
    }

    /// Back to the start screen with the initial layout
    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config);
        self.dead_for = 0.0;
    }
}
