//! Simulation settings
//!
//! Plain data handed over by the UI layer, usually as JSON. Nothing here is
//! persisted; values are only clamped to ranges the simulations can run with.

use serde::{Deserialize, Serialize};

use crate::codec::FrameCodec;
use crate::color::{ColourMode, Palette};
use crate::error::MatrixError;
use crate::sim::difficulty::DifficultyTable;

/// Particle toy controls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Spawn rate in particles per second (0 disables spawning)
    pub amount: f32,
    /// Colour mode for newly spawned particles
    pub colour: ColourMode,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Decay divisor: each tick removes `10 / lifetime` from a particle's life
    pub lifetime: f32,
    /// Disc radius at full life
    pub size: f32,
    /// Full width of the initial velocity range
    pub spread: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            amount: 100.0,
            colour: ColourMode::Blue,
            gravity: 0.03,
            lifetime: 10.0,
            size: 2.0,
            spread: 1.0,
        }
    }
}

impl ParticleSettings {
    /// Smallest accepted lifetime divisor
    pub const MIN_LIFETIME: f32 = 0.01;

    /// Copy with every field forced into a usable range
    pub fn clamped(&self) -> Self {
        let defaults = Self::default();
        let finite = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        Self {
            amount: finite(self.amount, defaults.amount).max(0.0),
            colour: self.colour,
            gravity: finite(self.gravity, defaults.gravity),
            lifetime: finite(self.lifetime, defaults.lifetime).max(Self::MIN_LIFETIME),
            size: finite(self.size, defaults.size).max(0.0),
            spread: finite(self.spread, defaults.spread).max(0.0),
        }
    }

    /// Milliseconds between spawns, `None` when spawning is disabled
    pub fn spawn_interval_ms(&self) -> Option<f64> {
        if self.amount > 0.0 && self.amount.is_finite() {
            Some(1000.0 / self.amount as f64)
        } else {
            None
        }
    }

    /// Lifetime removed from each particle per tick
    pub fn decay_per_tick(&self) -> f32 {
        10.0 / self.lifetime.max(Self::MIN_LIFETIME)
    }
}

/// Flappy game tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Downward acceleration (pixels/s^2)
    pub gravity: f32,
    /// Terminal fall speed (pixels/s)
    pub max_speed: f32,
    /// Velocity set by a flap (negative is up)
    pub flap_velocity: f32,
    /// Seconds per game tick
    pub dt: f32,
    /// Slack around pipes for collision tests (pixels)
    pub collision_distance: f32,
    /// Seconds the death screen stays up before resetting
    pub death_timeout_secs: f32,
    /// Frame of the first pipe spawn
    pub first_spawn_frame: u64,
    /// Score tiers
    pub difficulty: DifficultyTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: 300.0,
            max_speed: 100.0,
            flap_velocity: -100.0,
            dt: 0.05,
            collision_distance: 4.0,
            death_timeout_secs: 5.0,
            first_spawn_frame: 32,
            difficulty: DifficultyTable::default(),
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub particles: ParticleSettings,
    pub palette: Palette,
    pub game: GameConfig,
    /// Wire format sent to the display
    pub codec: FrameCodec,
    /// RNG seed; `None` lets the caller pick one
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, MatrixError> {
        let config: Config = serde_json::from_str(json)?;
        log::info!(
            "Loaded config (codec {}, colour {})",
            config.codec.as_str(),
            config.particles.colour.as_str()
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, MatrixError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_ranges() {
        let wild = ParticleSettings {
            amount: -5.0,
            colour: ColourMode::Red,
            gravity: f32::NAN,
            lifetime: 0.0,
            size: -1.0,
            spread: f32::INFINITY,
        };
        let s = wild.clamped();
        assert_eq!(s.amount, 0.0);
        assert_eq!(s.gravity, ParticleSettings::default().gravity);
        assert_eq!(s.lifetime, ParticleSettings::MIN_LIFETIME);
        assert_eq!(s.size, 0.0);
        assert_eq!(s.spread, ParticleSettings::default().spread);
        assert_eq!(s.colour, ColourMode::Red);
    }

    #[test]
    fn test_spawn_interval() {
        let s = ParticleSettings::default();
        assert_eq!(s.spawn_interval_ms(), Some(10.0));
        let off = ParticleSettings {
            amount: 0.0,
            ..s
        };
        assert_eq!(off.spawn_interval_ms(), None);
    }

    #[test]
    fn test_decay_per_tick() {
        let s = ParticleSettings {
            lifetime: 5.0,
            ..Default::default()
        };
        assert_eq!(s.decay_per_tick(), 2.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(
            r#"{"particles": {"amount": 20, "colour": "animated-rainbow"}, "codec": "luma"}"#,
        )
        .unwrap();
        assert_eq!(config.particles.amount, 20.0);
        assert_eq!(config.particles.colour, ColourMode::AnimatedRainbow);
        assert_eq!(config.particles.size, 2.0);
        assert_eq!(config.codec, FrameCodec::Luma);
        assert_eq!(config.game, GameConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config {
            seed: Some(7),
            ..Default::default()
        };
        let back = Config::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            Config::from_json("{\"codec\": \"mpeg\"}"),
            Err(MatrixError::Config(_))
        ));
    }
}
