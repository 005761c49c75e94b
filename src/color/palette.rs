//! Colour modes and multi-stop interpolation
//!
//! Static modes map to one base colour. Animated modes sweep across an ordered
//! list of stops as the animation phase moves from 0 to 1.

use serde::{Deserialize, Serialize};

use super::Pixel;
use crate::error::MatrixError;
use crate::rng::UniformSource;

/// Jitter half-width for static modes (the historical 180 +/- 25 blue)
pub const DEFAULT_JITTER: f32 = 25.0;
/// Reduced jitter so the rainbow sweep stays recognisable
pub const ANIMATED_RAINBOW_JITTER: f32 = 10.0;

/// Colour mode chosen in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColourMode {
    Red,
    Green,
    #[default]
    Blue,
    Rainbow,
    RainbowLight,
    Animated,
    AnimatedRainbow,
}

impl ColourMode {
    pub const ALL: [ColourMode; 7] = [
        ColourMode::Red,
        ColourMode::Green,
        ColourMode::Blue,
        ColourMode::Rainbow,
        ColourMode::RainbowLight,
        ColourMode::Animated,
        ColourMode::AnimatedRainbow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColourMode::Red => "red",
            ColourMode::Green => "green",
            ColourMode::Blue => "blue",
            ColourMode::Rainbow => "rainbow",
            ColourMode::RainbowLight => "rainbow-light",
            ColourMode::Animated => "animated",
            ColourMode::AnimatedRainbow => "animated-rainbow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let name = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|mode| mode.as_str() == name)
    }

    /// Whether the colour depends on the animation phase
    pub fn is_animated(&self) -> bool {
        matches!(self, ColourMode::Animated | ColourMode::AnimatedRainbow)
    }

    /// Base colour of a static mode
    fn base(&self) -> Option<Pixel> {
        match self {
            ColourMode::Red => Some(Pixel::new(230, 50, 50)),
            ColourMode::Green => Some(Pixel::new(50, 230, 80)),
            ColourMode::Blue => Some(Pixel::new(180, 180, 255)),
            ColourMode::Rainbow => Some(Pixel::new(180, 90, 220)),
            ColourMode::RainbowLight => Some(Pixel::new(220, 190, 240)),
            ColourMode::Animated | ColourMode::AnimatedRainbow => None,
        }
    }
}

/// Stop lists for the animated modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Grayscale sweep used by `animated`
    pub animated: Vec<Pixel>,
    /// Hue sweep used by `animated-rainbow`
    pub animated_rainbow: Vec<Pixel>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            animated: vec![
                Pixel::new(32, 32, 32),
                Pixel::WHITE,
                Pixel::new(32, 32, 32),
            ],
            animated_rainbow: vec![
                Pixel::from_hex(0xFF0000),
                Pixel::from_hex(0xFF8000),
                Pixel::from_hex(0xFFFF00),
                Pixel::from_hex(0x00FF00),
                Pixel::from_hex(0x0080FF),
                Pixel::from_hex(0x8000FF),
                Pixel::from_hex(0xFF0000),
            ],
        }
    }
}

impl Palette {
    /// Base colour for `mode` at animation `phase`
    pub fn colour_for(&self, mode: ColourMode, phase: f32) -> Result<Pixel, MatrixError> {
        match mode {
            ColourMode::Animated => interpolate(&self.animated, phase),
            ColourMode::AnimatedRainbow => interpolate(&self.animated_rainbow, phase),
            _ => mode.base().ok_or(MatrixError::InvalidPalette),
        }
    }

    /// Like [`Palette::colour_for`], falling back to the default stops when
    /// this palette's list for `mode` is empty
    pub fn colour_or_default(&self, mode: ColourMode, phase: f32) -> Pixel {
        match self.colour_for(mode, phase) {
            Ok(colour) => colour,
            Err(err) => {
                log::warn!("{} for mode {}, using default stops", err, mode.as_str());
                Palette::default()
                    .colour_for(mode, phase)
                    .unwrap_or(Pixel::WHITE)
            }
        }
    }
}

/// Piecewise-linear interpolation across `stops`, `t` clamped to `[0, 1]`
pub fn interpolate(stops: &[Pixel], t: f32) -> Result<Pixel, MatrixError> {
    match stops {
        [] => Err(MatrixError::InvalidPalette),
        [only] => Ok(*only),
        _ => {
            let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
            let last = stops.len() - 1;
            let scaled = t * last as f32;
            let idx = (scaled.floor() as usize).min(last - 1);
            let frac = scaled - idx as f32;
            let (a, b) = (stops[idx], stops[idx + 1]);
            let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
            Ok(Pixel::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b)))
        }
    }
}

/// Half-width of per-channel spawn jitter for `mode`
pub fn randomness_for(mode: ColourMode) -> f32 {
    match mode {
        ColourMode::AnimatedRainbow => ANIMATED_RAINBOW_JITTER,
        ColourMode::Animated => 0.0,
        _ => DEFAULT_JITTER,
    }
}

/// Add uniform noise in `[-width, width]` to each channel, clamped to 0..=255
pub fn jitter(base: Pixel, width: f32, rng: &mut impl UniformSource) -> Pixel {
    if width <= 0.0 {
        return base;
    }
    let mut channel = |c: u8| (c as f32 + rng.range(-width, width)).round().clamp(0.0, 255.0) as u8;
    let r = channel(base.r);
    let g = channel(base.g);
    let b = channel(base.b);
    Pixel::new(r, g, b)
}
