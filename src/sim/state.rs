//! Flappy game state and core types

use serde::{Deserialize, Serialize};

use crate::consts::MATRIX_SIZE;
use crate::settings::GameConfig;

/// Pipe width in pixels (excluding the head cap)
pub const PIPE_WIDTH: i32 = 8;
/// Rows at the open end of a pipe drawn with the wider head
pub const PIPE_HEAD_SIZE: i32 = 6;
/// Horizontal extent of a pipe's hitbox, measured from its left edge
pub const PIPE_HITBOX_WIDTH: f32 = 3.0;
/// Column where new pipes appear (just off the right edge)
pub const PIPE_SPAWN_X: f32 = MATRIX_SIZE as f32 + 3.0;
/// Fixed bird column
pub const BIRD_X: f32 = 10.0;
/// Bird row at the start screen
pub const BIRD_START_Y: f32 = 48.0;

/// Game lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Start screen, nothing moves
    Initial,
    /// Simulation active
    Playing,
    /// Collided; frozen until the death timeout resets the game
    Dead,
}

/// Which matrix edge a pipe grows from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
}

/// A scrolling obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge column (negative once partly off screen)
    pub x: f32,
    /// Length in pixels from the edge
    pub height: i32,
    pub edge: Edge,
}

impl Pipe {
    pub fn new(x: f32, height: i32, edge: Edge) -> Self {
        Self { x, height, edge }
    }

    /// Row the pipe's open end reaches, on the matrix side of the edge
    pub fn opening_row(&self) -> f32 {
        match self.edge {
            Edge::Top => self.height as f32,
            Edge::Bottom => MATRIX_SIZE as f32 - self.height as f32,
        }
    }

    /// Whether the trailing edge has scrolled past the left boundary
    pub fn is_gone(&self) -> bool {
        self.x < -(PIPE_WIDTH as f32)
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity (pixels/s, positive is down)
    pub vy: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: BIRD_START_Y,
            vy: 0.0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub lifecycle: Lifecycle,
    /// Ticks spent playing
    pub frame: u64,
    pub score: u32,
    pub bird: Bird,
    /// Live pipes in spawn order
    pub pipes: Vec<Pipe>,
    /// Frame at which the next pipe spawns
    pub next_pipe_spawn: u64,
}

impl GameState {
    /// Start-screen state for `config`
    pub fn new(config: &GameConfig) -> Self {
        Self {
            lifecycle: Lifecycle::Initial,
            frame: 0,
            score: 0,
            bird: Bird::default(),
            pipes: Vec::new(),
            next_pipe_spawn: config.first_spawn_frame,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}
