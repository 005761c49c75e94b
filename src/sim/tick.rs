//! Fixed timestep game tick
//!
//! Advances the flappy game by one frame. Only the `Playing` lifecycle moves
//! anything; the start screen and the death screen are frozen.

use super::difficulty::Tier;
use super::state::{Bird, Edge, GameState, Lifecycle, PIPE_HITBOX_WIDTH, PIPE_SPAWN_X, Pipe};
use crate::consts::MATRIX_SIZE;
use crate::rng::UniformSource;
use crate::settings::GameConfig;

/// Handle the activation input (click/tap/space)
pub fn activate(state: &mut GameState, config: &GameConfig) {
    match state.lifecycle {
        Lifecycle::Initial => {
            state.lifecycle = Lifecycle::Playing;
            log::info!("Game started");
        }
        Lifecycle::Playing => {
            state.bird.vy = config.flap_velocity;
        }
        Lifecycle::Dead => {}
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, config: &GameConfig, rng: &mut impl UniformSource) {
    if state.lifecycle != Lifecycle::Playing {
        return;
    }

    state.frame += 1;

    integrate_bird(&mut state.bird, config);

    let tier = config.difficulty.tier_for(state.score);

    // Scroll pipes; a pair leaving together scores once
    for pipe in &mut state.pipes {
        pipe.x -= 1.0;
    }
    let before = state.pipes.len();
    state.pipes.retain(|p| !p.is_gone());
    if state.pipes.len() < before {
        state.score += 1;
    }

    if state.next_pipe_spawn <= state.frame {
        state.next_pipe_spawn = state.next_pipe_spawn.saturating_add(tier.spawn_interval);
        spawn_pipes(state, &tier, rng);
    }

    let bird = state.bird;
    if state
        .pipes
        .iter()
        .any(|pipe| collides(&bird, pipe, config.collision_distance))
    {
        state.lifecycle = Lifecycle::Dead;
        log::info!("Game over at frame {} with score {}", state.frame, state.score);
    }
}

/// Apply gravity and keep the bird on the matrix
fn integrate_bird(bird: &mut Bird, config: &GameConfig) {
    let floor = (MATRIX_SIZE - 1) as f32;
    bird.vy = (bird.vy + config.gravity * config.dt).min(config.max_speed);
    bird.y += bird.vy * config.dt;
    if bird.y > floor {
        bird.y = floor;
        bird.vy = 0.0;
    }
    if bird.y < 0.0 {
        bird.y = 0.0;
        bird.vy = 0.0;
    }
}

/// Spawn the next obstacle(s) for `tier` at the right edge
fn spawn_pipes(state: &mut GameState, tier: &Tier, rng: &mut impl UniformSource) {
    let size = MATRIX_SIZE as i32;
    if tier.paired {
        let target = (rng.next_f32() * size as f32).floor() as i32;
        // a gap wider than the matrix leaves no pipes either way
        let half_gap = (tier.gap_height / 2).min(MATRIX_SIZE as u32) as i32;
        let top = (target - half_gap).max(0);
        let bottom = (size - (target + half_gap)).min(size - 1);
        for (height, edge) in [(top, Edge::Top), (bottom, Edge::Bottom)] {
            if height > 0 {
                state.pipes.push(Pipe::new(PIPE_SPAWN_X, height, edge));
            }
        }
        log::debug!("Spawned pipe pair around row {} (gap {})", target, tier.gap_height);
    } else {
        let edge = if rng.next_f32() < 0.5 { Edge::Top } else { Edge::Bottom };
        state.pipes.push(Pipe::new(PIPE_SPAWN_X, size / 2, edge));
        log::debug!("Spawned single {:?} pipe", edge);
    }
}

/// Whether `bird` touches `pipe`, with `tolerance` pixels of slack
pub fn collides(bird: &Bird, pipe: &Pipe, tolerance: f32) -> bool {
    let in_column =
        bird.x >= pipe.x - tolerance && bird.x <= pipe.x + PIPE_HITBOX_WIDTH + tolerance;
    if !in_column {
        return false;
    }
    match pipe.edge {
        Edge::Top => bird.y <= pipe.opening_row() + tolerance,
        Edge::Bottom => bird.y >= pipe.opening_row() - tolerance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedSequence, SimRng};
    use crate::sim::difficulty::DifficultyTable;

    fn playing() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        activate(&mut state, &config);
        (state, config)
    }

    #[test]
    fn test_activate_transitions() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);

        activate(&mut state, &config);
        assert_eq!(state.lifecycle, Lifecycle::Playing);
        assert_eq!(state.bird.vy, 0.0);

        activate(&mut state, &config);
        assert_eq!(state.lifecycle, Lifecycle::Playing);
        assert_eq!(state.bird.vy, -100.0);

        state.lifecycle = Lifecycle::Dead;
        let frozen = state.clone();
        activate(&mut state, &config);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_gravity_step() {
        let (mut state, config) = playing();
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.frame, 1);
        assert_eq!(state.bird.vy, 15.0);
        assert_eq!(state.bird.y, 48.75);
    }

    #[test]
    fn test_frozen_outside_playing() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        let start = state.clone();
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state, start);

        state.lifecycle = Lifecycle::Dead;
        state.pipes.push(Pipe::new(30.0, 10, Edge::Top));
        let dead = state.clone();
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state, dead);
    }

    #[test]
    fn test_fall_speed_capped() {
        let (mut state, config) = playing();
        state.bird.y = 10.0;
        state.bird.vy = 95.0;
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.bird.vy, 100.0);
        assert_eq!(state.bird.y, 15.0);
    }

    #[test]
    fn test_clamped_to_matrix() {
        let (mut state, config) = playing();
        state.bird.y = 62.0;
        state.bird.vy = 100.0;
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.bird.y, 63.0);
        assert_eq!(state.bird.vy, 0.0);

        state.bird.y = 1.0;
        state.bird.vy = -100.0;
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.bird.y, 0.0);
        assert_eq!(state.bird.vy, 0.0);
    }

    #[test]
    fn test_pipes_scroll_and_score() {
        let (mut state, config) = playing();
        state.pipes.push(Pipe::new(-8.0, 20, Edge::Top));
        state.pipes.push(Pipe::new(-8.0, 20, Edge::Bottom));
        state.pipes.push(Pipe::new(40.0, 20, Edge::Top));
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.score, 1);
        assert_eq!(state.pipes, vec![Pipe::new(39.0, 20, Edge::Top)]);
    }

    #[test]
    fn test_single_spawn_at_first_tier() {
        let (mut state, config) = playing();
        state.frame = 31;
        tick(&mut state, &config, &mut FixedSequence::constant(0.25));
        assert_eq!(state.pipes, vec![Pipe::new(PIPE_SPAWN_X, 32, Edge::Top)]);
        assert_eq!(state.next_pipe_spawn, 32 + 48);

        state.frame = state.next_pipe_spawn - 1;
        state.bird.y = 48.0;
        state.lifecycle = Lifecycle::Playing;
        tick(&mut state, &config, &mut FixedSequence::constant(0.75));
        assert_eq!(state.pipes.last().map(|p| p.edge), Some(Edge::Bottom));
    }

    #[test]
    fn test_paired_spawn() {
        let (mut state, config) = playing();
        state.score = 10;
        state.frame = 31;
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        // target row 32, half gap 21
        assert_eq!(
            state.pipes,
            vec![
                Pipe::new(PIPE_SPAWN_X, 11, Edge::Top),
                Pipe::new(PIPE_SPAWN_X, 11, Edge::Bottom),
            ]
        );
    }

    #[test]
    fn test_paired_spawn_skips_empty_pipe() {
        let (mut state, config) = playing();
        state.score = 10;
        state.frame = 31;
        tick(&mut state, &config, &mut FixedSequence::constant(0.0));
        assert_eq!(state.pipes, vec![Pipe::new(PIPE_SPAWN_X, 43, Edge::Bottom)]);
    }

    #[test]
    fn test_spawn_interval_follows_tier() {
        let (mut state, config) = playing();
        state.score = 55;
        state.frame = 31;
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.next_pipe_spawn, 32 + 28);
    }

    fn one_tier(gap_height: u32, spawn_interval: u64) -> GameConfig {
        let tier = Tier {
            min_score: 0,
            gap_height,
            spawn_interval,
            paired: true,
        };
        GameConfig {
            difficulty: DifficultyTable::new(vec![tier]).unwrap(),
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_huge_gap_spawns_nothing() {
        let config = one_tier(u32::MAX, 48);
        let mut state = GameState::new(&config);
        activate(&mut state, &config);
        state.frame = 31;
        for value in [0.0, 0.5, 0.99] {
            tick(&mut state, &config, &mut FixedSequence::constant(value));
            state.frame = state.next_pipe_spawn - 1;
        }
        assert!(state.pipes.is_empty());
        assert_eq!(state.lifecycle, Lifecycle::Playing);
    }

    #[test]
    fn test_huge_spawn_interval_saturates() {
        let config = one_tier(42, u64::MAX);
        let mut state = GameState::new(&config);
        activate(&mut state, &config);
        state.frame = 31;
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.pipes.len(), 2);
        assert_eq!(state.next_pipe_spawn, u64::MAX);
        // no further spawns
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_collision_top_boundary() {
        let pipe = Pipe::new(10.0, 10, Edge::Top);
        let at = |y| Bird { x: 10.0, y, vy: 0.0 };
        assert!(collides(&at(14.0), &pipe, 4.0));
        assert!(!collides(&at(15.0), &pipe, 4.0));
    }

    #[test]
    fn test_collision_bottom_boundary() {
        let pipe = Pipe::new(10.0, 10, Edge::Bottom);
        let at = |y| Bird { x: 10.0, y, vy: 0.0 };
        assert!(collides(&at(50.0), &pipe, 4.0));
        assert!(!collides(&at(49.0), &pipe, 4.0));
    }

    #[test]
    fn test_collision_horizontal_tolerance() {
        let bird = Bird { x: 10.0, y: 0.0, vy: 0.0 };
        let pipe_at = |x| Pipe::new(x, 30, Edge::Top);
        assert!(collides(&bird, &pipe_at(14.0), 4.0));
        assert!(!collides(&bird, &pipe_at(15.0), 4.0));
        assert!(collides(&bird, &pipe_at(3.0), 4.0));
        assert!(!collides(&bird, &pipe_at(2.0), 4.0));
    }

    #[test]
    fn test_tick_collision_kills() {
        let (mut state, mut config) = playing();
        config.gravity = 0.0;
        state.bird.y = 14.0;
        state.pipes.push(Pipe::new(11.0, 10, Edge::Top));
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.lifecycle, Lifecycle::Dead);

        let (mut state, mut config) = playing();
        config.gravity = 0.0;
        state.bird.y = 15.0;
        state.pipes.push(Pipe::new(11.0, 10, Edge::Top));
        tick(&mut state, &config, &mut FixedSequence::constant(0.5));
        assert_eq!(state.lifecycle, Lifecycle::Playing);
    }

    #[test]
    fn test_determinism() {
        let config = GameConfig::default();
        let mut a = GameState::new(&config);
        let mut b = GameState::new(&config);
        let mut rng_a = SimRng::new(99999);
        let mut rng_b = SimRng::new(99999);
        activate(&mut a, &config);
        activate(&mut b, &config);
        for frame in 0..400 {
            if frame % 9 == 0 {
                activate(&mut a, &config);
                activate(&mut b, &config);
            }
            tick(&mut a, &config, &mut rng_a);
            tick(&mut b, &config, &mut rng_b);
        }
        assert_eq!(a, b);
    }
}
