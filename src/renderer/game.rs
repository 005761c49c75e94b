//! Flappy game rendering

use super::shapes::{blend_rect, draw_sprite};
use super::sprites::{
    BIRD_FALLING, BIRD_FLAPPING, DIGIT_HEIGHT, DIGIT_WIDTH, SPRITE_SIZE, bird_colour, glyph,
};
use crate::color::Pixel;
use crate::consts::MATRIX_SIZE;
use crate::framebuffer::FrameBuffer;
use crate::sim::state::{Bird, Edge, GameState, Lifecycle, PIPE_HEAD_SIZE, PIPE_WIDTH, Pipe};

pub const PIPE_COLOUR: Pixel = Pixel::new(0, 255, 0);
pub const PIPE_HOLE_COLOUR: Pixel = Pixel::new(0, 128, 0);

/// Rows covered by the dimmed banner band
pub const BANNER_TOP: i32 = 24;
pub const BANNER_HEIGHT: i32 = 16;

pub const START_TEXT: &str = "CLICK TO START";
pub const GAME_OVER_TEXT: &str = "GAME OVER";

/// Rasterize the full game state
pub fn render_game(frame: &mut FrameBuffer, state: &GameState) {
    frame.clear(Pixel::BLACK);

    for pipe in &state.pipes {
        draw_pipe(frame, pipe);
    }
    draw_bird(frame, &state.bird);

    match state.lifecycle {
        Lifecycle::Initial => draw_banner(frame, START_TEXT),
        Lifecycle::Playing => draw_score(frame, state.score, 2, 2),
        Lifecycle::Dead => {
            draw_score(frame, state.score, 2, 2);
            draw_banner(frame, GAME_OVER_TEXT);
        }
    }
}

/// Half-dim band across the middle with `text` centred on it in white
pub fn draw_banner(frame: &mut FrameBuffer, text: &str) {
    let size = MATRIX_SIZE as i32;
    blend_rect(frame, 0, BANNER_TOP, size, BANNER_HEIGHT, Pixel::BLACK, 0.5);
    let x = (size - text_width(text)) / 2;
    let y = BANNER_TOP + (BANNER_HEIGHT - DIGIT_HEIGHT) / 2;
    draw_text(frame, text, x, y, Pixel::WHITE);
}

/// Width in pixels of `text` drawn with `draw_text`
pub fn text_width(text: &str) -> i32 {
    let n = text.chars().count() as i32;
    (n * (DIGIT_WIDTH + 1) - 1).max(0)
}

/// 3x5 text with its top-left corner at `(x, y)`; unknown characters leave a gap
pub fn draw_text(frame: &mut FrameBuffer, text: &str, x: i32, y: i32, colour: Pixel) {
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else { continue };
        let dx = x + i as i32 * (DIGIT_WIDTH + 1);
        draw_sprite(frame, dx, y, &rows, |ch| (ch == 'X').then_some(colour));
    }
}

/// Vertical bar from the pipe's edge inward, with a wider head at the open end
pub fn draw_pipe(frame: &mut FrameBuffer, pipe: &Pipe) {
    let x = pipe.x.floor() as i32;
    for i in 0..pipe.height {
        let head = pipe.height - i < PIPE_HEAD_SIZE;
        let y = match pipe.edge {
            Edge::Top => i,
            Edge::Bottom => MATRIX_SIZE as i32 - i - 1,
        };
        for j in 0..PIPE_WIDTH {
            let colour = if j == 0 && !head {
                PIPE_HOLE_COLOUR
            } else {
                PIPE_COLOUR
            };
            frame.set(x + j, y, colour);
        }
        if head {
            frame.set(x - 1, y, PIPE_COLOUR);
            frame.set(x + PIPE_WIDTH, y, PIPE_COLOUR);
        }
    }
}

/// 16x16 sprite centred on the bird; artwork follows the direction of travel
pub fn draw_bird(frame: &mut FrameBuffer, bird: &Bird) {
    let half = SPRITE_SIZE / 2;
    let x = bird.x.floor() as i32 - half;
    let y = bird.y.floor() as i32 - half;
    let sprite = if bird.vy > 0.0 {
        &BIRD_FALLING
    } else {
        &BIRD_FLAPPING
    };
    draw_sprite(frame, x, y, sprite, bird_colour);
}

/// Score colour brightens through the tiers
pub fn score_colour(score: u32) -> Pixel {
    match score {
        0..=9 => Pixel::WHITE,
        10..=19 => Pixel::new(135, 206, 235),
        20..=29 => Pixel::new(0, 128, 128),
        30..=39 => Pixel::new(0, 255, 255),
        _ => Pixel::new(255, 0, 0),
    }
}

/// Draw `score` in 3x5 digits with its top-left corner at `(x, y)`
pub fn draw_score(frame: &mut FrameBuffer, score: u32, x: i32, y: i32) {
    draw_text(frame, &score.to_string(), x, y, score_colour(score));
}
