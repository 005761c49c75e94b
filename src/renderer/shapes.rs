//! Rasterization of 2D primitives onto a frame

use glam::Vec2;

use crate::color::Pixel;
use crate::framebuffer::FrameBuffer;

/// Fill a disc, blending `colour` at `alpha` onto the frame
///
/// Covers every pixel whose centre lies within `radius` of `center`, plus the
/// pixel containing `center` itself so tiny discs never vanish.
pub fn fill_disc(frame: &mut FrameBuffer, center: Vec2, radius: f32, colour: Pixel, alpha: f32) {
    if radius.is_nan() || radius <= 0.0 || !center.is_finite() || alpha <= 0.0 {
        return;
    }
    let x0 = (center.x - radius).floor() as i32;
    let x1 = (center.x + radius).floor() as i32;
    let y0 = (center.y - radius).floor() as i32;
    let y1 = (center.y + radius).floor() as i32;
    let home = (center.x.floor() as i32, center.y.floor() as i32);
    let r2 = radius * radius;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if (x, y) == home || pixel_center.distance_squared(center) <= r2 {
                frame.blend(x, y, colour, alpha);
            }
        }
    }
}

/// Blend an axis-aligned rectangle onto the frame (clipped)
pub fn blend_rect(
    frame: &mut FrameBuffer,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    colour: Pixel,
    alpha: f32,
) {
    for row in y..y + h {
        for col in x..x + w {
            frame.blend(col, row, colour, alpha);
        }
    }
}

/// Draw a character-art sprite with its top-left corner at `(x, y)`
///
/// `palette` maps each character to a colour; unmapped characters are
/// transparent.
pub fn draw_sprite(
    frame: &mut FrameBuffer,
    x: i32,
    y: i32,
    rows: &[&str],
    palette: impl Fn(char) -> Option<Pixel>,
) {
    for (dy, row) in rows.iter().enumerate() {
        for (dx, c) in row.chars().enumerate() {
            if let Some(colour) = palette(c) {
                frame.set(x + dx as i32, y + dy as i32, colour);
            }
        }
    }
}
