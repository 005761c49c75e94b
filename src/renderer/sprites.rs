//! Character-art sprites
//!
//! `Y` yellow body, `O` orange beak, `K` black outline, anything else
//! transparent.

use crate::color::Pixel;

pub const SPRITE_SIZE: i32 = 16;

/// Bird drawn while falling (wing down)
#[rustfmt::skip]
pub const BIRD_FALLING: [&str; 16] = [
    "................",
    "................",
    ".......YYY......",
    "......YYYYYY....",
    "......YYYYKYO...",
    "......YYYYYYOOO.",
    "Y.YYY.YYYYYYOOOO",
    ".YKYYY.YYYYYOO..",
    "..YKYYYYYYYYY...",
    "YYYYKYYYKYYYYY..",
    ".YYYYYKKKKYYYYY.",
    "..YYYYYYYYYYYYY.",
    "....YYYYYYYYYY..",
    ".....YYYYYYYY...",
    "................",
    "................",
];

/// Bird drawn while rising or hovering (wing up)
#[rustfmt::skip]
pub const BIRD_FLAPPING: [&str; 16] = [
    "................",
    "................",
    ".......YYY......",
    "......YYYYYY....",
    "......YYYYKYO...",
    "......YYYYYYOOO.",
    "......YYYYYYOOOO",
    ".......YYYYYOO..",
    "..YYYYYYYYYYY...",
    "YYYYYYYYKYYYYY..",
    ".YYYYKYKKKYYYYY.",
    "..YKYYYYKYYYYYY.",
    "..KYYYYKYYYYYY..",
    "..YYYYKYYYYYY...",
    "..YYY...........",
    "................",
];

pub fn bird_colour(c: char) -> Option<Pixel> {
    match c {
        'Y' => Some(Pixel::from_hex(0xFFFF00)),
        'O' => Some(Pixel::from_hex(0xFF9900)),
        'K' => Some(Pixel::BLACK),
        _ => None,
    }
}

pub const DIGIT_WIDTH: i32 = 3;
pub const DIGIT_HEIGHT: i32 = 5;

/// 3x5 digits for the score
#[rustfmt::skip]
pub const DIGITS: [[&str; 5]; 10] = [
    ["XXX", "X.X", "X.X", "X.X", "XXX"],
    [".X.", "XX.", ".X.", ".X.", "XXX"],
    ["XXX", "..X", "XXX", "X..", "XXX"],
    ["XXX", "..X", "XXX", "..X", "XXX"],
    ["X.X", "X.X", "XXX", "..X", "..X"],
    ["XXX", "X..", "XXX", "..X", "XXX"],
    ["XXX", "X..", "XXX", "X.X", "XXX"],
    ["XXX", "..X", "..X", "..X", "..X"],
    ["XXX", "X.X", "XXX", "X.X", "XXX"],
    ["XXX", "X.X", "XXX", "..X", "XXX"],
];

/// 3x5 glyph for banner text; digits, space and the letters the banners use
#[rustfmt::skip]
pub fn glyph(c: char) -> Option<[&'static str; 5]> {
    if let Some(d) = c.to_digit(10) {
        return Some(DIGITS[d as usize]);
    }
    let rows = match c.to_ascii_uppercase() {
        ' ' => ["...", "...", "...", "...", "..."],
        'A' => [".X.", "X.X", "XXX", "X.X", "X.X"],
        'C' => ["XXX", "X..", "X..", "X..", "XXX"],
        'E' => ["XXX", "X..", "XX.", "X..", "XXX"],
        'G' => ["XXX", "X..", "X.X", "X.X", "XXX"],
        'I' => ["XXX", ".X.", ".X.", ".X.", "XXX"],
        'K' => ["X.X", "X.X", "XX.", "X.X", "X.X"],
        'L' => ["X..", "X..", "X..", "X..", "XXX"],
        'M' => ["X.X", "XXX", "XXX", "X.X", "X.X"],
        'O' => ["XXX", "X.X", "X.X", "X.X", "XXX"],
        'R' => ["XX.", "X.X", "XX.", "X.X", "X.X"],
        'S' => ["XXX", "X..", "XXX", "..X", "XXX"],
        'T' => ["XXX", ".X.", ".X.", ".X.", ".X."],
        'V' => ["X.X", "X.X", "X.X", "X.X", ".X."],
        _ => return None,
    };
    Some(rows)
}
