//! 3x5 bitmap font for the HUD and overlays.

use crate::render::{PixelBuf, Rgb};

pub const GLYPH_W: i32 = 3;
pub const GLYPH_H: i32 = 5;
/// Horizontal advance per character, including one pixel of spacing.
pub const ADVANCE: i32 = GLYPH_W + 1;

const SHADOW: Rgb = Rgb(30, 30, 30);

#[rustfmt::skip]
static DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
static LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,0,1, 1,1,1, 1,1,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 1,1,0, 0,1,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,1,1, 1,1,1, 1,0,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

#[rustfmt::skip]
static COLON: [u8; 15] = [0,0,0, 0,1,0, 0,0,0, 0,1,0, 0,0,0];
#[rustfmt::skip]
static BANG: [u8; 15] = [0,1,0, 0,1,0, 0,1,0, 0,0,0, 0,1,0];

fn glyph(ch: char) -> Option<&'static [u8; 15]> {
    match ch.to_ascii_uppercase() {
        c @ '0'..='9' => Some(&DIGITS[(c as u8 - b'0') as usize]),
        c @ 'A'..='Z' => Some(&LETTERS[(c as u8 - b'A') as usize]),
        ':' => Some(&COLON),
        '!' => Some(&BANG),
        _ => None,
    }
}

/// Width in pixels of `text` as drawn by [`draw_text`].
pub fn text_width(text: &str) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * ADVANCE - 1 }
}

/// Draws `text` with its top-left at (x, y) and a one-pixel drop shadow.
/// Characters without a glyph advance like a space.
pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, fg: Rgb) {
    for pass in [true, false] {
        for (i, ch) in text.chars().enumerate() {
            let Some(g) = glyph(ch) else {
                continue;
            };
            let gx = x + i as i32 * ADVANCE;
            for row in 0..GLYPH_H {
                for col in 0..GLYPH_W {
                    if g[(row * GLYPH_W + col) as usize] == 0 {
                        continue;
                    }
                    if pass {
                        buf.set(gx + col + 1, y + row + 1, SHADOW);
                    } else {
                        buf.set(gx + col, y + row, fg);
                    }
                }
            }
        }
    }
}

/// Draws `text` centred horizontally on `cx`.
pub fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb) {
    draw_text(buf, cx - text_width(text) / 2, y, text, fg);
}
