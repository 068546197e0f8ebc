//! Draws a [`Game`] into a [`PixelBuf`].

use crate::bird::Bird;
use crate::font::{GLYPH_H, draw_text, draw_text_centered};
use crate::game::{Game, Mode};
use crate::geometry::Rect;
use crate::pipe::Pipe;
use crate::render::{LETTERBOX, PixelBuf, Rgb, Viewport};

// ── Colors ──────────────────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const GRASS: Rgb = Rgb(84, 168, 55);
const GRASS_LIGHT: Rgb = Rgb(110, 200, 70);
const DIRT: Rgb = Rgb(210, 185, 110);
const DIRT_DARK: Rgb = Rgb(185, 160, 90);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);
const BIRD_BEAK_HI: Rgb = Rgb(240, 110, 50);
const HILL_FAR: Rgb = Rgb(120, 195, 75);
const HILL_NEAR: Rgb = Rgb(95, 175, 55);
const WHITE: Rgb = Rgb(255, 255, 255);
pub const GAME_OVER_RED: Rgb = Rgb(235, 50, 40);
pub const WINNER_GREEN: Rgb = Rgb(60, 230, 80);

/// World units between the ground stripes; divides the segment width.
const STRIPE: f64 = 42.0;
const LINE_GAP: i32 = 2;

pub fn draw(game: &Game, buf: &mut PixelBuf) {
    let cfg = &game.cfg;
    let vp = Viewport::fit(buf.width(), buf.height(), cfg.world_width, cfg.world_height);

    buf.reset_clip();
    buf.clear(LETTERBOX);
    buf.set_clip(vp.left(), vp.top(), vp.w, vp.h);

    draw_sky(buf, &vp, cfg.ground_y);
    draw_hills(buf, &vp, cfg.world_width, cfg.ground_y);
    for pipe in &game.pipes {
        draw_pipe(buf, &vp, pipe);
    }
    for seg in &game.ground {
        draw_ground(buf, &vp, seg);
    }
    draw_bird(buf, &vp, &game.bird);
    draw_hud(buf, &vp, game);

    match game.mode() {
        Mode::Dead => draw_overlay(buf, &vp, "GAME OVER", GAME_OVER_RED),
        Mode::Won => draw_overlay(buf, &vp, "GRAND WINNER!", WINNER_GREEN),
        Mode::NotStarted | Mode::Playing => {}
    }
    buf.reset_clip();
}

fn fill_world(buf: &mut PixelBuf, vp: &Viewport, r: Rect, c: Rgb) {
    let (x, y, w, h) = vp.rect(r.x, r.y, r.w, r.h);
    buf.fill_rect(x, y, w, h, c);
}

fn draw_sky(buf: &mut PixelBuf, vp: &Viewport, ground_y: f64) {
    let top = vp.top();
    let bottom = vp.y(ground_y);
    let span = (bottom - top).max(1);
    for y in top..bottom {
        let t = ((y - top) * 256 / span) as u16;
        buf.fill_rect(vp.left(), y, vp.w, 1, Rgb::lerp(SKY_TOP, SKY_BOT, t));
    }
}

fn draw_hills(buf: &mut PixelBuf, vp: &Viewport, world_w: f64, ground_y: f64) {
    let base = vp.y(ground_y);
    for (color, freq, amp, lift) in [(HILL_FAR, 0.012, 40.0, 30.0), (HILL_NEAR, 0.02, 25.0, 12.0)] {
        for x in vp.left()..vp.left() + vp.w {
            let wx = (x - vp.left()) as f64 / vp.scale;
            if wx > world_w {
                break;
            }
            let fx = wx * freq;
            let h = (fx.sin() + (fx * 1.7).sin() * 0.5) * amp + amp + lift;
            let top = vp.y(ground_y - h);
            buf.fill_rect(x, top, 1, base - top, color);
        }
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn draw_pipe(buf: &mut PixelBuf, vp: &Viewport, pipe: &Pipe) {
    let cap_h = (vp.scale * 36.0).max(2.0) as i32;
    let cap_extra = (vp.scale * 6.0).max(1.0) as i32;

    for (rect, cap_at_bottom) in [(pipe.upper, true), (pipe.lower, false)] {
        let (x, y, w, h) = vp.rect(rect.x, rect.y, rect.w, rect.h);
        for dx in 0..w {
            buf.fill_rect(x + dx, y, 1, h, pipe_shade(dx, w));
        }

        let cap_y = if cap_at_bottom { y + h - cap_h } else { y };
        let cap_w = w + cap_extra * 2;
        for dx in 0..cap_w {
            buf.fill_rect(x - cap_extra + dx, cap_y, 1, cap_h, pipe_shade(dx, cap_w));
        }
        buf.fill_rect(x - cap_extra, cap_y, cap_w, 1, CAP_DARK);
        buf.fill_rect(x - cap_extra, cap_y + cap_h - 1, cap_w, 1, CAP_DARK);
    }
}

fn draw_ground(buf: &mut PixelBuf, vp: &Viewport, seg: &Rect) {
    let (x0, y0, w, h) = vp.rect(seg.x, seg.y, seg.w, seg.h);
    let grass_h = (vp.scale * 18.0).max(2.0) as i32;
    for x in x0..x0 + w {
        // Pattern in segment-local world units so adjacent segments line up.
        let lx = (x - x0) as f64 / vp.scale;
        let alt = ((lx / (STRIPE / 2.0)) as i32) % 2 == 0;
        buf.fill_rect(x, y0, 1, grass_h - 1, if alt { GRASS_LIGHT } else { GRASS });
        buf.set(x, y0 + grass_h - 1, GRASS);
        for y in y0 + grass_h..y0 + h {
            let ly = (y - y0) as f64 / vp.scale;
            let stripe = ((lx + ly * 2.0) / STRIPE) as i32 % 2 == 0;
            buf.set(x, y, if stripe { DIRT } else { DIRT_DARK });
        }
    }
}

fn draw_bird(buf: &mut PixelBuf, vp: &Viewport, bird: &Bird) {
    let r = bird.rect;
    let part = |fx: f64, fy: f64, fw: f64, fh: f64| {
        Rect::new(r.x + r.w * fx, r.y + r.h * fy, r.w * fw, r.h * fh)
    };
    // Nose up while rising, down while falling.
    let tilt = (bird.velocity / 400.0).clamp(-1.0, 1.0) * 0.12;

    fill_world(buf, vp, part(0.12, 0.1, 0.7, 0.8), BIRD_Y);
    fill_world(buf, vp, part(0.2, 0.1, 0.5, 0.15), BIRD_HI);

    let wing_y = if bird.wing_up() { 0.3 } else { 0.5 };
    fill_world(buf, vp, part(0.15, wing_y, 0.35, 0.25), BIRD_WING);
    // Tail
    fill_world(buf, vp, part(0.0, 0.35 + tilt, 0.14, 0.25), BIRD_WING);

    fill_world(buf, vp, part(0.55, 0.15, 0.22, 0.3), BIRD_EYE);
    fill_world(buf, vp, part(0.68, 0.25, 0.09, 0.15), BIRD_PUPIL);

    fill_world(buf, vp, part(0.78, 0.45 + tilt, 0.22, 0.15), BIRD_BEAK_HI);
    fill_world(buf, vp, part(0.78, 0.6 + tilt, 0.2, 0.15), BIRD_BEAK);
}

fn draw_hud(buf: &mut PixelBuf, vp: &Viewport, game: &Game) {
    let x = vp.x(20.0);
    let y = vp.y(20.0);
    let line2 = vp.y(60.0).max(y + GLYPH_H + LINE_GAP);
    draw_text(buf, x, y, &format!("SCORE : {}", game.score), WHITE);
    draw_text(buf, x, line2, &format!("HIGH  : {}", game.high_score), WHITE);
}

fn draw_overlay(buf: &mut PixelBuf, vp: &Viewport, title: &str, color: Rgb) {
    buf.dim();
    let cx = vp.x(300.0);
    let y = vp.y(320.0) - GLYPH_H / 2;
    let hint_y = vp.y(360.0).max(y + GLYPH_H + LINE_GAP);
    draw_text_centered(buf, cx, y, title, color);
    draw_text_centered(buf, cx, hint_y, "PRESS ENTER", WHITE);
}
