//! Pixel buffer drawn to the terminal two pixels per cell.

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    pub const fn dim(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

pub const LETTERBOX: Rgb = Rgb(12, 12, 18);

/// Screen-space clip rectangle, in buffer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Clip {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
    clip: Clip,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
            clip: Clip::full(w, h),
        }
    }

    /// Size for a terminal of `cols` x `rows` cells.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, LETTERBOX);
        self.clip = Clip::full(w, h);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    /// Restricts drawing to the given box until [`PixelBuf::reset_clip`].
    pub fn set_clip(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let full = Clip::full(self.w, self.h);
        self.clip = Clip {
            x0: x.max(full.x0),
            y0: y.max(full.y0),
            x1: (x + w).min(full.x1),
            y1: (y + h).min(full.y1),
        };
    }

    pub fn reset_clip(&mut self) {
        self.clip = Clip::full(self.w, self.h);
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if self.clip.contains(x, y) {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        let x0 = x.max(self.clip.x0);
        let y0 = y.max(self.clip.y0);
        let x1 = (x + w).min(self.clip.x1);
        let y1 = (y + h).min(self.clip.y1);
        for py in y0..y1 {
            for px in x0..x1 {
                self.px[py as usize * self.w + px as usize] = c;
            }
        }
    }

    /// Halves the brightness of everything inside the clip box.
    pub fn dim(&mut self) {
        let Clip { x0, y0, x1, y1 } = self.clip;
        for y in y0..y1 {
            for x in x0..x1 {
                let i = y as usize * self.w + x as usize;
                self.px[i] = self.px[i].dim();
            }
        }
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.term()))?;
                    bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top.term()))?;
                    fg = Some(top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                fg = None;
                bg = None;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

impl Clip {
    fn full(w: usize, h: usize) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: w as i32,
            y1: h as i32,
        }
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Maps world units onto buffer pixels: uniform scale, centred, letterboxed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub ox: f64,
    pub oy: f64,
    pub w: i32,
    pub h: i32,
}

impl Viewport {
    pub fn fit(pw: usize, ph: usize, world_w: f64, world_h: f64) -> Self {
        let scale = (pw as f64 / world_w).min(ph as f64 / world_h);
        let w = (world_w * scale + 1e-9).floor();
        let h = (world_h * scale + 1e-9).floor();
        Self {
            scale,
            ox: ((pw as f64 - w) / 2.0).floor(),
            oy: ((ph as f64 - h) / 2.0).floor(),
            w: w as i32,
            h: h as i32,
        }
    }

    pub fn x(&self, wx: f64) -> i32 {
        (self.ox + wx * self.scale).floor() as i32
    }

    pub fn y(&self, wy: f64) -> i32 {
        (self.oy + wy * self.scale).floor() as i32
    }

    /// Buffer box covering the world box, at least one pixel each way.
    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> (i32, i32, i32, i32) {
        let (x0, y0) = (self.x(x), self.y(y));
        let x1 = self.x(x + w).max(x0 + 1);
        let y1 = self.y(y + h).max(y0 + 1);
        (x0, y0, x1 - x0, y1 - y0)
    }

    pub fn left(&self) -> i32 {
        self.ox as i32
    }

    pub fn top(&self) -> i32 {
        self.oy as i32
    }
}
