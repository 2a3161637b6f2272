//! Primitive rendering functions.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Line, Rect};

/// Trait for drawable primitives.
pub trait Drawable {
    /// Draw this primitive to a framebuffer.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba);

    /// Draw this primitive alpha-blended over the existing pixels.
    fn draw_blended(&self, fb: &mut Framebuffer, color: Rgba) {
        self.draw(fb, color);
    }
}

/// Walk the pixels of a Bresenham line, calling `plot` for each one that
/// lies at non-negative coordinates.
fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(u32, u32)) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            plot(x as u32, y as u32);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw an opaque line using Bresenham's algorithm.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    bresenham(x0, y0, x1, y1, |x, y| fb.set_pixel(x, y, color));
}

/// Draw a line whose pixels are alpha-blended over the framebuffer.
pub fn draw_line_blended(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    bresenham(x0, y0, x1, y1, |x, y| fb.blend_pixel(x, y, color));
}

impl Drawable for Line {
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        draw_line(
            fb,
            self.start.x.round() as i32,
            self.start.y.round() as i32,
            self.end.x.round() as i32,
            self.end.y.round() as i32,
            color,
        );
    }

    fn draw_blended(&self, fb: &mut Framebuffer, color: Rgba) {
        draw_line_blended(
            fb,
            self.start.x.round() as i32,
            self.start.y.round() as i32,
            self.end.x.round() as i32,
            self.end.y.round() as i32,
            color,
        );
    }
}

/// Draw a filled rectangle. Negative origins are clipped at zero.
pub fn draw_rect(fb: &mut Framebuffer, x: i32, y: i32, width: u32, height: u32, color: Rgba) {
    let (x, width) = clip_span(x, width);
    let (y, height) = clip_span(y, height);
    fb.fill_rect(x, y, width, height, color);
}

fn clip_span(start: i32, len: u32) -> (u32, u32) {
    if start >= 0 {
        (start as u32, len)
    } else {
        (0, len.saturating_sub(start.unsigned_abs()))
    }
}

impl Drawable for Rect {
    /// Snaps both edges to the nearest pixel so adjacent bars share a border
    /// without gaps or overlap.
    fn draw(&self, fb: &mut Framebuffer, color: Rgba) {
        let x0 = self.x.round() as i32;
        let y0 = self.y.round() as i32;
        let x1 = self.right().round() as i32;
        let y1 = self.bottom().round() as i32;
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        draw_rect(fb, x0, y0, (x1 - x0) as u32, (y1 - y0) as u32, color);
    }
}
