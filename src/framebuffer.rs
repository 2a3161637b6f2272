//! RGBA raster that chart exports are drawn into.
//!
//! Rows are tightly packed (`width * 4` bytes each), which is the layout the
//! PNG encoder consumes directly. Whole-image reductions go through trueno.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::{Backend, Vector};

/// Largest accepted side length, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

const CHANNELS: usize = 4;

/// Tightly packed RGBA framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Framebuffer {
    /// Allocate a transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when either side is zero or larger
    /// than [`MAX_DIMENSION`].
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_histogram::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(300, 250).unwrap();
    /// assert_eq!((fb.width(), fb.height()), (300, 250));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let valid = |side: u32| (1..=MAX_DIMENSION).contains(&side);
        if !valid(width) || !valid(height) {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = width as usize * height as usize * CHANNELS;
        Ok(Self { width, height, data: vec![0; len] })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Paint every pixel with `color`.
    pub fn clear(&mut self, color: Rgba) {
        let px = color.to_array();
        self.data.chunks_exact_mut(CHANNELS).for_each(|chunk| chunk.copy_from_slice(&px));
    }

    /// Fill the `w`x`h` block at (`x`, `y`), clipped to the framebuffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        let px = color.to_array();
        for row in y..y_end {
            let start = self.offset(x, row);
            let end = self.offset(x_end, row);
            self.data[start..end]
                .chunks_exact_mut(CHANNELS)
                .for_each(|chunk| chunk.copy_from_slice(&px));
        }
    }

    /// Pixel at (`x`, `y`), or `None` outside the framebuffer.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.in_bounds(x, y).then(|| {
            let i = self.offset(x, y);
            Rgba::from_array([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
        })
    }

    /// Overwrite the pixel at (`x`, `y`). Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if self.in_bounds(x, y) {
            let i = self.offset(x, y);
            self.data[i..i + CHANNELS].copy_from_slice(&color.to_array());
        }
    }

    /// Composite `color` over the pixel at (`x`, `y`) (Porter-Duff "over").
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.offset(x, y);
        let dst = &mut self.data[i..i + CHANNELS];

        let src_a = f32::from(color.a) / 255.0;
        let dst_a = f32::from(dst[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }

        for (channel, src) in dst.iter_mut().zip([color.r, color.g, color.b]) {
            let under = f32::from(*channel) * dst_a * (1.0 - src_a);
            let mixed = (f32::from(src) * src_a + under) / out_a;
            *channel = mixed.round() as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Number of pixels exactly equal to `color`.
    #[cfg(test)]
    pub(crate) fn count_color(&self, color: Rgba) -> usize {
        let needle = color.to_array();
        self.data.chunks_exact(CHANNELS).filter(|px| *px == needle).count()
    }

    /// (min, max, mean) of BT.709 luminance over the whole image.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luma: Vec<f32> = self
            .data
            .chunks_exact(CHANNELS)
            .map(|px| {
                0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2])
            })
            .collect();
        let v = Vector::from_vec(luma);
        (v.min().unwrap_or(0.0), v.max().unwrap_or(0.0), v.mean().unwrap_or(0.0))
    }

    /// SIMD backend trueno picked for this machine.
    #[must_use]
    pub fn backend() -> Backend {
        Backend::select_best()
    }

    #[inline]
    fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}
