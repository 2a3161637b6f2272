//! Rasterization of chart primitives.
//!
//! Bars are axis-aligned filled rectangles; gridlines and axes are
//! horizontal or vertical lines drawn with Bresenham's algorithm, optionally
//! alpha-blended over what is already in the framebuffer.
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;

pub use primitives::{draw_line, draw_line_blended, draw_rect, Drawable};
