//! Renderer configuration.
//!
//! Everything here is fixed for the lifetime of a [`HistogramRenderer`];
//! the per-pass input lives in [`HistogramInput`].
//!
//! [`HistogramRenderer`]: crate::renderer::HistogramRenderer
//! [`HistogramInput`]: crate::input::HistogramInput

use crate::color::{Rgba, CATEGORY20};

/// Pixel margins around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Space above the plot (title row).
    pub top: f32,
    /// Space right of the plot.
    pub right: f32,
    /// Space below the plot (x tick labels and axis label).
    pub bottom: f32,
    /// Space left of the plot (y tick labels and axis label).
    pub left: f32,
}

impl Margins {
    /// Create margins from explicit values.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Combined left and right margin.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top and bottom margin.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(30.0, 20.0, 40.0, 40.0)
    }
}

/// What to do with a bin width that is not a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinWidthPolicy {
    /// Fail the update with [`Error::InvalidBinWidth`](crate::Error::InvalidBinWidth).
    #[default]
    Reject,
    /// Treat any invalid bin width as 1.
    ClampToOne,
}

/// Configuration for [`HistogramRenderer`](crate::renderer::HistogramRenderer).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RendererConfig {
    /// Margins around the plot.
    pub margins: Margins,
    /// Plot height used when there are no values.
    pub fallback_height: f32,
    /// Invalid bin width handling.
    pub bin_width_policy: BinWidthPolicy,
    /// Bar fill colors, cycled by bin index.
    pub palette: Vec<Rgba>,
    /// Chart background.
    pub background: Rgba,
    /// Color of axis lines, tick labels and text.
    pub foreground: Rgba,
    /// Opacity of the tick gridlines (0.0-1.0).
    pub gridline_opacity: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            fallback_height: 300.0,
            bin_width_policy: BinWidthPolicy::default(),
            palette: CATEGORY20.to_vec(),
            background: Rgba::WHITE,
            foreground: Rgba::BLACK,
            gridline_opacity: 0.2,
        }
    }
}

impl RendererConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the plot margins.
    #[must_use]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the plot height used for empty input.
    #[must_use]
    pub fn fallback_height(mut self, height: f32) -> Self {
        self.fallback_height = height.max(0.0);
        self
    }

    /// Set the invalid bin width policy.
    #[must_use]
    pub fn bin_width_policy(mut self, policy: BinWidthPolicy) -> Self {
        self.bin_width_policy = policy;
        self
    }

    /// Set the bar palette. An empty palette falls back to the default one.
    #[must_use]
    pub fn palette(mut self, palette: Vec<Rgba>) -> Self {
        self.palette = palette;
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set the foreground (axis/text) color.
    #[must_use]
    pub fn foreground(mut self, color: Rgba) -> Self {
        self.foreground = color;
        self
    }

    /// Set the gridline opacity, clamped to 0.0-1.0.
    #[must_use]
    pub fn gridline_opacity(mut self, opacity: f32) -> Self {
        self.gridline_opacity = opacity.clamp(0.0, 1.0);
        self
    }
}
