//! The histogram update pass.
//!
//! [`HistogramRenderer::update`] is a pure function from the current input
//! snapshot and container width to a [`RenderDescription`]: bars, ticks,
//! labels and chart size. Nothing is cached between passes, so the caller
//! decides when to recompute (keystroke, resize, explicit refresh) and how
//! to debounce.

use crate::bins::{Bin, BinSet};
use crate::color::{palette_color, Rgba};
use crate::config::{Margins, RendererConfig};
use crate::error::Result;
use crate::geometry::{Line, Rect};
use crate::input::HistogramInput;
use crate::scale::{LinearScale, Scale};

/// A drawable bar for one bin, in plot coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The bin this bar draws.
    pub bin: Bin,
    /// Bar rectangle relative to the plot origin (top-left of the plot area).
    pub rect: Rect,
    /// Fill color, picked from the palette by bin index.
    pub fill: Rgba,
}

/// An axis tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Domain value at the tick.
    pub value: u64,
    /// Pixel position along the axis, relative to the plot origin.
    pub position: f32,
    /// Tick label.
    pub label: String,
}

/// Everything the presentation layer needs to draw one histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescription {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Y-axis label.
    pub y_label: String,
    /// One bar per bin, left to right.
    pub bars: Vec<Bar>,
    /// X ticks at every bin boundary inside the domain.
    pub x_ticks: Vec<Tick>,
    /// Y ticks at every integer from 0 to [`RenderDescription::y_max`].
    pub y_ticks: Vec<Tick>,
    /// Upper bound of the count axis: largest bin count plus one.
    pub y_max: usize,
    /// Width of the plot area in pixels.
    pub plot_width: f32,
    /// Height of the plot area in pixels.
    pub plot_height: f32,
    /// Margins around the plot area.
    pub margins: Margins,
    /// Horizontal scale (bin domain to pixels).
    pub x_scale: LinearScale,
    /// Vertical scale (count domain to pixels, inverted).
    pub y_scale: LinearScale,
    /// The bins behind the bars.
    pub bin_set: BinSet,
    /// Chart background.
    pub background: Rgba,
    /// Axis and text color.
    pub foreground: Rgba,
    /// Gridline color (foreground at the configured opacity).
    pub gridline: Rgba,
}

impl RenderDescription {
    /// Full chart width including margins.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.plot_width + self.margins.horizontal()
    }

    /// Full chart height including margins.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.plot_height + self.margins.vertical()
    }

    /// Whether the pass had any parsed values.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.bin_set.value_count() > 0
    }

    /// Bar rectangles in chart coordinates (plot offset by the margins).
    pub fn bar_rects(&self) -> impl Iterator<Item = (Rect, Rgba)> + '_ {
        let (dx, dy) = (self.margins.left, self.margins.top);
        self.bars.iter().map(move |bar| (bar.rect.translated(dx, dy), bar.fill))
    }

    /// Gridlines in chart coordinates: one vertical line per x tick and one
    /// horizontal line per y tick, each spanning the plot area.
    #[must_use]
    pub fn gridlines(&self) -> Vec<Line> {
        let (left, top) = (self.margins.left, self.margins.top);
        let (right, bottom) = (left + self.plot_width, top + self.plot_height);

        let vertical = self.x_ticks.iter().map(|tick| {
            let x = left + tick.position;
            Line::from_coords(x, top, x, bottom)
        });
        let horizontal = self.y_ticks.iter().map(|tick| {
            let y = top + tick.position;
            Line::from_coords(left, y, right, y)
        });
        vertical.chain(horizontal).collect()
    }

    /// The x-axis baseline and the y-axis line, in chart coordinates.
    #[must_use]
    pub fn axis_lines(&self) -> [Line; 2] {
        let (left, top) = (self.margins.left, self.margins.top);
        let bottom = top + self.plot_height;
        [
            Line::from_coords(left, bottom, left + self.plot_width, bottom),
            Line::from_coords(left, top, left, bottom),
        ]
    }
}

/// Computes histogram render descriptions.
#[derive(Debug, Clone, Default)]
pub struct HistogramRenderer {
    config: RendererConfig,
}

impl HistogramRenderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// The renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Recompute the chart for `input` inside a container `container_width`
    /// pixels wide.
    ///
    /// Malformed value tokens are dropped. A non-finite or too-narrow
    /// container yields a zero-width plot rather than an error.
    ///
    /// The bar count is `ceil(max / bin_width) + 1` for any input whose bin
    /// count stays within [`MAX_BIN_COUNT`] (100 000). Larger layouts, such
    /// as `"1000000"` with a bin width of `"1"`, are refused instead of
    /// allocated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBinWidth`](crate::Error::InvalidBinWidth) when
    /// the bin width is rejected by the configured policy, and
    /// [`Error::BinRange`](crate::Error::BinRange) when the layout would need
    /// more than [`MAX_BIN_COUNT`] bins or its bounds overflow `u64`.
    ///
    /// [`MAX_BIN_COUNT`]: crate::bins::MAX_BIN_COUNT
    pub fn update(
        &self,
        input: &HistogramInput,
        container_width: f32,
    ) -> Result<RenderDescription> {
        let values = input.parsed_values();
        let bin_width = input.parsed_bin_width(self.config.bin_width_policy)?;
        let bin_set = BinSet::compute(&values, bin_width)?;

        let margins = self.config.margins;
        let plot_width = if container_width.is_finite() {
            (container_width - margins.horizontal()).max(0.0)
        } else {
            0.0
        };

        let bin_count = bin_set.bin_count();
        let y_max = bin_set.max_count() + 1;
        let plot_height = if values.is_empty() {
            self.config.fallback_height
        } else {
            ((plot_width / bin_count as f32) * y_max as f32).ceil()
        };

        let (_, domain_max) = bin_set.domain();
        let x_scale = LinearScale::new((0.0, domain_max as f32), (0.0, plot_width))?;
        let y_scale = LinearScale::new((0.0, y_max as f32), (plot_height, 0.0))?;

        let bars = bin_set
            .bins()
            .iter()
            .map(|bin| {
                let x0 = x_scale.scale(bin.lower as f32);
                let x1 = x_scale.scale(bin.upper as f32);
                let top = y_scale.scale(bin.count as f32);
                Bar {
                    bin: *bin,
                    rect: Rect::new(x0, top, x1 - x0, plot_height - top),
                    fill: palette_color(&self.config.palette, bin.index),
                }
            })
            .collect();

        let x_ticks = bin_set
            .tick_values()
            .into_iter()
            .map(|value| Tick {
                value,
                position: x_scale.scale(value as f32),
                label: value.to_string(),
            })
            .collect();

        let y_ticks = (0..=y_max as u64)
            .map(|value| Tick {
                value,
                position: y_scale.scale(value as f32),
                label: value.to_string(),
            })
            .collect();

        tracing::debug!(
            values = values.len(),
            bin_width,
            bins = bin_count,
            y_max,
            plot_width,
            plot_height,
            "histogram updated"
        );

        Ok(RenderDescription {
            title: input.title.clone(),
            x_label: input.x_label.clone(),
            y_label: input.y_label.clone(),
            bars,
            x_ticks,
            y_ticks,
            y_max,
            plot_width,
            plot_height,
            margins,
            x_scale,
            y_scale,
            bin_set,
            background: self.config.background,
            foreground: self.config.foreground,
            gridline: self
                .config
                .foreground
                .with_alpha((self.config.gridline_opacity * 255.0).round() as u8),
        })
    }
}
