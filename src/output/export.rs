//! Chart export to a downloadable PNG.
//!
//! The chart geometry (background, gridlines, bars, axes) is rasterized at
//! the requested size and encoded as PNG. The file is named after the chart
//! title. Text is only present in the SVG output; raster export carries no
//! glyphs.

use crate::error::{Error, Result};
use crate::framebuffer::{Framebuffer, MAX_DIMENSION};
use crate::render::Drawable;
use crate::renderer::RenderDescription;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::{Path, PathBuf};

use super::PngEncoder;

/// Filename stem used when the title is blank.
const DEFAULT_STEM: &str = "histogram";

/// Smallest luminance spread a chart with data must show after rasterizing.
const MIN_CONTRAST: f32 = 0.5;

/// A rendered PNG ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngExport {
    /// Suggested filename, `<title>.png`.
    pub filename: String,
    /// Encoded PNG bytes.
    pub bytes: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl PngExport {
    /// `data:image/png;base64,...` URI for a download link.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.bytes))
    }

    /// Write the PNG into `dir` under its suggested filename.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Download filename for a chart title.
///
/// The title is trimmed and characters that are not valid in filenames on
/// common platforms are replaced with `_`. A blank title yields
/// `histogram.png`.
#[must_use]
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        format!("{DEFAULT_STEM}.png")
    } else {
        format!("{stem}.png")
    }
}

/// Rasterizes render descriptions into PNG exports.
///
/// Without explicit dimensions the chart is exported at its own size, scaled
/// down uniformly when a side exceeds [`MAX_DIMENSION`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartExporter {
    dimensions: Option<(u32, u32)>,
}

impl ChartExporter {
    /// Exporter that renders at the chart's own size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render at a fixed target size, stretching the chart to fit.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Target size for `desc`.
    ///
    /// Explicit dimensions are used as given. Otherwise the chart's own size
    /// is used, shrunk with its aspect ratio kept so that neither side
    /// exceeds [`MAX_DIMENSION`].
    #[must_use]
    pub fn target_size(&self, desc: &RenderDescription) -> (u32, u32) {
        if let Some(dimensions) = self.dimensions {
            return dimensions;
        }

        let (width, height) = (desc.width().ceil(), desc.height().ceil());
        let longest = width.max(height);
        let limit = MAX_DIMENSION as f32;
        if longest <= limit {
            return (width as u32, height as u32);
        }

        let factor = limit / longest;
        let fit = |side: f32| ((side * factor).round() as u32).clamp(1, MAX_DIMENSION);
        (fit(width), fit(height))
    }

    /// Draw the chart into a new framebuffer at the target size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when the target size is empty or
    /// too large, and [`Error::Rendering`] when a chart with data comes out
    /// without any visible contrast (every color configured the same).
    pub fn rasterize(&self, desc: &RenderDescription) -> Result<Framebuffer> {
        let (width, height) = self.target_size(desc);
        let mut fb = Framebuffer::new(width, height)?;

        let (chart_w, chart_h) = (desc.width(), desc.height());
        if chart_w <= 0.0 || chart_h <= 0.0 {
            return Err(Error::Rendering(format!("chart has no area ({chart_w}x{chart_h})")));
        }
        let sx = width as f32 / chart_w;
        let sy = height as f32 / chart_h;

        fb.clear(desc.background);

        for line in desc.gridlines() {
            line.scaled(sx, sy).draw_blended(&mut fb, desc.gridline);
        }
        for (rect, fill) in desc.bar_rects() {
            rect.scaled(sx, sy).draw(&mut fb, fill);
        }
        for axis in desc.axis_lines() {
            axis.scaled(sx, sy).draw(&mut fb, desc.foreground);
        }

        if desc.has_data() && desc.plot_width > 0.0 && desc.plot_height > 0.0 {
            let (min, max, _) = fb.luminance_stats();
            if max - min < MIN_CONTRAST {
                return Err(Error::Rendering(format!(
                    "rasterized chart is blank (luminance {min:.1}..{max:.1})"
                )));
            }
        }

        Ok(fb)
    }

    /// Rasterize and encode the chart, naming the file after its title.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterization or PNG encoding fails.
    pub fn export_png(&self, desc: &RenderDescription) -> Result<PngExport> {
        let fb = self.rasterize(desc)?;
        let bytes = PngEncoder::to_bytes(&fb)?;
        let export = PngExport {
            filename: export_filename(&desc.title),
            bytes,
            width: fb.width(),
            height: fb.height(),
        };

        tracing::debug!(
            filename = %export.filename,
            width = export.width,
            height = export.height,
            bytes = export.bytes.len(),
            backend = ?Framebuffer::backend(),
            "chart exported"
        );
        Ok(export)
    }
}

impl batuta_common::display::WithDimensions for ChartExporter {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.dimensions = Some((width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgba, CATEGORY20};
    use crate::config::RendererConfig;
    use crate::input::HistogramInput;
    use crate::renderer::HistogramRenderer;
    use batuta_common::display::WithDimensions;

    fn describe(values: &str, title: &str) -> RenderDescription {
        let input = HistogramInput::new(values, "10").title(title);
        HistogramRenderer::default().update(&input, 300.0).unwrap()
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Exam scores"), "Exam scores.png");
        assert_eq!(export_filename("  padded  "), "padded.png");
        assert_eq!(export_filename("a/b\\c:d"), "a_b_c_d.png");
        assert_eq!(export_filename(""), "histogram.png");
        assert_eq!(export_filename("   "), "histogram.png");
    }

    #[test]
    fn test_rasterize_native_size() {
        let desc = describe("1,5,12,15,23", "Scores");
        let fb = ChartExporter::new().rasterize(&desc).unwrap();
        assert_eq!((fb.width(), fb.height()), (300, 250));

        // Inside the first bar, clear of gridlines.
        assert_eq!(fb.get_pixel(70, 150), Some(CATEGORY20[0]));
        // Margin area stays background.
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
        // X axis baseline.
        assert_eq!(fb.get_pixel(150, 210), Some(Rgba::BLACK));
    }

    #[test]
    fn test_rasterize_scaled() {
        let desc = describe("1,5,12,15,23", "Scores");
        let fb = ChartExporter::new().dimensions(600, 500).rasterize(&desc).unwrap();
        assert_eq!((fb.width(), fb.height()), (600, 500));
        assert_eq!(fb.get_pixel(140, 300), Some(CATEGORY20[0]));
    }

    #[test]
    fn test_gridlines_are_translucent() {
        let desc = describe("1,5,12,15,23", "");
        let fb = ChartExporter::new().rasterize(&desc).unwrap();
        // Vertical gridline at x = 40 + 180 (tick 30) above the empty headroom bar.
        let px = fb.get_pixel(220, 100).unwrap();
        assert!(px.r > 190 && px.r < 215, "gridline pixel {px:?}");
    }

    #[test]
    fn test_export_png() {
        let desc = describe("1,5,12,15,23", "Scores");
        let export = ChartExporter::new().export_png(&desc).unwrap();
        assert_eq!(export.filename, "Scores.png");
        assert_eq!(&export.bytes[1..4], b"PNG");
        assert!(export.data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_export_not_blank() {
        let desc = describe("1,5,12,15,23", "Scores");
        let fb = ChartExporter::new().rasterize(&desc).unwrap();
        let (min, max, _) = fb.luminance_stats();
        assert!(max - min > 100.0);
    }

    #[test]
    fn test_tall_chart_shrinks_to_fit() {
        let values = vec!["5"; 200].join(",");
        let desc = HistogramRenderer::default()
            .update(&HistogramInput::new(values, "10").title("tall"), 800.0)
            .unwrap();
        assert!(desc.height() > MAX_DIMENSION as f32);

        let exporter = ChartExporter::new();
        let (width, height) = exporter.target_size(&desc);
        assert_eq!(height, MAX_DIMENSION);
        assert!(width < 800);
        let native_ratio = desc.width() / desc.height();
        assert!((width as f32 / height as f32 - native_ratio).abs() < 1e-3);

        let export = exporter.export_png(&desc).unwrap();
        assert_eq!((export.width, export.height), (width, height));

        // Middle of the first (full height) bar.
        let fb = exporter.rasterize(&desc).unwrap();
        assert_eq!(fb.get_pixel(50, 8_000), Some(CATEGORY20[0]));
    }

    #[test]
    fn test_native_size_within_limit_is_unscaled() {
        let desc = describe("1,5,12,15,23", "Scores");
        assert_eq!(ChartExporter::new().target_size(&desc), (300, 250));
    }

    #[test]
    fn test_blank_chart_is_error() {
        let config = RendererConfig::new()
            .palette(vec![Rgba::WHITE])
            .background(Rgba::WHITE)
            .foreground(Rgba::WHITE);
        let desc = HistogramRenderer::new(config)
            .update(&HistogramInput::new("1,2,3", "1"), 300.0)
            .unwrap();
        let err = ChartExporter::new().export_png(&desc).unwrap_err();
        assert!(matches!(err, Error::Rendering(_)));
    }

    #[test]
    fn test_empty_chart_exports_without_contrast_check() {
        let desc = describe("", "");
        assert!(ChartExporter::new().export_png(&desc).is_ok());
    }

    #[test]
    fn test_export_zero_dimensions_is_error() {
        let desc = describe("1", "x");
        let err = ChartExporter::new().dimensions(0, 100).export_png(&desc).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 100 }));
    }

    #[test]
    fn test_with_dimensions_trait() {
        let desc = describe("1", "x");
        let mut exporter = ChartExporter::new();
        exporter.set_dimensions(64, 32);
        assert_eq!(exporter.target_size(&desc), (64, 32));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let export = ChartExporter::new().export_png(&describe("3,4", "Run 1")).unwrap();
        let path = export.write_to_dir(dir.path()).unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("Run 1.png"));
        assert_eq!(std::fs::read(path).unwrap(), export.bytes);
    }
}
