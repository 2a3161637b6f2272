//! SVG output encoder.
//!
//! Builds the chart markup the browser displays: gridlines, bars, axes,
//! tick labels, title and axis labels.

use crate::color::Rgba;
use crate::error::Result;
use crate::renderer::RenderDescription;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const TITLE_FONT_SIZE: f32 = 16.0;
const LABEL_FONT_SIZE: f32 = 12.0;
const TICK_FONT_SIZE: f32 = 10.0;

/// SVG encoder for vector chart output.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: u32,
    /// SVG height
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
enum SvgElement {
    /// Rectangle
    Rect { x: f32, y: f32, width: f32, height: f32, fill: Rgba },
    /// Line
    Line { x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32 },
    /// Text, optionally rotated (degrees) around its anchor point
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: f32,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, background: Some(Rgba::WHITE), elements: Vec::new() }
    }

    /// Lay out a complete histogram chart.
    #[must_use]
    pub fn from_description(desc: &RenderDescription) -> Self {
        let width = desc.width().ceil() as u32;
        let height = desc.height().ceil() as u32;
        let (left, top) = (desc.margins.left, desc.margins.top);
        let bottom = top + desc.plot_height;
        let fg = desc.foreground;

        let mut svg = Self::new(width, height).background(Some(desc.background));

        for line in desc.gridlines() {
            svg = svg.line(line.start.x, line.start.y, line.end.x, line.end.y, desc.gridline, 1.0);
        }

        for (rect, fill) in desc.bar_rects() {
            svg = svg.rect(rect.x, rect.y, rect.width, rect.height, fill);
        }

        for axis in desc.axis_lines() {
            svg = svg.line(axis.start.x, axis.start.y, axis.end.x, axis.end.y, fg, 1.0);
        }

        for tick in &desc.x_ticks {
            svg = svg.text_anchored(
                left + tick.position,
                bottom + 6.0 + TICK_FONT_SIZE,
                &tick.label,
                TICK_FONT_SIZE,
                fg,
                TextAnchor::Middle,
            );
        }
        for tick in &desc.y_ticks {
            svg = svg.text_anchored(
                left - 6.0,
                top + tick.position + TICK_FONT_SIZE / 3.0,
                &tick.label,
                TICK_FONT_SIZE,
                fg,
                TextAnchor::End,
            );
        }

        let center_x = left + desc.plot_width / 2.0;
        let title_y = top / 2.0 + TITLE_FONT_SIZE / 3.0;
        let x_label_y = height as f32 - 6.0;
        let y_label_y = top + desc.plot_height / 2.0;
        let middle = TextAnchor::Middle;
        svg.text_anchored(center_x, title_y, &desc.title, TITLE_FONT_SIZE, fg, middle)
            .text_anchored(center_x, x_label_y, &desc.x_label, LABEL_FONT_SIZE, fg, middle)
            .text_rotated(LABEL_FONT_SIZE, y_label_y, &desc.y_label, LABEL_FONT_SIZE, fg, -90.0)
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a rectangle.
    #[must_use]
    pub fn rect(mut self, x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Rect { x, y, width, height, fill });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(
        mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    ) -> Self {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text_anchored(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: 0.0,
        });
        self
    }

    /// Add centered text rotated by `degrees` around its position.
    #[must_use]
    pub fn text_rotated(
        mut self,
        x: f32,
        y: f32,
        text: &str,
        font_size: f32,
        fill: Rgba,
        degrees: f32,
    ) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor: TextAnchor::Middle,
            rotate: degrees,
        });
        self
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters in text content.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Convert an SVG element to its string representation.
fn element_to_svg(element: &SvgElement) -> String {
    let mut out = String::with_capacity(128);
    match element {
        SvgElement::Rect { x, y, width, height, fill } => {
            let _ = write!(out, r#"<rect x="{x}" y="{y}" width="{width}" height="{height}""#);
            let _ = write!(out, r#" fill="{}"/>"#, fill.to_css());
        }
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => {
            let _ = write!(out, r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}""#);
            let _ = write!(out, r#" stroke="{}" stroke-width="{stroke_width}"/>"#, stroke.to_css());
        }
        SvgElement::Text { x, y, text, font_size, fill, anchor, rotate } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = write!(out, r#"<text x="{x}" y="{y}" font-size="{font_size}""#);
            let _ = write!(out, r#" fill="{}" text-anchor="{anchor}""#, fill.to_css());
            out.push_str(r#" font-family="sans-serif""#);
            if rotate.abs() > f32::EPSILON {
                let _ = write!(out, r#" transform="rotate({rotate} {x} {y})""#);
            }
            let _ = write!(out, ">{}</text>", escape_xml(text));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::HistogramInput;
    use crate::renderer::HistogramRenderer;

    fn chart(values: &str, title: &str) -> String {
        let input =
            HistogramInput::new(values, "10").title(title).x_label("value").y_label("count");
        let desc = HistogramRenderer::default().update(&input, 300.0).unwrap();
        SvgEncoder::from_description(&desc).render()
    }

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_svg_rect() {
        let svg =
            SvgEncoder::new(100, 100).rect(10.0, 20.0, 30.0, 40.0, Rgba::rgb(255, 0, 0)).render();
        let expected = r#"<rect x="10" y="20" width="30" height="40" fill="rgb(255,0,0)"/>"#;
        assert!(svg.contains(expected));
    }

    #[test]
    fn test_svg_line() {
        let svg = SvgEncoder::new(100, 100).line(0.0, 0.0, 100.0, 100.0, Rgba::BLACK, 2.0).render();
        assert!(svg.contains("<line"));
        assert!(svg.contains("x2=\"100\""));
        assert!(svg.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_svg_text_escaping() {
        let svg = SvgEncoder::new(100, 100)
            .text_anchored(
                10.0,
                50.0,
                "<script>A & B</script>",
                12.0,
                Rgba::BLACK,
                TextAnchor::Start,
            )
            .render();
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("&lt;script&gt;A &amp; B"));
    }

    #[test]
    fn test_svg_rotated_text() {
        let svg = SvgEncoder::new(100, 100)
            .text_rotated(12.0, 50.0, "count", 12.0, Rgba::BLACK, -90.0)
            .render();
        assert!(svg.contains(r#"transform="rotate(-90 12 50)""#));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_svg_transparent_background() {
        let svg = SvgEncoder::new(100, 100).background(None).render();
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn test_chart_structure() {
        let svg = chart("1,5,12,15,23", "Scores");
        // background + 4 bars
        assert_eq!(svg.matches("<rect").count(), 5);
        // 5 x gridlines + 4 y gridlines + 2 axes
        assert_eq!(svg.matches("<line").count(), 11);
        assert!(svg.contains(">Scores</text>"));
        assert!(svg.contains(">value</text>"));
        assert!(svg.contains(">count</text>"));
        assert!(svg.contains("rgba(0,0,0,0.200)"));
        assert!(svg.contains(r#"width="300" height="250""#));
    }

    #[test]
    fn test_chart_bar_colors() {
        let svg = chart("1,5,12,15,23", "");
        assert!(svg.contains("fill=\"rgb(31,119,180)\""));
        assert!(svg.contains("fill=\"rgb(174,199,232)\""));
    }

    #[test]
    fn test_empty_chart_renders() {
        let svg = chart("", "Empty");
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(r#"height="370""#));
    }

    #[test]
    fn test_svg_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        SvgEncoder::new(100, 100)
            .rect(10.0, 10.0, 80.0, 80.0, Rgba::BLACK)
            .write_to_file(&path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
        assert!(content.ends_with("</svg>\n"));
    }
}
