//! WebAssembly bindings for the histogram widget.
//!
//! The host page keeps its own form fields and event listeners and calls
//! [`HistogramWidget::update`] whenever a field changes or the container is
//! resized. Debouncing is up to the page.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { HistogramWidget, WidgetOptions } from 'trueno-histogram';
//!
//! await init();
//! const widget = new HistogramWidget(new WidgetOptions().binWidthPolicy('clamp'));
//!
//! const redraw = () => {
//!     chart.innerHTML = widget.update(
//!         title.value, xAxis.value, yAxis.value, values.value, bin.value,
//!         container.clientWidth,
//!     );
//! };
//! for (const el of [title, xAxis, yAxis, values, bin]) el.addEventListener('input', redraw);
//! window.addEventListener('resize', redraw);
//!
//! download.onclick = () => {
//!     const a = document.createElement('a');
//!     a.href = widget.exportDataUri();
//!     a.download = widget.exportFilename();
//!     a.click();
//! };
//! ```

use wasm_bindgen::prelude::*;

use crate::color::Rgba;
use crate::config::{BinWidthPolicy, Margins, RendererConfig};
use crate::input::HistogramInput;
use crate::output::{ChartExporter, PngExport, SvgEncoder};
use crate::renderer::{HistogramRenderer, RenderDescription};

// ============================================================================
// Options
// ============================================================================

/// Options for the widget.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    margins: Margins,
    fallback_height: f32,
    policy: BinWidthPolicy,
    background: String,
    foreground: String,
}

#[wasm_bindgen]
impl WidgetOptions {
    /// Create default widget options.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            margins: Margins::default(),
            fallback_height: 300.0,
            policy: BinWidthPolicy::Reject,
            background: "#FFFFFF".to_string(),
            foreground: "#000000".to_string(),
        }
    }

    /// Set the plot margins in pixels.
    #[wasm_bindgen]
    pub fn margins(mut self, top: f32, right: f32, bottom: f32, left: f32) -> Self {
        self.margins = Margins::new(top, right, bottom, left);
        self
    }

    /// Set the plot height used before any values are entered.
    #[wasm_bindgen(js_name = fallbackHeight)]
    pub fn fallback_height(mut self, height: f32) -> Self {
        self.fallback_height = height;
        self
    }

    /// Invalid bin width handling: `"reject"` (default) or `"clamp"`.
    #[wasm_bindgen(js_name = binWidthPolicy)]
    pub fn bin_width_policy(mut self, policy: &str) -> Self {
        self.policy = parse_policy(policy);
        self
    }

    /// Set the background color (hex format: #RRGGBB).
    #[wasm_bindgen]
    pub fn background(mut self, bg: &str) -> Self {
        self.background = bg.to_string();
        self
    }

    /// Set the axis and text color (hex format: #RRGGBB).
    #[wasm_bindgen]
    pub fn foreground(mut self, fg: &str) -> Self {
        self.foreground = fg.to_string();
        self
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetOptions {
    fn to_config(&self) -> RendererConfig {
        RendererConfig::new()
            .margins(self.margins)
            .fallback_height(self.fallback_height)
            .bin_width_policy(self.policy)
            .background(Rgba::from_hex(&self.background).unwrap_or(Rgba::WHITE))
            .foreground(Rgba::from_hex(&self.foreground).unwrap_or(Rgba::BLACK))
    }
}

fn parse_policy(policy: &str) -> BinWidthPolicy {
    match policy.trim().to_ascii_lowercase().as_str() {
        "clamp" | "clamp_to_one" | "clamptoone" => BinWidthPolicy::ClampToOne,
        _ => BinWidthPolicy::Reject,
    }
}

fn to_js(err: crate::Error) -> JsValue {
    let msg = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&msg));
    JsValue::from_str(&msg)
}

// ============================================================================
// Widget
// ============================================================================

/// A histogram widget bound to a host page.
///
/// Remembers the last successful render so export always matches what is
/// on screen.
#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct HistogramWidget {
    renderer: HistogramRenderer,
    last: Option<RenderDescription>,
}

#[wasm_bindgen]
impl HistogramWidget {
    /// Create a widget.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<WidgetOptions>) -> Self {
        let config = options.unwrap_or_default().to_config();
        Self { renderer: HistogramRenderer::new(config), last: None }
    }

    /// Recompute the chart and return its SVG markup.
    ///
    /// On error the previous render is kept and the error message is thrown.
    #[wasm_bindgen]
    pub fn update(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        values: &str,
        bin_width: &str,
        container_width: f32,
    ) -> Result<String, JsValue> {
        let input = HistogramInput::new(values, bin_width)
            .title(title)
            .x_label(x_label)
            .y_label(y_label);
        let desc = self.renderer.update(&input, container_width).map_err(to_js)?;
        let svg = SvgEncoder::from_description(&desc).render();
        self.last = Some(desc);
        Ok(svg)
    }

    /// Height of the last rendered chart, including margins.
    #[wasm_bindgen(js_name = chartHeight)]
    pub fn chart_height(&self) -> f32 {
        self.last.as_ref().map_or(0.0, RenderDescription::height)
    }

    /// Number of bars in the last rendered chart.
    #[wasm_bindgen(js_name = barCount)]
    pub fn bar_count(&self) -> usize {
        self.last.as_ref().map_or(0, |desc| desc.bars.len())
    }

    /// Suggested download filename for the last rendered chart.
    #[wasm_bindgen(js_name = exportFilename)]
    pub fn export_filename(&self) -> Option<String> {
        self.last.as_ref().map(|desc| crate::output::export_filename(&desc.title))
    }

    /// PNG bytes of the last rendered chart, optionally at a fixed size.
    #[wasm_bindgen(js_name = exportPng)]
    pub fn export_png(
        &self,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<js_sys::Uint8Array, JsValue> {
        let export = self.export(width, height)?;
        Ok(js_sys::Uint8Array::from(export.bytes.as_slice()))
    }

    /// `data:` URI of the last rendered chart as PNG.
    #[wasm_bindgen(js_name = exportDataUri)]
    pub fn export_data_uri(
        &self,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<String, JsValue> {
        Ok(self.export(width, height)?.data_uri())
    }
}

impl HistogramWidget {
    fn export(&self, width: Option<u32>, height: Option<u32>) -> Result<PngExport, JsValue> {
        let desc = self.last.as_ref().ok_or_else(|| JsValue::from_str("nothing rendered yet"))?;
        let exporter = match (width, height) {
            (Some(w), Some(h)) => ChartExporter::new().dimensions(w, h),
            _ => ChartExporter::new(),
        };
        exporter.export_png(desc).map_err(to_js)
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_policy() {
        assert_eq!(parse_policy("clamp"), BinWidthPolicy::ClampToOne);
        assert_eq!(parse_policy(" Clamp_To_One "), BinWidthPolicy::ClampToOne);
        assert_eq!(parse_policy("reject"), BinWidthPolicy::Reject);
        assert_eq!(parse_policy("whatever"), BinWidthPolicy::Reject);
    }

    #[test]
    fn test_options_to_config() {
        let config = WidgetOptions::new()
            .margins(1.0, 2.0, 3.0, 4.0)
            .fallback_height(120.0)
            .bin_width_policy("clamp")
            .background("#000000")
            .foreground("not a color")
            .to_config();
        assert_eq!(config.margins, Margins::new(1.0, 2.0, 3.0, 4.0));
        assert!((config.fallback_height - 120.0).abs() < f32::EPSILON);
        assert_eq!(config.bin_width_policy, BinWidthPolicy::ClampToOne);
        assert_eq!(config.background, Rgba::BLACK);
        assert_eq!(config.foreground, Rgba::BLACK);
    }

    #[test]
    fn test_widget_update_and_export() {
        let mut widget = HistogramWidget::new(None);
        assert_eq!(widget.export_filename(), None);

        let svg = widget.update("Scores", "value", "count", "1,5,12,15,23", "10", 300.0).unwrap();
        assert!(svg.starts_with("<svg"));
        assert_eq!(widget.bar_count(), 4);
        assert!((widget.chart_height() - 250.0).abs() < 1e-3);
        assert_eq!(widget.export_filename().as_deref(), Some("Scores.png"));
        assert!(widget.export(None, None).is_ok());
    }

    #[test]
    fn test_widget_exports_tall_chart() {
        let mut widget = HistogramWidget::new(None);
        let values = vec!["5"; 200].join(",");
        widget.update("tall", "", "", &values, "10", 800.0).unwrap();
        assert!(widget.chart_height() > crate::framebuffer::MAX_DIMENSION as f32);

        let export = widget.export(None, None).unwrap();
        assert_eq!(export.height, crate::framebuffer::MAX_DIMENSION);
    }
}
