//! # Trueno-Histogram
//!
//! Core of an interactive histogram widget: text inputs for a title, axis
//! labels, a comma-separated list of integer values and a bin width go in;
//! bars, ticks and labels come out, ready to be drawn as SVG or exported as a
//! PNG download.
//!
//! ## Features
//!
//! - **Pure**: every [`HistogramRenderer::update`](renderer::HistogramRenderer::update)
//!   pass is a function of its input snapshot and container width
//! - **Forgiving input**: malformed value tokens are dropped, not reported
//! - **Explicit bin width policy**: reject or clamp, never undefined math
//! - **Multiple outputs**: SVG markup and PNG (bytes, file or `data:` URI)
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_histogram::prelude::*;
//!
//! let input = HistogramInput::new("1,5,12,15,23", "10").title("Scores");
//! let desc = HistogramRenderer::default().update(&input, 300.0)?;
//! assert_eq!(desc.bars.len(), 4);
//! assert_eq!(desc.y_max, 3);
//!
//! let svg = SvgEncoder::from_description(&desc).render();
//! assert!(svg.contains("Scores"));
//!
//! let png = ChartExporter::new().export_png(&desc)?;
//! assert_eq!(png.filename, "Scores.png");
//! # Ok::<(), trueno_histogram::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: (de)serializable [`RendererConfig`](config::RendererConfig)
//! - `wasm`: wasm-bindgen widget for browser pages

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and the categorical palette.
pub mod color;

/// Renderer configuration.
pub mod config;

/// Geometric primitives (points, lines, rectangles).
pub mod geometry;

/// Scale functions for data-to-pixel mappings.
pub mod scale;

// ============================================================================
// Histogram Modules
// ============================================================================

/// Fixed-width binning.
pub mod bins;

/// Widget input snapshot and parsing.
pub mod input;

/// The update pass producing render descriptions.
pub mod renderer;

// ============================================================================
// Rendering Modules
// ============================================================================

/// RGBA framebuffer for raster export.
pub mod framebuffer;

/// Rasterization primitives.
pub mod render;

/// Output encoders (SVG, PNG) and export.
pub mod output;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-histogram operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types for convenient imports.
///
/// ```rust
/// use trueno_histogram::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bins::{Bin, BinSet};
    pub use crate::color::{Rgba, CATEGORY20};
    pub use crate::config::{BinWidthPolicy, Margins, RendererConfig};
    pub use crate::error::{Error, Result};
    pub use crate::input::HistogramInput;
    pub use crate::output::{ChartExporter, PngExport, SvgEncoder};
    pub use crate::renderer::{Bar, HistogramRenderer, RenderDescription, Tick};
    pub use batuta_common::display::WithDimensions;
}
