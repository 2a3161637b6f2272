//! Output encoders (SVG, PNG) and chart export.

mod export;
mod png_encoder;
mod svg;

pub use export::{export_filename, ChartExporter, PngExport};
pub use png_encoder::PngEncoder;
pub use svg::{SvgEncoder, TextAnchor};
