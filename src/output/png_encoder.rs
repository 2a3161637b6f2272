//! PNG encoding of framebuffers via the pure-Rust `png` crate.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Encodes a [`Framebuffer`] as 8-bit RGBA PNG.
pub struct PngEncoder;

impl PngEncoder {
    /// Stream the image into `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PngEncoding`](crate::Error::PngEncoding) or an I/O
    /// error from the sink.
    pub fn encode<W: Write>(fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut stream = encoder.write_header()?;
        stream.write_image_data(fb.as_bytes())?;
        stream.finish()?;
        Ok(())
    }

    /// Save the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        Self::encode(fb, BufWriter::new(File::create(path)?))
    }

    /// Encoded PNG file contents.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(fb.as_bytes().len() / 4);
        Self::encode(fb, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let mut reader = png::Decoder::new(bytes).read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_signature() {
        let fb = Framebuffer::new(3, 3).unwrap();
        assert_eq!(PngEncoder::to_bytes(&fb).unwrap()[..8], SIGNATURE);
    }

    #[test]
    fn test_pixels_survive_encoding() {
        let mut fb = Framebuffer::new(37, 5).unwrap();
        fb.clear(Rgba::WHITE);
        fb.fill_rect(10, 1, 5, 2, Rgba::rgb(31, 119, 180));

        let (info, pixels) = decode(&PngEncoder::to_bytes(&fb).unwrap());
        assert_eq!((info.width, info.height), (37, 5));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(pixels, fb.as_bytes());
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let fb = Framebuffer::new(4, 4).unwrap();
        PngEncoder::write_to_file(&fb, &path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap()[..8], SIGNATURE);
    }
}
