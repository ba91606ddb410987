//! # unibar
//!
//! Barcode generation library for Rust.
//!
//! This library encodes messages into 1D and postal barcode symbologies and
//! renders them to vector (SVG, EPS) or raster (PNG, JPEG, BMP) output.
//!
//! ## Quick Start
//!
//! ```
//! use unibar::{Configuration, to_svg};
//!
//! fn main() -> unibar::Result<()> {
//!     let cfg = Configuration::new("code39");
//!     let svg = to_svg("code39", &cfg, "HELLO")?;
//!     println!("{}", svg);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Multiple symbologies**: Code 39, Codabar, Interleaved 2 of 5,
//!   POSTNET, Royal Mail CBC, Aztec (with a pluggable matrix encoder)
//! - **Multiple output formats**: SVG, EPS, PNG, JPEG, BMP
//! - **Checksum handling**: add, verify, or ignore per symbology
//! - **Configurable appearance**: module width, bar height, quiet zone,
//!   human-readable text placement and alignment, orientation
//! - **Extensible**: implement [`Canvas`] or [`Painter`] for custom output
//!   surfaces

pub mod config;
pub mod error;
pub mod model;
pub mod registry;
pub mod render;
pub mod symbology;

// Re-export commonly used types
pub use config::Configuration;
pub use error::{Error, Result};
pub use model::{
    BarcodeDimension, BaselineAlignment, ChecksumMode, EventBuffer, EventStream, HeightClass,
    HumanReadablePlacement, Orientation, SymbolEvent, TextAlignment,
};
pub use registry::BarcodeGenerator;
pub use render::{
    BitmapCanvas, Canvas, EpsCanvas, PaintCanvas, Painter, PixelFormat, SvgCanvas, SvgElement,
};
pub use symbology::{EncodedSymbol, MatrixEncoder, SymbolOptions, SymbolShape, Symbology};

use std::io::Write;

/// Generate a barcode as an SVG document string.
///
/// The symbology is selected by `name`; appearance is read from `cfg`.
pub fn to_svg(name: &str, cfg: &Configuration, message: &str) -> Result<String> {
    let generator = registry::create(name, cfg).map(BarcodeGenerator::new)?;
    let mut canvas = SvgCanvas::new();
    generator.generate(&mut canvas, message)?;
    canvas.to_xml()
}

/// Generate a barcode as an EPS document, written to `sink`.
///
/// The stream is finished and flushed even when generation fails, so the
/// caller gets a cleanly released resource either way.
pub fn to_eps<W: Write>(name: &str, cfg: &Configuration, message: &str, sink: W) -> Result<()> {
    let generator = registry::create(name, cfg).map(BarcodeGenerator::new)?;
    let mut canvas = EpsCanvas::new(sink);
    let outcome = generator.generate(&mut canvas, message);
    let finished = canvas.finish();
    outcome.and(finished)
}

/// Generate a barcode as a PNG image at the given resolution.
pub fn to_png(name: &str, cfg: &Configuration, message: &str, dpi: f64) -> Result<Vec<u8>> {
    let generator = registry::create(name, cfg).map(BarcodeGenerator::new)?;
    let mut canvas = BitmapCanvas::new("image/png", dpi)?;
    generator.generate(&mut canvas, message)?;
    canvas.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_svg_produces_document() {
        let cfg = Configuration::new("code39");
        let svg = to_svg("code39", &cfg, "UNIBAR").unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox"));
    }

    #[test]
    fn test_to_eps_produces_document() {
        let cfg = Configuration::new("postnet");
        let mut out = Vec::new();
        to_eps("postnet", &cfg, "80202", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
        assert!(text.ends_with("%%EOF\n"));
    }

    /// Writer with a fixed byte budget so generation fails partway through
    /// the bar primitives.
    struct ShortWriter {
        bytes: Vec<u8>,
        capacity: usize,
        flushed: bool,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.bytes.len() + buf.len() > self.capacity {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "sink full",
                ));
            }
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed = true;
            Ok(())
        }
    }

    #[test]
    fn test_to_eps_flushes_stream_on_error() {
        let cfg = Configuration::new("postnet");
        let mut sink = ShortWriter {
            bytes: Vec::new(),
            capacity: 300,
            flushed: false,
        };
        assert!(to_eps("postnet", &cfg, "80202", &mut sink).is_err());
        assert!(sink.flushed);
        assert!(String::from_utf8(sink.bytes).unwrap().starts_with("%!PS"));
    }

    #[test]
    fn test_to_png_produces_signature() {
        let cfg = Configuration::new("intl2of5");
        let png = to_png("intl2of5", &cfg, "12345", 150.0).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}
