//! Raster canvas backend.
//!
//! Renders through the immediate-paint backend into an off-screen pixel
//! buffer at a caller-specified resolution, then encodes the buffer to the
//! raster format selected at construction time. PNG output embeds the
//! resolution as pHYs physical-density metadata; JPEG and BMP go through
//! the `image` crate. Output bytes are deterministic for identical input.

use std::io::{Cursor, Write};

use image::{GrayImage, ImageFormat, Luma};

use crate::error::{Error, Result};
use crate::model::{BarcodeDimension, Orientation, TextAlignment};

use super::canvas::{Canvas, Transform2D};
use super::glyphs;
use super::paint::{PaintCanvas, Painter};

/// Pixel format of the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 8-bit grayscale.
    #[default]
    Gray8,

    /// 8-bit RGB (gray replicated into the color channels).
    Rgb8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    fn from_mime(mime: &str) -> Result<Self> {
        match mime {
            "image/png" => Ok(OutputFormat::Png),
            "image/jpeg" => Ok(OutputFormat::Jpeg),
            "image/bmp" | "image/x-ms-bmp" => Ok(OutputFormat::Bmp),
            other => Err(Error::CanvasSetup(format!(
                "unsupported raster MIME type: {other}"
            ))),
        }
    }
}

/// Paint surface backed by an off-screen grayscale buffer.
#[derive(Debug)]
struct ImagePainter {
    buffer: Option<GrayImage>,
    /// Pixels per millimeter.
    scale: f64,
    antialias: bool,
    transform: Transform2D,
    stack: Vec<Transform2D>,
}

impl ImagePainter {
    fn new(scale: f64, antialias: bool) -> Self {
        Self {
            buffer: None,
            scale,
            antialias,
            transform: Transform2D::identity(),
            stack: Vec::new(),
        }
    }

    /// Fill an axis-aligned rectangle given in the current transform's
    /// millimeter coordinates.
    fn fill_mm_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let (ax, ay) = self.transform.apply(x, y);
        let (bx, by) = self.transform.apply(x + w, y + h);
        let (x0, x1) = (ax.min(bx) * self.scale, ax.max(bx) * self.scale);
        let (y0, y1) = (ay.min(by) * self.scale, ay.max(by) * self.scale);
        let antialias = self.antialias;

        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        let (bw, bh) = buffer.dimensions();

        if antialias {
            let px0 = x0.floor().max(0.0) as u32;
            let px1 = (x1.ceil() as u32).min(bw);
            let py0 = y0.floor().max(0.0) as u32;
            let py1 = (y1.ceil() as u32).min(bh);
            for py in py0..py1 {
                let cov_y = (y1.min(py as f64 + 1.0) - y0.max(py as f64)).clamp(0.0, 1.0);
                for px in px0..px1 {
                    let cov_x = (x1.min(px as f64 + 1.0) - x0.max(px as f64)).clamp(0.0, 1.0);
                    let ink = (cov_x * cov_y * 255.0).round() as u8;
                    let pixel = buffer.get_pixel_mut(px, py);
                    pixel.0[0] = pixel.0[0].min(255 - ink);
                }
            }
        } else {
            let px0 = x0.round().max(0.0) as u32;
            let px1 = (x1.round() as u32).min(bw);
            let py0 = y0.round().max(0.0) as u32;
            let py1 = (y1.round() as u32).min(bh);
            for py in py0..py1 {
                for px in px0..px1 {
                    buffer.put_pixel(px, py, Luma([0]));
                }
            }
        }
    }
}

impl Painter for ImagePainter {
    fn prepare(&mut self, width: f64, height: f64) -> Result<()> {
        let w = (width * self.scale).ceil() as u32;
        let h = (height * self.scale).ceil() as u32;
        if w == 0 || h == 0 {
            return Err(Error::CanvasSetup(
                "raster buffer would be empty".to_string(),
            ));
        }
        self.buffer = Some(GrayImage::from_pixel(w, h, Luma([255])));
        Ok(())
    }

    fn push_transform(&mut self, transform: &Transform2D) {
        self.stack.push(self.transform);
        self.transform = *transform;
    }

    fn pop_transform(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.transform = previous;
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.fill_mm_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let line = 1.0 / self.scale;
        self.fill_mm_rect(x, y, w, line);
        self.fill_mm_rect(x, y + h - line, w, line);
        self.fill_mm_rect(x, y, line, h);
        self.fill_mm_rect(x + w - line, y, line, h);
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, baseline: f64, _font_name: &str, font_size: f64) {
        let Some(rows) = glyphs::glyph_rows(glyph) else {
            return;
        };
        let dot = font_size / (glyphs::GLYPH_HEIGHT as f64 + 3.0);
        let top = baseline - dot * glyphs::GLYPH_HEIGHT as f64;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..glyphs::GLYPH_WIDTH {
                if bits & (0x10 >> col) != 0 {
                    self.fill_mm_rect(
                        x + col as f64 * dot,
                        top + row as f64 * dot,
                        dot,
                        dot,
                    );
                }
            }
        }
    }
}

/// Canvas backend producing an encoded raster image.
///
/// Output format, resolution, pixel format, and antialiasing are fixed at
/// construction time, not at generation time.
#[derive(Debug)]
pub struct BitmapCanvas {
    paint: PaintCanvas<ImagePainter>,
    format: OutputFormat,
    pixel_format: PixelFormat,
    dpi: f64,
}

impl BitmapCanvas {
    /// Create a raster canvas for the given MIME type and resolution.
    pub fn new(mime: &str, dpi: f64) -> Result<Self> {
        if dpi <= 0.0 {
            return Err(Error::CanvasSetup("dpi must be positive".to_string()));
        }
        Ok(Self {
            paint: PaintCanvas::new(ImagePainter::new(dpi / 25.4, true)),
            format: OutputFormat::from_mime(mime)?,
            pixel_format: PixelFormat::Gray8,
            dpi,
        })
    }

    /// Set the output pixel format.
    pub fn with_pixel_format(mut self, format: PixelFormat) -> Self {
        self.pixel_format = format;
        self
    }

    /// Enable or disable edge antialiasing (a bilevel rendition when
    /// disabled).
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.paint.painter_mut().antialias = antialias;
        self
    }

    /// The rendered pixel buffer. `None` before a symbol was generated.
    pub fn pixels(&self) -> Option<&GrayImage> {
        self.paint.painter().buffer.as_ref()
    }

    /// Encode the rendered buffer to the output sink.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        let buffer = self.pixels().ok_or_else(|| {
            Error::CanvasSetup("no symbol has been generated yet".to_string())
        })?;

        match self.format {
            OutputFormat::Png => self.write_png(buffer, sink),
            OutputFormat::Jpeg => self.write_via_image(buffer, sink, ImageFormat::Jpeg),
            OutputFormat::Bmp => self.write_via_image(buffer, sink, ImageFormat::Bmp),
        }
    }

    /// Encode the rendered buffer into a byte vector.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    fn write_png<W: Write>(&self, buffer: &GrayImage, sink: &mut W) -> Result<()> {
        let (w, h) = buffer.dimensions();
        let mut encoder = png::Encoder::new(sink, w, h);
        encoder.set_depth(png::BitDepth::Eight);
        match self.pixel_format {
            PixelFormat::Gray8 => encoder.set_color(png::ColorType::Grayscale),
            PixelFormat::Rgb8 => encoder.set_color(png::ColorType::Rgb),
        }
        // Physical density: dots per meter.
        let ppm = (self.dpi * 1000.0 / 25.4).round() as u32;
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        match self.pixel_format {
            PixelFormat::Gray8 => writer.write_image_data(buffer.as_raw())?,
            PixelFormat::Rgb8 => {
                let rgb: Vec<u8> = buffer
                    .as_raw()
                    .iter()
                    .flat_map(|v| [*v, *v, *v])
                    .collect();
                writer.write_image_data(&rgb)?;
            }
        }
        Ok(())
    }

    fn write_via_image<W: Write>(
        &self,
        buffer: &GrayImage,
        sink: &mut W,
        format: ImageFormat,
    ) -> Result<()> {
        let mut encoded = Cursor::new(Vec::new());
        match self.pixel_format {
            PixelFormat::Gray8 => buffer.write_to(&mut encoded, format)?,
            PixelFormat::Rgb8 => {
                let rgb = image::DynamicImage::ImageLuma8(buffer.clone()).into_rgb8();
                rgb.write_to(&mut encoded, format)?;
            }
        }
        sink.write_all(encoded.get_ref())?;
        Ok(())
    }
}

impl Canvas for BitmapCanvas {
    fn establish_dimensions(
        &mut self,
        dim: &BarcodeDimension,
        orientation: Orientation,
    ) -> Result<()> {
        self.paint.establish_dimensions(dim, orientation)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.paint.fill_rect(x, y, w, h)
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.paint.draw_rect(x, y, w, h)
    }

    fn draw_text(
        &mut self,
        text: &str,
        x1: f64,
        x2: f64,
        y: f64,
        font_name: &str,
        font_size: f64,
        align: TextAlignment,
    ) -> Result<()> {
        self.paint
            .draw_text(text, x1, x2, y, font_name, font_size, align)
    }
}
