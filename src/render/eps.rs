//! EPS (Encapsulated PostScript) stream canvas backend.
//!
//! Primitives are written as textual drawing commands directly to the
//! caller-supplied byte stream. The header goes out when dimensions are
//! established; [`EpsCanvas::finish`] writes the trailer and flushes, and
//! must be called even after a failed generation so the stream resource is
//! released cleanly.

use std::io::Write;

use crate::error::{Error, Result};
use crate::model::{BarcodeDimension, Orientation, TextAlignment};

use super::canvas::Canvas;
use super::text;

const MM_TO_PT: f64 = 72.0 / 25.4;

/// Canvas backend writing EPS commands to a byte stream.
pub struct EpsCanvas<W: Write> {
    writer: W,
    started: bool,
    finished: bool,
}

impl<W: Write> EpsCanvas<W> {
    /// Create a canvas writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            started: false,
            finished: false,
        }
    }

    /// Write the trailer and flush the stream.
    ///
    /// Idempotent: calling it again (e.g. from error-path cleanup) only
    /// flushes. The flush happens even when the trailer cannot be written.
    pub fn finish(&mut self) -> Result<()> {
        let trailer = if self.started && !self.finished {
            self.finished = true;
            self.write_trailer()
        } else {
            Ok(())
        };
        let flushed = self.writer.flush();
        trailer?;
        flushed?;
        Ok(())
    }

    fn write_trailer(&mut self) -> Result<()> {
        writeln!(self.writer, "grestore")?;
        writeln!(self.writer, "showpage")?;
        writeln!(self.writer, "%%EOF")?;
        Ok(())
    }

    /// Consume the canvas and hand the stream back.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn require_started(&mut self) -> Result<&mut W> {
        if !self.started {
            return Err(Error::CanvasSetup(
                "drawing primitive before establish_dimensions".to_string(),
            ));
        }
        Ok(&mut self.writer)
    }
}

impl<W: Write> Canvas for EpsCanvas<W> {
    fn establish_dimensions(
        &mut self,
        dim: &BarcodeDimension,
        orientation: Orientation,
    ) -> Result<()> {
        let frame_w = dim.width_plus_quiet_for(orientation);
        let frame_h = dim.height_plus_quiet_for(orientation);
        let bb_w = (frame_w * MM_TO_PT).ceil() as i64;
        let bb_h = (frame_h * MM_TO_PT).ceil() as i64;

        writeln!(self.writer, "%!PS-Adobe-3.0 EPSF-3.0")?;
        writeln!(self.writer, "%%Creator: unibar")?;
        writeln!(self.writer, "%%BoundingBox: 0 0 {bb_w} {bb_h}")?;
        writeln!(self.writer, "%%LanguageLevel: 2")?;
        writeln!(self.writer, "%%EndComments")?;
        writeln!(self.writer, "gsave")?;
        // Work in millimeters with the y axis pointing down.
        writeln!(self.writer, "72 25.4 div dup scale")?;
        writeln!(self.writer, "0 {frame_h} translate 1 -1 scale")?;

        let w = dim.width_plus_quiet;
        let h = dim.height_plus_quiet;
        match orientation {
            Orientation::Deg0 => {}
            Orientation::Deg90 => writeln!(self.writer, "0 {w} translate -90 rotate")?,
            Orientation::Deg180 => writeln!(self.writer, "{w} {h} translate 180 rotate")?,
            Orientation::Deg270 => writeln!(self.writer, "{h} 0 translate 90 rotate")?,
        }

        self.started = true;
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let writer = self.require_started()?;
        writeln!(writer, "{x} {y} {w} {h} rectfill")?;
        Ok(())
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        let writer = self.require_started()?;
        writeln!(writer, "{x} {y} {w} {h} rectstroke")?;
        Ok(())
    }

    fn draw_text(
        &mut self,
        content: &str,
        x1: f64,
        x2: f64,
        y: f64,
        font_name: &str,
        font_size: f64,
        align: TextAlignment,
    ) -> Result<()> {
        // A name literal ends at whitespace or a delimiter, so such font
        // names cannot be expressed as /name tokens.
        if font_name
            .chars()
            .any(|c| c.is_whitespace() || "()<>[]{}/%".contains(c))
        {
            return Err(Error::CanvasSetup(format!(
                "font name {font_name:?} is not a valid PostScript name"
            )));
        }

        let advances = vec![text::nominal_advance(font_size); content.chars().count()];
        let positions = text::glyph_positions(&advances, x1, x2, align);

        let writer = self.require_started()?;
        writeln!(writer, "/{font_name} findfont {font_size} scalefont setfont")?;
        for (c, x) in content.chars().zip(positions) {
            let glyph = match c {
                '(' => "\\(".to_string(),
                ')' => "\\)".to_string(),
                '\\' => "\\\\".to_string(),
                other => other.to_string(),
            };
            // Text is drawn in a locally restored (y-up) frame so glyphs
            // are not mirrored by the global flip.
            writeln!(writer, "gsave 1 -1 scale {x} {} moveto ({glyph}) show grestore", -y)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_trailer() {
        let mut canvas = EpsCanvas::new(Vec::new());
        canvas
            .establish_dimensions(&BarcodeDimension::new(25.4, 12.7), Orientation::Deg0)
            .unwrap();
        canvas.fill_rect(0.0, 0.0, 1.0, 12.7).unwrap();
        canvas.finish().unwrap();

        let output = String::from_utf8(canvas.into_inner()).unwrap();
        assert!(output.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
        assert!(output.contains("%%BoundingBox: 0 0 72 36"));
        assert!(output.contains("rectfill"));
        assert!(output.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn test_finish_is_idempotent() {
        let mut canvas = EpsCanvas::new(Vec::new());
        canvas
            .establish_dimensions(&BarcodeDimension::new(10.0, 10.0), Orientation::Deg0)
            .unwrap();
        canvas.finish().unwrap();
        canvas.finish().unwrap();

        let output = String::from_utf8(canvas.into_inner()).unwrap();
        assert_eq!(output.matches("%%EOF").count(), 1);
    }

    #[test]
    fn test_rotated_bounding_box_swaps_extents() {
        let mut canvas = EpsCanvas::new(Vec::new());
        canvas
            .establish_dimensions(&BarcodeDimension::new(25.4, 12.7), Orientation::Deg90)
            .unwrap();
        let output = String::from_utf8(canvas.into_inner()).unwrap();
        assert!(output.contains("%%BoundingBox: 0 0 36 72"));
        assert!(output.contains("-90 rotate"));
    }

    #[test]
    fn test_font_name_with_space_rejected() {
        let mut canvas = EpsCanvas::new(Vec::new());
        canvas
            .establish_dimensions(&BarcodeDimension::new(25.4, 12.7), Orientation::Deg0)
            .unwrap();
        let err = canvas
            .draw_text("123", 0.0, 25.4, 11.0, "Courier New", 2.8, TextAlignment::Center)
            .unwrap_err();
        assert!(matches!(err, Error::CanvasSetup(_)));

        canvas
            .draw_text("123", 0.0, 25.4, 11.0, "Courier", 2.8, TextAlignment::Center)
            .unwrap();
        let output = String::from_utf8(canvas.into_inner()).unwrap();
        assert!(output.contains("/Courier findfont"));
    }

    #[test]
    fn test_primitive_before_establish_fails() {
        let mut canvas = EpsCanvas::new(Vec::new());
        assert!(canvas.fill_rect(0.0, 0.0, 1.0, 1.0).is_err());
    }

    /// Writer that starts rejecting writes once `fail` is set, while still
    /// recording whether flush was requested.
    struct FaultyWriter {
        fail: std::rc::Rc<std::cell::Cell<bool>>,
        flushed: std::rc::Rc<std::cell::Cell<bool>>,
    }

    impl Write for FaultyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.fail.get() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "sink full",
                ));
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            self.flushed.set(true);
            Ok(())
        }
    }

    #[test]
    fn test_finish_flushes_after_write_failure() {
        let fail = std::rc::Rc::new(std::cell::Cell::new(false));
        let flushed = std::rc::Rc::new(std::cell::Cell::new(false));
        let mut canvas = EpsCanvas::new(FaultyWriter {
            fail: fail.clone(),
            flushed: flushed.clone(),
        });
        canvas
            .establish_dimensions(&BarcodeDimension::new(10.0, 10.0), Orientation::Deg0)
            .unwrap();

        fail.set(true);
        assert!(canvas.fill_rect(0.0, 0.0, 1.0, 1.0).is_err());
        assert!(canvas.finish().is_err());
        assert!(flushed.get());
    }
}
