//! Immediate-mode paint canvas backend.
//!
//! Forwards drawing primitives to a caller-supplied [`Painter`] surface.
//! The orientation transform is pushed onto the surface around each paint
//! call and always popped afterwards, even when drawing bails out early, so
//! the surface's prior state survives a failed generation.

use crate::error::Result;
use crate::model::{BarcodeDimension, Orientation, TextAlignment};

use super::canvas::{Canvas, Transform2D};
use super::text;

/// A live 2-D paint surface.
///
/// Coordinates are millimeters; the surface decides how they map to its
/// own device space. `glyph_advance` has a nominal default for surfaces
/// without font metrics.
pub trait Painter {
    /// Prepare the surface for a symbol of the given frame size (rotated
    /// frame, in millimeters).
    fn prepare(&mut self, width: f64, height: f64) -> Result<()>;

    /// Push a transform onto the surface's transform stack.
    fn push_transform(&mut self, transform: &Transform2D);

    /// Pop the most recently pushed transform.
    fn pop_transform(&mut self);

    /// Fill a rectangle in the current transform.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Outline a rectangle in the current transform.
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Draw one glyph with its left edge at `x` and baseline at `baseline`.
    fn draw_glyph(&mut self, glyph: char, x: f64, baseline: f64, font_name: &str, font_size: f64);

    /// Advance width of one glyph. Surfaces with real font metrics
    /// override this.
    fn glyph_advance(&self, glyph: char, font_name: &str, font_size: f64) -> f64 {
        let _ = (glyph, font_name);
        text::nominal_advance(font_size)
    }
}

impl<P: Painter + ?Sized> Painter for &mut P {
    fn prepare(&mut self, width: f64, height: f64) -> Result<()> {
        (**self).prepare(width, height)
    }

    fn push_transform(&mut self, transform: &Transform2D) {
        (**self).push_transform(transform);
    }

    fn pop_transform(&mut self) {
        (**self).pop_transform();
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        (**self).fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        (**self).stroke_rect(x, y, w, h);
    }

    fn draw_glyph(&mut self, glyph: char, x: f64, baseline: f64, font_name: &str, font_size: f64) {
        (**self).draw_glyph(glyph, x, baseline, font_name, font_size);
    }

    fn glyph_advance(&self, glyph: char, font_name: &str, font_size: f64) -> f64 {
        (**self).glyph_advance(glyph, font_name, font_size)
    }
}

/// Restores the painter's transform when the scope ends.
struct TransformScope<'p, P: Painter> {
    painter: &'p mut P,
}

impl<'p, P: Painter> TransformScope<'p, P> {
    fn push(painter: &'p mut P, transform: &Transform2D) -> Self {
        painter.push_transform(transform);
        Self { painter }
    }
}

impl<P: Painter> Drop for TransformScope<'_, P> {
    fn drop(&mut self) {
        self.painter.pop_transform();
    }
}

impl<P: Painter> std::ops::Deref for TransformScope<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.painter
    }
}

impl<P: Painter> std::ops::DerefMut for TransformScope<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.painter
    }
}

/// Canvas backend forwarding primitives to a [`Painter`].
#[derive(Debug)]
pub struct PaintCanvas<P: Painter> {
    painter: P,
    transform: Transform2D,
    ready: bool,
}

impl<P: Painter> PaintCanvas<P> {
    /// Create a canvas drawing onto `painter`.
    pub fn new(painter: P) -> Self {
        Self {
            painter,
            transform: Transform2D::identity(),
            ready: false,
        }
    }

    /// Access the underlying surface.
    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// Mutable access to the underlying surface.
    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    /// Consume the canvas and hand the surface back.
    pub fn into_painter(self) -> P {
        self.painter
    }

    fn require_ready(&self) -> Result<()> {
        if self.ready {
            Ok(())
        } else {
            Err(crate::error::Error::CanvasSetup(
                "drawing primitive before establish_dimensions".to_string(),
            ))
        }
    }
}

impl<P: Painter> Canvas for PaintCanvas<P> {
    fn establish_dimensions(
        &mut self,
        dim: &BarcodeDimension,
        orientation: Orientation,
    ) -> Result<()> {
        self.painter.prepare(
            dim.width_plus_quiet_for(orientation),
            dim.height_plus_quiet_for(orientation),
        )?;
        self.transform = Transform2D::for_orientation(
            orientation,
            dim.width_plus_quiet,
            dim.height_plus_quiet,
        );
        self.ready = true;
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.require_ready()?;
        let mut scope = TransformScope::push(&mut self.painter, &self.transform);
        scope.fill_rect(x, y, w, h);
        Ok(())
    }

    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
        self.require_ready()?;
        let mut scope = TransformScope::push(&mut self.painter, &self.transform);
        scope.stroke_rect(x, y, w, h);
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
        self.require_ready()?;
        let advances: Vec<f64> = content
            .chars()
            .map(|c| self.painter.glyph_advance(c, font_name, font_size))
            .collect();
        let positions = text::glyph_positions(&advances, x1, x2, align);

        let mut scope = TransformScope::push(&mut self.painter, &self.transform);
        for (glyph, x) in content.chars().zip(positions) {
            scope.draw_glyph(glyph, x, y, font_name, font_size);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Painter double tracking transform stack balance.
    #[derive(Debug, Default)]
    struct BalancePainter {
        depth: usize,
        max_depth: usize,
        rects: Vec<(f64, f64, f64, f64)>,
        glyphs: Vec<char>,
    }

    impl Painter for BalancePainter {
        fn prepare(&mut self, _width: f64, _height: f64) -> Result<()> {
            Ok(())
        }

        fn push_transform(&mut self, _transform: &Transform2D) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }

        fn pop_transform(&mut self) {
            self.depth -= 1;
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
            assert_eq!(self.depth, 1, "fill outside transform scope");
            self.rects.push((x, y, w, h));
        }

        fn stroke_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) {}

        fn draw_glyph(
            &mut self,
            glyph: char,
            _x: f64,
            _baseline: f64,
            _font_name: &str,
            _font_size: f64,
        ) {
            self.glyphs.push(glyph);
        }
    }

    #[test]
    fn test_transform_restored_around_each_call() {
        let mut canvas = PaintCanvas::new(BalancePainter::default());
        canvas
            .establish_dimensions(&BarcodeDimension::new(10.0, 5.0), Orientation::Deg90)
            .unwrap();
        canvas.fill_rect(0.0, 0.0, 1.0, 5.0).unwrap();
        canvas.fill_rect(2.0, 0.0, 1.0, 5.0).unwrap();
        canvas
            .draw_text("AB", 0.0, 10.0, 6.0, "Helvetica", 2.0, TextAlignment::Center)
            .unwrap();

        let painter = canvas.into_painter();
        assert_eq!(painter.depth, 0);
        assert_eq!(painter.max_depth, 1);
        assert_eq!(painter.rects.len(), 2);
        assert_eq!(painter.glyphs, vec!['A', 'B']);
    }
}
