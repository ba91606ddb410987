//! The output-agnostic canvas abstraction.
//!
//! A [`Canvas`] is a mutable drawing target owned by the caller for the
//! duration of one generation. The rendering bridge first establishes the
//! symbol dimensions, then issues one drawing primitive per bar/space and
//! optionally one text primitive; backends materialize those calls into
//! their own output form.

use crate::error::Result;
use crate::model::{BarcodeDimension, Orientation, TextAlignment};

/// An output sink for one barcode symbol.
pub trait Canvas {
    /// Establish the symbol dimensions and orientation before any drawing.
    ///
    /// Called exactly once per generation, before the first primitive. The
    /// orientation transform is applied here, once, never per primitive.
    fn establish_dimensions(
        &mut self,
        dim: &BarcodeDimension,
        orientation: Orientation,
    ) -> Result<()>;

    /// Fill a rectangle, coordinates in millimeters from the top-left of
    /// the unrotated symbol frame.
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// Outline a rectangle.
    fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()>;

    /// Draw text between the X anchors `x1` and `x2` with its baseline at
    /// `y`, distributed according to `align`.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        text: &str,
        x1: f64,
        x2: f64,
        y: f64,
        font_name: &str,
        font_size: f64,
        align: TextAlignment,
    ) -> Result<()>;
}

/// A 2-D affine transform (row-major `[[a, c, e], [b, d, f]]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Matrix coefficients `(a, b, c, d, e, f)` as in SVG/PostScript.
    pub coeffs: (f64, f64, f64, f64, f64, f64),
}

impl Transform2D {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            coeffs: (1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
        }
    }

    /// The rotation+translation transform mapping the unrotated content
    /// frame (`width` x `height`, y-down) into the rotated viewport.
    pub fn for_orientation(orientation: Orientation, width: f64, height: f64) -> Self {
        let coeffs = match orientation {
            Orientation::Deg0 => (1.0, 0.0, 0.0, 1.0, 0.0, 0.0),
            // (x, y) -> (y, width - x)
            Orientation::Deg90 => (0.0, -1.0, 1.0, 0.0, 0.0, width),
            // (x, y) -> (width - x, height - y)
            Orientation::Deg180 => (-1.0, 0.0, 0.0, -1.0, width, height),
            // (x, y) -> (height - y, x)
            Orientation::Deg270 => (0.0, 1.0, -1.0, 0.0, height, 0.0),
        };
        Self { coeffs }
    }

    /// Apply the transform to a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (a, b, c, d, e, f) = self.coeffs;
        (a * x + c * y + e, b * x + d * y + f)
    }

    /// Whether this is the identity transform.
    pub fn is_identity(&self) -> bool {
        self.coeffs == (1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}
