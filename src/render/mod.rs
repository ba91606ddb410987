//! Rendering pipeline: the bridge from symbol events to output backends.
//!
//! [`SymbolRenderer`] walks an event stream, measures the symbol, and drives
//! a [`Canvas`] implementation. Backends ship for SVG ([`SvgCanvas`]), EPS
//! ([`EpsCanvas`]), raster images ([`BitmapCanvas`]), and arbitrary paint
//! surfaces ([`PaintCanvas`]).

mod bitmap;
mod bridge;
mod canvas;
mod eps;
pub(crate) mod glyphs;
mod paint;
mod svg;
pub(crate) mod text;

pub use bitmap::{BitmapCanvas, PixelFormat};
pub use bridge::{measure, SymbolRenderer};
pub use canvas::{Canvas, Transform2D};
pub use eps::EpsCanvas;
pub use paint::{PaintCanvas, Painter};
pub use svg::{SvgCanvas, SvgElement};
