//! Bridge between the geometry event stream and a canvas.
//!
//! The bridge drains the event stream once, accumulating relative element
//! widths and row heights into absolute millimeter coordinates, applies the
//! quiet zone, and issues canvas primitives: `establish_dimensions` first,
//! then one `fill_rect` per bar, then the optional human-readable text.

use crate::error::{Error, Result};
use crate::model::{BarcodeDimension, HumanReadablePlacement, SymbolEvent};
use crate::symbology::{EncodedSymbol, SymbolOptions, SymbolShape};

use super::canvas::Canvas;

/// Fraction of the font size between the text band top and the baseline.
const BASELINE_RATIO: f64 = 0.8;

/// Renders one encoded symbol onto a canvas.
#[derive(Debug)]
pub struct SymbolRenderer<'a, C: Canvas> {
    canvas: &'a mut C,
}

impl<'a, C: Canvas> SymbolRenderer<'a, C> {
    /// Create a renderer drawing onto `canvas`.
    pub fn new(canvas: &'a mut C) -> Self {
        Self { canvas }
    }

    /// Draw the symbol. Consumes the event stream.
    pub fn render(
        &mut self,
        symbol: EncodedSymbol,
        shape: SymbolShape,
        options: &SymbolOptions,
    ) -> Result<()> {
        let events: Vec<SymbolEvent> = symbol.events.collect();
        let layout = Layout::measure(&events, shape, options)?;

        self.canvas
            .establish_dimensions(&layout.dim, options.orientation)?;

        let mut y = layout.dim.y_offset + layout.bars_top;
        let mut x = layout.dim.x_offset;
        let mut human_readable: Option<String> = None;

        for event in &events {
            match event {
                SymbolEvent::SymbolStart { human_readable: hr } => {
                    human_readable.clone_from(hr);
                }
                SymbolEvent::RowStart => {
                    x = layout.dim.x_offset;
                }
                SymbolEvent::Element { bar, width, height } => {
                    if *bar {
                        let (dy, h) = shape.bar_extent(*height);
                        self.canvas.fill_rect(x, y + dy, *width, h)?;
                    }
                    x += width;
                }
                SymbolEvent::RowEnd => {
                    y += shape.row_height();
                }
                SymbolEvent::SymbolEnd => {}
            }
        }

        if let Some(text) = human_readable {
            let baseline = match options.placement {
                HumanReadablePlacement::Top => {
                    layout.dim.y_offset + options.font_size * BASELINE_RATIO
                }
                _ => {
                    layout.dim.y_offset
                        + layout.bars_top
                        + layout.bars_height
                        + options.font_size * BASELINE_RATIO
                }
            };
            self.canvas.draw_text(
                &text,
                layout.dim.x_offset,
                layout.dim.x_offset + layout.dim.width,
                baseline,
                &options.font_name,
                options.font_size,
                options.text_alignment,
            )?;
        }
        Ok(())
    }
}

/// Measured geometry of one symbol.
#[derive(Debug, Clone, Copy)]
struct Layout {
    dim: BarcodeDimension,
    /// Offset of the bar area below the content top (text band when the
    /// placement is `Top`).
    bars_top: f64,
    bars_height: f64,
}

impl Layout {
    fn measure(events: &[SymbolEvent], shape: SymbolShape, options: &SymbolOptions) -> Result<Self> {
        let mut width: f64 = 0.0;
        let mut row_width: f64 = 0.0;
        let mut rows = 0usize;
        let mut has_text = false;

        for event in events {
            match event {
                SymbolEvent::SymbolStart { human_readable } => {
                    has_text = human_readable.is_some();
                }
                SymbolEvent::RowStart => row_width = 0.0,
                SymbolEvent::Element { width: w, .. } => row_width += w,
                SymbolEvent::RowEnd => {
                    rows += 1;
                    width = width.max(row_width);
                }
                SymbolEvent::SymbolEnd => {}
            }
        }
        if rows == 0 || width <= 0.0 {
            return Err(Error::Encoding(
                "symbol produced no drawable geometry".to_string(),
            ));
        }

        let bars_height = shape.row_height() * rows as f64;
        let text_height = if has_text { options.font_size } else { 0.0 };
        let bars_top = match options.placement {
            HumanReadablePlacement::Top if has_text => text_height,
            _ => 0.0,
        };

        Ok(Layout {
            dim: BarcodeDimension::with_quiet_zone(
                width,
                bars_height + text_height,
                options.quiet_zone,
                options.quiet_zone_vertical,
            ),
            bars_top,
            bars_height,
        })
    }
}

/// Measure the dimensions of an encoded symbol without drawing.
pub fn measure(
    symbol: EncodedSymbol,
    shape: SymbolShape,
    options: &SymbolOptions,
) -> Result<BarcodeDimension> {
    let events: Vec<SymbolEvent> = symbol.events.collect();
    Ok(Layout::measure(&events, shape, options)?.dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Orientation, TextAlignment};
    use crate::symbology::{Code39, Symbology};

    /// Canvas double recording primitive calls.
    #[derive(Default)]
    struct RecordingCanvas {
        dim: Option<BarcodeDimension>,
        rects: Vec<(f64, f64, f64, f64)>,
        texts: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn establish_dimensions(
            &mut self,
            dim: &BarcodeDimension,
            _orientation: Orientation,
        ) -> Result<()> {
            self.dim = Some(*dim);
            Ok(())
        }

        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> Result<()> {
            assert!(
                self.dim.is_some(),
                "fill_rect before establish_dimensions"
            );
            self.rects.push((x, y, w, h));
            Ok(())
        }

        fn draw_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64) -> Result<()> {
            Ok(())
        }

        fn draw_text(
            &mut self,
            text: &str,
            _x1: f64,
            _x2: f64,
            _y: f64,
            _font_name: &str,
            _font_size: f64,
            _align: TextAlignment,
        ) -> Result<()> {
            self.texts.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_render_emits_one_rect_per_bar() {
        let gen = Code39::new();
        let symbol = gen.encode("A").unwrap();
        let bar_count = {
            let symbol = gen.encode("A").unwrap();
            symbol.events.filter(SymbolEvent::is_bar).count()
        };

        let mut canvas = RecordingCanvas::default();
        let mut renderer = SymbolRenderer::new(&mut canvas);
        renderer
            .render(symbol, gen.shape(), gen.options())
            .unwrap();

        assert_eq!(canvas.rects.len(), bar_count);
        assert_eq!(canvas.texts, vec!["A".to_string()]);
    }

    #[test]
    fn test_bars_offset_by_quiet_zone() {
        let gen = Code39::new();
        let symbol = gen.encode("A").unwrap();

        let mut canvas = RecordingCanvas::default();
        SymbolRenderer::new(&mut canvas)
            .render(symbol, gen.shape(), gen.options())
            .unwrap();

        let dim = canvas.dim.unwrap();
        assert!(dim.x_offset > 0.0);
        let first = canvas.rects.first().unwrap();
        assert_eq!(first.0, dim.x_offset);
    }

    #[test]
    fn test_measure_matches_event_sum() {
        let gen = Code39::new();
        let dim = measure(gen.encode("A").unwrap(), gen.shape(), gen.options()).unwrap();

        let widths: f64 = gen
            .encode("A")
            .unwrap()
            .events
            .filter_map(|e| e.width())
            .sum();
        assert!((dim.width - widths).abs() < 1e-9);
        assert!((dim.width_plus_quiet - (dim.width + 2.0 * dim.x_offset)).abs() < 1e-9);
    }
}
