//! Aztec-style matrix symbol logic.
//!
//! The actual matrix construction (Reed-Solomon, masking, layer layout) is
//! delegated to an external [`MatrixEncoder`] capability that returns a
//! finished bit matrix. This engine validates the error-correction and
//! layer parameters, then translates matrix cells into row/column bar
//! events. Matrix symbologies are self-clocking, so no quiet zone is
//! applied.

use super::{require_non_empty, EncodedSymbol, SymbolOptions, SymbolShape, Symbology};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{EventBuffer, HumanReadablePlacement};

const NAME: &str = "aztec";

/// Accepted error-correction range, as a percentage.
const EC_RANGE: std::ops::RangeInclusive<u32> = 23..=99;

/// Accepted layer-count range.
const LAYER_RANGE: std::ops::RangeInclusive<u32> = 1..=32;

/// A finished two-dimensional module matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl BitMatrix {
    /// Create an all-clear matrix of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    /// Matrix width in modules.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Matrix height in modules.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell state at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    /// Set the cell at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.bits[y * self.width + x] = value;
    }
}

/// External capability producing the module matrix for a message.
pub trait MatrixEncoder: Send + Sync {
    /// Encode `message` with the given error-correction percentage and
    /// layer count into a bit matrix.
    fn encode(&self, message: &str, ec_percent: u32, layers: u32) -> Result<BitMatrix>;
}

/// A symbol size constraint in modules, parsed from `WxH` or a single
/// extent applied to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SymbolSize {
    width: usize,
    height: usize,
}

impl SymbolSize {
    fn parse(raw: &str) -> Result<Self> {
        let parse_extent = |s: &str| {
            s.trim().parse::<usize>().map_err(|_| {
                Error::Configuration(format!("invalid symbol size {raw:?}"))
            })
        };
        match raw.split_once(['x', 'X']) {
            Some((w, h)) => Ok(Self {
                width: parse_extent(w)?,
                height: parse_extent(h)?,
            }),
            None => {
                let extent = parse_extent(raw)?;
                Ok(Self {
                    width: extent,
                    height: extent,
                })
            }
        }
    }
}

/// Aztec symbol generator wrapping an external matrix encoder.
pub struct AztecGenerator {
    options: SymbolOptions,
    ec_percent: u32,
    layers: u32,
    message_encoding: Option<String>,
    min_size: Option<SymbolSize>,
    max_size: Option<SymbolSize>,
    encoder: Option<Box<dyn MatrixEncoder>>,
}

impl std::fmt::Debug for AztecGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AztecGenerator")
            .field("ec_percent", &self.ec_percent)
            .field("layers", &self.layers)
            .field("has_encoder", &self.encoder.is_some())
            .finish()
    }
}

impl AztecGenerator {
    /// Create a generator with default parameters and no matrix encoder.
    pub fn new() -> Self {
        let mut options = SymbolOptions::with_defaults(0.5, 0.5, 0.0);
        options.placement = HumanReadablePlacement::None;
        Self {
            options,
            ec_percent: 23,
            layers: 1,
            message_encoding: None,
            min_size: None,
            max_size: None,
            encoder: None,
        }
    }

    /// Create a generator from a configuration node.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        let mut gen = Self::new();
        gen.options.module_width = cfg.length_or("module-width", 0.5)?;
        gen.options.orientation = crate::model::Orientation::from_degrees(
            cfg.integer_or("orientation", 0)? as i32,
        );
        gen.set_error_correction(cfg.integer_or("ec-level", 23)? as u32)?;
        gen.set_layers(cfg.integer_or("layers", 1)? as u32)?;
        if let Ok(encoding) = cfg.attribute("encoding") {
            gen.message_encoding = Some(encoding.to_string());
        }
        if let Ok(raw) = cfg.attribute("min-symbol-size") {
            gen.min_size = Some(SymbolSize::parse(raw)?);
        }
        if let Ok(raw) = cfg.attribute("max-symbol-size") {
            gen.max_size = Some(SymbolSize::parse(raw)?);
        }
        Ok(gen)
    }

    /// Character encoding hint passed along to the matrix encoder's caller.
    pub fn message_encoding(&self) -> Option<&str> {
        self.message_encoding.as_deref()
    }

    /// Inject the external matrix encoder capability.
    pub fn set_matrix_encoder(&mut self, encoder: Box<dyn MatrixEncoder>) {
        self.encoder = Some(encoder);
    }

    /// Set the error-correction percentage. Out-of-range values are
    /// rejected here, not at generation time.
    pub fn set_error_correction(&mut self, percent: u32) -> Result<()> {
        if !EC_RANGE.contains(&percent) {
            return Err(Error::InvalidArgument(format!(
                "error correction {percent}% outside [{},{}]",
                EC_RANGE.start(),
                EC_RANGE.end()
            )));
        }
        self.ec_percent = percent;
        Ok(())
    }

    /// Set the layer count. Out-of-range values are rejected here, not at
    /// generation time.
    pub fn set_layers(&mut self, layers: u32) -> Result<()> {
        if !LAYER_RANGE.contains(&layers) {
            return Err(Error::InvalidArgument(format!(
                "layer count {layers} outside [{},{}]",
                LAYER_RANGE.start(),
                LAYER_RANGE.end()
            )));
        }
        self.layers = layers;
        Ok(())
    }

    /// Mutable access to the shared options.
    pub fn options_mut(&mut self) -> &mut SymbolOptions {
        &mut self.options
    }
}

impl Default for AztecGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbology for AztecGenerator {
    fn name(&self) -> &'static str {
        NAME
    }

    fn options(&self) -> &SymbolOptions {
        &self.options
    }

    fn shape(&self) -> SymbolShape {
        // Square modules: every matrix row is one module tall.
        SymbolShape::Uniform {
            row_height: self.options.module_width,
        }
    }

    fn encode(&self, message: &str) -> Result<EncodedSymbol> {
        require_non_empty(message)?;
        let encoder = self.encoder.as_ref().ok_or_else(|| {
            Error::Configuration("no matrix encoder registered for aztec".to_string())
        })?;
        let matrix = encoder.encode(message, self.ec_percent, self.layers)?;
        if let Some(min) = self.min_size {
            if matrix.width() < min.width || matrix.height() < min.height {
                return Err(Error::Encoding(format!(
                    "matrix {}x{} below minimum symbol size {}x{}",
                    matrix.width(),
                    matrix.height(),
                    min.width,
                    min.height
                )));
            }
        }
        if let Some(max) = self.max_size {
            if matrix.width() > max.width || matrix.height() > max.height {
                return Err(Error::Encoding(format!(
                    "matrix {}x{} exceeds maximum symbol size {}x{}",
                    matrix.width(),
                    matrix.height(),
                    max.width,
                    max.height
                )));
            }
        }

        let module = self.options.module_width;
        let mut buf = EventBuffer::new();
        buf.symbol_start(None);
        for y in 0..matrix.height() {
            buf.row_start();
            for x in 0..matrix.width() {
                buf.element(matrix.get(x, y), module);
            }
            buf.row_end();
        }

        Ok(EncodedSymbol {
            human_readable: message.to_string(),
            events: buf.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolEvent;

    /// Test double producing a diagonal matrix.
    struct DiagonalEncoder;

    impl MatrixEncoder for DiagonalEncoder {
        fn encode(&self, message: &str, _ec: u32, _layers: u32) -> Result<BitMatrix> {
            let size = message.len();
            let mut matrix = BitMatrix::new(size, size);
            for i in 0..size {
                matrix.set(i, i, true);
            }
            Ok(matrix)
        }
    }

    #[test]
    fn test_parameter_ranges_rejected_at_setter() {
        let mut gen = AztecGenerator::new();
        assert!(matches!(
            gen.set_error_correction(22),
            Err(Error::InvalidArgument(_))
        ));
        assert!(gen.set_error_correction(99).is_ok());
        assert!(matches!(gen.set_layers(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(gen.set_layers(33), Err(Error::InvalidArgument(_))));
        assert!(gen.set_layers(32).is_ok());
    }

    #[test]
    fn test_encode_without_encoder_fails() {
        let gen = AztecGenerator::new();
        assert!(matches!(
            gen.encode("DATA"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_matrix_cells_become_row_events() {
        let mut gen = AztecGenerator::new();
        gen.set_matrix_encoder(Box::new(DiagonalEncoder));
        let symbol = gen.encode("ABCD").unwrap();
        let events: Vec<_> = symbol.events.collect();

        let rows = events
            .iter()
            .filter(|e| matches!(e, SymbolEvent::RowStart))
            .count();
        assert_eq!(rows, 4);
        let bars = events.iter().filter(|e| e.is_bar()).count();
        assert_eq!(bars, 4);
        let elements = events
            .iter()
            .filter(|e| matches!(e, SymbolEvent::Element { .. }))
            .count();
        assert_eq!(elements, 16);
    }

    #[test]
    fn test_symbol_size_parse() {
        assert_eq!(
            SymbolSize::parse("15x19").unwrap(),
            SymbolSize {
                width: 15,
                height: 19
            }
        );
        assert_eq!(
            SymbolSize::parse("23").unwrap(),
            SymbolSize {
                width: 23,
                height: 23
            }
        );
        assert!(SymbolSize::parse("axb").is_err());
    }

    #[test]
    fn test_symbol_size_constraints() {
        let cfg = crate::config::Configuration::new("aztec")
            .with_attribute("max-symbol-size", "3x3");
        let mut gen = AztecGenerator::from_config(&cfg).unwrap();
        gen.set_matrix_encoder(Box::new(DiagonalEncoder));
        assert!(matches!(gen.encode("ABCD"), Err(Error::Encoding(_))));
        assert!(gen.encode("ABC").is_ok());
    }

    #[test]
    fn test_no_quiet_zone() {
        let gen = AztecGenerator::new();
        assert_eq!(gen.options().quiet_zone, 0.0);
    }
}
