//! Codabar symbol logic.
//!
//! Each character maps to seven alternating bar/space elements (four bars,
//! three spaces). The start/stop characters `A`-`D` may only appear at the
//! ends of the message. Codabar defines no check character: `Auto` behaves
//! as `Ignore`, and `Add`/`Check` are rejected.

use super::{require_non_empty, EncodedSymbol, SymbolOptions, SymbolShape, Symbology};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{ChecksumMode, EventBuffer, HumanReadablePlacement};

const NAME: &str = "codabar";

const ALPHABET: &str = "0123456789-$:/.+ABCD";

/// Element width patterns; `0` narrow, `1` wide, alternating bar/space
/// starting with a bar.
const PATTERNS: [&str; 20] = [
    "0000011", "0000110", "0001001", "1100000", "0010010", // 0-4
    "1000010", "0100001", "0100100", "0110000", "1001000", // 5-9
    "0001100", "0011000", "1000101", "1010001", "1010100", // - $ : / .
    "0010101", "0011010", "0101001", "0001011", "0001110", // + A B C D
];

/// Codabar symbol generator.
#[derive(Debug)]
pub struct Codabar {
    options: SymbolOptions,
    wide_factor: f64,
    interchar_gap: f64,
}

impl Codabar {
    /// Create a generator with default appearance.
    pub fn new() -> Self {
        let options = SymbolOptions::with_defaults(0.21, 15.0, 10.0 * 0.21);
        Self {
            wide_factor: 3.0,
            interchar_gap: options.module_width,
            options,
        }
    }

    /// Create a generator from a configuration node.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        let options = SymbolOptions::from_config(cfg, 0.21, 15.0, 10.0)?;
        let wide_factor = cfg.float_or("wide-factor", 3.0)?;
        if wide_factor <= 1.0 {
            return Err(Error::Configuration(
                "wide-factor must be greater than 1".to_string(),
            ));
        }
        let interchar_gap = cfg.length_or("interchar-gap-width", options.module_width)?;
        Ok(Self {
            options,
            wide_factor,
            interchar_gap,
        })
    }

    /// Mutable access to the shared options.
    pub fn options_mut(&mut self) -> &mut SymbolOptions {
        &mut self.options
    }

    fn char_value(c: char) -> Result<usize> {
        ALPHABET
            .find(c.to_ascii_uppercase())
            .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })
    }

    fn emit_pattern(&self, buf: &mut EventBuffer, pattern: &str) {
        let narrow = self.options.module_width;
        let wide = narrow * self.wide_factor;
        for (i, w) in pattern.chars().enumerate() {
            let width = if w == '1' { wide } else { narrow };
            buf.element(i % 2 == 0, width);
        }
    }
}

impl Default for Codabar {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbology for Codabar {
    fn name(&self) -> &'static str {
        NAME
    }

    fn options(&self) -> &SymbolOptions {
        &self.options
    }

    fn shape(&self) -> SymbolShape {
        SymbolShape::Uniform {
            row_height: self.options.bar_height,
        }
    }

    fn encode(&self, message: &str) -> Result<EncodedSymbol> {
        require_non_empty(message)?;
        match self.options.checksum_mode {
            ChecksumMode::Auto | ChecksumMode::Ignore => {}
            _ => {
                return Err(Error::Encoding(
                    "Codabar defines no check character".to_string(),
                ))
            }
        }

        let last = message.chars().count() - 1;
        for (i, c) in message.chars().enumerate() {
            let value = Self::char_value(c)?;
            // A-D are start/stop characters.
            if value >= 16 && i != 0 && i != last {
                return Err(Error::Encoding(format!(
                    "start/stop character {c:?} inside a Codabar message"
                )));
            }
        }

        let human_readable = message.to_string();
        let mut buf = EventBuffer::new();
        buf.symbol_start(match self.options.placement {
            HumanReadablePlacement::None => None,
            _ => Some(human_readable.clone()),
        });
        buf.row_start();
        for (i, c) in message.chars().enumerate() {
            if i > 0 {
                buf.element(false, self.interchar_gap);
            }
            self.emit_pattern(&mut buf, PATTERNS[Self::char_value(c)?]);
        }
        buf.row_end();

        Ok(EncodedSymbol {
            human_readable,
            events: buf.finish(),
        })
    }
}
