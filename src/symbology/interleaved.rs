//! Interleaved 2 of 5 symbol logic.
//!
//! Digits are consumed in pairs: the first digit of a pair selects the bar
//! widths, the second selects the interleaved space widths. The message
//! length must be even once the optional check digit has been appended; an
//! odd length at that point is a hard error. The check digit is a weighted
//! mod-10 sum with weight 3 on odd positions counted from the right.

use super::{handle_checksum, require_non_empty, EncodedSymbol, SymbolOptions, SymbolShape, Symbology};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{ChecksumMode, EventBuffer, HumanReadablePlacement};

const NAME: &str = "intl2of5";

/// Five-element width patterns per digit; `0` narrow, `1` wide.
const PATTERNS: [&str; 10] = [
    "00110", "10001", "01001", "11000", "00101", "10100", "01100", "00011", "10010", "01010",
];

/// Interleaved 2 of 5 symbol generator.
#[derive(Debug)]
pub struct Interleaved2Of5 {
    options: SymbolOptions,
    wide_factor: f64,
}

impl Interleaved2Of5 {
    /// Create a generator with default appearance.
    pub fn new() -> Self {
        Self {
            options: SymbolOptions::with_defaults(0.21, 15.0, 10.0 * 0.21),
            wide_factor: 2.5,
        }
    }

    /// Create a generator from a configuration node.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        let options = SymbolOptions::from_config(cfg, 0.21, 15.0, 10.0)?;
        let wide_factor = cfg.float_or("wide-factor", 2.5)?;
        if wide_factor <= 1.0 {
            return Err(Error::Configuration(
                "wide-factor must be greater than 1".to_string(),
            ));
        }
        Ok(Self {
            options,
            wide_factor,
        })
    }

    /// Mutable access to the shared options.
    pub fn options_mut(&mut self) -> &mut SymbolOptions {
        &mut self.options
    }

    /// Weighted mod-10 check digit (weight 3 on odd positions from the
    /// right of `message` + check digit).
    fn check_char(message: &str) -> Result<char> {
        let digits: Vec<u32> = message
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })
            })
            .collect::<Result<_>>()?;
        let mut sum = 0u32;
        for (i, d) in digits.iter().rev().enumerate() {
            // The check digit will occupy the rightmost (even-weight)
            // position, so the last payload digit gets weight 3.
            sum += d * if i % 2 == 0 { 3 } else { 1 };
        }
        Ok((b'0' + ((10 - sum % 10) % 10) as u8) as char)
    }

    fn digit_value(c: char) -> Result<usize> {
        c.to_digit(10)
            .map(|d| d as usize)
            .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })
    }
}

impl Default for Interleaved2Of5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbology for Interleaved2Of5 {
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
        // Auto: an odd-length message is fresh (the check digit makes it
        // even); an even-length message already carries one by format.
        let mode = match self.options.checksum_mode {
            ChecksumMode::Auto if message.chars().count() % 2 == 1 => ChecksumMode::Add,
            ChecksumMode::Auto => ChecksumMode::Check,
            other => other,
        };
        let encoded = handle_checksum(message, mode, Self::check_char)?;
        if encoded.chars().count() % 2 != 0 {
            return Err(Error::Encoding(format!(
                "message length {} is odd; interleaved pairs require an even count",
                encoded.chars().count()
            )));
        }

        let narrow = self.options.module_width;
        let wide = narrow * self.wide_factor;
        let width_of = |pattern: &str, i: usize| {
            if pattern.as_bytes()[i] == b'1' {
                wide
            } else {
                narrow
            }
        };

        let human_readable = encoded.clone();
        let mut buf = EventBuffer::new();
        buf.symbol_start(match self.options.placement {
            HumanReadablePlacement::None => None,
            _ => Some(human_readable.clone()),
        });
        buf.row_start();
        // Start pattern: four narrow elements.
        for i in 0..4 {
            buf.element(i % 2 == 0, narrow);
        }
        let digits: Vec<char> = encoded.chars().collect();
        for pair in digits.chunks(2) {
            let bars = PATTERNS[Self::digit_value(pair[0])?];
            let spaces = PATTERNS[Self::digit_value(pair[1])?];
            for i in 0..5 {
                buf.element(true, width_of(bars, i));
                buf.element(false, width_of(spaces, i));
            }
        }
        // Stop pattern: wide bar, narrow space, narrow bar.
        buf.element(true, wide);
        buf.element(false, narrow);
        buf.element(true, narrow);
        buf.row_end();

        Ok(EncodedSymbol {
            human_readable,
            events: buf.finish(),
        })
    }
}
