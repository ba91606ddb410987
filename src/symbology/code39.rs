//! Code 39 symbol logic.
//!
//! Each character maps to a fixed pattern of nine alternating bar/space
//! elements (five bars, four spaces), three of which are wide. Symbols are
//! bracketed by the `*` start/stop character and characters are separated by
//! a configurable inter-character gap. The optional check character is the
//! mod-43 sum of the character values.

use super::{handle_checksum, require_non_empty, EncodedSymbol, SymbolOptions, SymbolShape, Symbology};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{ChecksumMode, EventBuffer, HumanReadablePlacement};

const NAME: &str = "code39";

/// Character set in checksum-value order.
const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ-. $/+%";

/// Bar/space width patterns, one per alphabet character plus the `*`
/// start/stop pattern last. Elements alternate bar, space, bar, ...;
/// `n` is narrow, `w` is wide.
const PATTERNS: [&str; 44] = [
    "nnnwwnwnn", "wnnwnnnnw", "nnwwnnnnw", "wnwwnnnnn", "nnnwwnnnw", // 0-4
    "wnnwwnnnn", "nnwwwnnnn", "nnnwnnwnw", "wnnwnnwnn", "nnwwnnwnn", // 5-9
    "wnnnnwnnw", "nnwnnwnnw", "wnwnnwnnn", "nnnnwwnnw", "wnnnwwnnn", // A-E
    "nnwnwwnnn", "nnnnnwwnw", "wnnnnwwnn", "nnwnnwwnn", "nnnnwwwnn", // F-J
    "wnnnnnnww", "nnwnnnnww", "wnwnnnnwn", "nnnnwnnww", "wnnnwnnwn", // K-O
    "nnwnwnnwn", "nnnnnnwww", "wnnnnnwwn", "nnwnnnwwn", "nnnnwnwwn", // P-T
    "wwnnnnnnw", "nwwnnnnnw", "wwwnnnnnn", "nwnnwnnnw", "wwnnwnnnn", // U-Y
    "nwwnwnnnn", "nwnnnnwnw", "wwnnnnwnn", "nwwnnnwnn", "nwnwnwnnn", // Z - . space $
    "nwnwnnnwn", "nwnnnwnwn", "nnnwnwnwn", "nwnnwnwnn", // / + % *
];

/// Code 39 symbol generator.
#[derive(Debug)]
pub struct Code39 {
    options: SymbolOptions,
    wide_factor: f64,
    interchar_gap: f64,
}

impl Code39 {
    /// Create a generator with default appearance.
    pub fn new() -> Self {
        let options = SymbolOptions::with_defaults(0.19, 15.0, 10.0 * 0.19);
        Self {
            wide_factor: 2.5,
            interchar_gap: options.module_width,
            options,
        }
    }

    /// Create a generator from a configuration node.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        // module-width first: gap and quiet-zone defaults are one and ten
        // module widths respectively.
        let options = SymbolOptions::from_config(cfg, 0.19, 15.0, 10.0)?;
        let wide_factor = cfg.float_or("wide-factor", 2.5)?;
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

    /// Set the wide/narrow ratio.
    pub fn set_wide_factor(&mut self, factor: f64) -> Result<()> {
        if factor <= 1.0 {
            return Err(Error::InvalidArgument(
                "wide-factor must be greater than 1".to_string(),
            ));
        }
        self.wide_factor = factor;
        Ok(())
    }

    /// Mutable access to the shared options.
    pub fn options_mut(&mut self) -> &mut SymbolOptions {
        &mut self.options
    }

    fn char_value(c: char) -> Result<usize> {
        ALPHABET
            .find(c)
            .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })
    }

    /// Mod-43 check character over the character values.
    fn check_char(message: &str) -> Result<char> {
        let mut sum = 0usize;
        for c in message.chars() {
            sum += Self::char_value(c)?;
        }
        Ok(ALPHABET.as_bytes()[sum % 43] as char)
    }

    fn emit_pattern(&self, buf: &mut EventBuffer, pattern: &str) {
        let narrow = self.options.module_width;
        let wide = narrow * self.wide_factor;
        for (i, w) in pattern.chars().enumerate() {
            let width = if w == 'w' { wide } else { narrow };
            buf.element(i % 2 == 0, width);
        }
    }
}

impl Default for Code39 {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbology for Code39 {
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
        if message.contains('*') {
            return Err(Error::UnsupportedCharacter { ch: '*', symbology: NAME });
        }
        // The check character of this symbology is optional, so Auto leaves
        // the message untouched.
        let mode = match self.options.checksum_mode {
            ChecksumMode::Auto => ChecksumMode::Ignore,
            other => other,
        };
        let encoded = handle_checksum(message, mode, Self::check_char)?;

        let human_readable = encoded.clone();
        let mut buf = EventBuffer::new();
        buf.symbol_start(match self.options.placement {
            HumanReadablePlacement::None => None,
            _ => Some(human_readable.clone()),
        });
        buf.row_start();
        self.emit_pattern(&mut buf, PATTERNS[43]);
        for c in encoded.chars() {
            buf.element(false, self.interchar_gap);
            self.emit_pattern(&mut buf, PATTERNS[Self::char_value(c)?]);
        }
        buf.element(false, self.interchar_gap);
        self.emit_pattern(&mut buf, PATTERNS[43]);
        buf.row_end();

        Ok(EncodedSymbol {
            human_readable,
            events: buf.finish(),
        })
    }
}
