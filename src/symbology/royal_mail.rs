//! Royal Mail four-state (CBC) symbol logic.
//!
//! Each character of the 0-9/A-Z alphabet maps to four bars drawn from the
//! track/ascender/descender/full height classes, with a tracker-level start
//! and stop bar framing the symbol. Every character carries a top value and
//! a bottom value in 0..=5; the check character is found by summing both
//! columns mod 6 and looking the pair up in the 6x6 check table.

use super::{handle_checksum, require_non_empty, EncodedSymbol, SymbolOptions, SymbolShape, Symbology};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{
    BaselineAlignment, ChecksumMode, EventBuffer, HeightClass, HumanReadablePlacement,
};

const NAME: &str = "royal-mail-cbc";

const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 2-of-4 bit patterns indexed by a top or bottom value, most significant
/// bit = first bar.
const VALUE_PATTERNS: [u8; 6] = [0b0011, 0b0101, 0b0110, 0b1001, 0b1010, 0b1100];

const MODULE_WIDTH: f64 = 0.53;
const QUIET_ZONE_MODULES: f64 = 3.8;

/// Royal Mail Customer Bar Code generator.
#[derive(Debug)]
pub struct RoyalMailCbc {
    options: SymbolOptions,
    track_height: f64,
    ascender_height: f64,
}

impl RoyalMailCbc {
    /// Create a generator with default appearance.
    pub fn new() -> Self {
        let mut options =
            SymbolOptions::with_defaults(MODULE_WIDTH, 5.0, QUIET_ZONE_MODULES * MODULE_WIDTH);
        options.placement = HumanReadablePlacement::None;
        Self {
            options,
            track_height: 1.3,
            ascender_height: 1.85,
        }
    }

    /// Create a generator from a configuration node.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        let mut gen = Self::new();
        gen.options = SymbolOptions::from_config(cfg, MODULE_WIDTH, 5.0, QUIET_ZONE_MODULES)?;
        if cfg.attribute("human-readable").is_err() && cfg.child("human-readable").is_none() {
            gen.options.placement = HumanReadablePlacement::None;
        }
        gen.track_height = cfg.length_or("track-height", 1.3)?;
        gen.ascender_height = cfg.length_or("ascender-height", 1.85)?;
        Ok(gen)
    }

    /// Mutable access to the shared options.
    pub fn options_mut(&mut self) -> &mut SymbolOptions {
        &mut self.options
    }

    /// Top/bottom values of a character, each in 0..=5.
    fn char_values(c: char) -> Result<(u32, u32)> {
        let index = ALPHABET
            .find(c.to_ascii_uppercase())
            .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })? as u32;
        Ok(((index / 6 + 1) % 6, (index % 6 + 1) % 6))
    }

    /// Check character from the top and bottom sums mod 6.
    fn check_char(message: &str) -> Result<char> {
        let mut top_sum = 0u32;
        let mut bottom_sum = 0u32;
        for c in message.chars() {
            let (top, bottom) = Self::char_values(c)?;
            top_sum += top;
            bottom_sum += bottom;
        }
        let row = (top_sum % 6 + 5) % 6;
        let col = (bottom_sum % 6 + 5) % 6;
        Ok(ALPHABET.as_bytes()[(row * 6 + col) as usize] as char)
    }

    fn emit_bar(&self, buf: &mut EventBuffer, class: HeightClass, last: bool) {
        buf.element_with_height(true, self.options.module_width, class);
        if !last {
            buf.element(false, self.options.module_width);
        }
    }

    fn emit_char(&self, buf: &mut EventBuffer, c: char) -> Result<()> {
        let (top, bottom) = Self::char_values(c)?;
        let top_bits = VALUE_PATTERNS[top as usize];
        let bottom_bits = VALUE_PATTERNS[bottom as usize];
        for bar in 0..4 {
            let mask = 0b1000 >> bar;
            let class = match (top_bits & mask != 0, bottom_bits & mask != 0) {
                (true, true) => HeightClass::Full,
                (true, false) => HeightClass::Ascender,
                (false, true) => HeightClass::Descender,
                (false, false) => HeightClass::Track,
            };
            self.emit_bar(buf, class, false);
        }
        Ok(())
    }
}

impl Default for RoyalMailCbc {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbology for RoyalMailCbc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn options(&self) -> &SymbolOptions {
        &self.options
    }

    fn shape(&self) -> SymbolShape {
        SymbolShape::Variable {
            track: self.track_height,
            ascender: self.ascender_height,
            descender: self.ascender_height,
            baseline: BaselineAlignment::Bottom,
        }
    }

    fn encode(&self, message: &str) -> Result<EncodedSymbol> {
        require_non_empty(message)?;
        let mode = match self.options.checksum_mode {
            ChecksumMode::Auto => ChecksumMode::Add,
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
        // Start bar: ascender; stop bar: full height.
        self.emit_bar(&mut buf, HeightClass::Ascender, false);
        for c in encoded.chars() {
            self.emit_char(&mut buf, c)?;
        }
        self.emit_bar(&mut buf, HeightClass::Full, true);
        buf.row_end();

        Ok(EncodedSymbol {
            human_readable,
            events: buf.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolEvent;

    #[test]
    fn test_check_char_reference_vector() {
        assert_eq!(RoyalMailCbc::check_char("SN34RD1A").unwrap(), 'K');
    }

    #[test]
    fn test_default_quiet_zone_matches_empty_config() {
        let by_default = RoyalMailCbc::new();
        let by_config =
            RoyalMailCbc::from_config(&Configuration::new("royal-mail-cbc")).unwrap();
        assert_eq!(
            by_default.options().quiet_zone,
            by_config.options().quiet_zone
        );
    }

    #[test]
    fn test_auto_and_add_append_check() {
        let gen = RoyalMailCbc::new();
        assert_eq!(gen.encode("SN34RD1A").unwrap().human_readable, "SN34RD1AK");

        let mut gen = RoyalMailCbc::new();
        gen.options_mut().checksum_mode = ChecksumMode::Add;
        assert_eq!(gen.encode("SN34RD1A").unwrap().human_readable, "SN34RD1AK");
    }

    #[test]
    fn test_check_accepts_and_rejects() {
        let mut gen = RoyalMailCbc::new();
        gen.options_mut().checksum_mode = ChecksumMode::Check;
        assert_eq!(gen.encode("SN34RD1AK").unwrap().human_readable, "SN34RD1AK");
        assert!(matches!(
            gen.encode("SN34RD1AL"),
            Err(Error::ChecksumMismatch {
                expected: 'K',
                found: 'L'
            })
        ));
    }

    #[test]
    fn test_ignore_passes_through() {
        let mut gen = RoyalMailCbc::new();
        gen.options_mut().checksum_mode = ChecksumMode::Ignore;
        assert_eq!(gen.encode("SN34RD1A").unwrap().human_readable, "SN34RD1A");
    }

    #[test]
    fn test_bar_count() {
        let mut gen = RoyalMailCbc::new();
        gen.options_mut().checksum_mode = ChecksumMode::Ignore;
        let symbol = gen.encode("AB12").unwrap();
        let bars = symbol.events.filter(SymbolEvent::is_bar).count();
        // start + 4 chars * 4 + stop
        assert_eq!(bars, 1 + 16 + 1);
    }

    #[test]
    fn test_rejects_punctuation() {
        let gen = RoyalMailCbc::new();
        assert!(matches!(
            gen.encode("SN34-RD"),
            Err(Error::UnsupportedCharacter { ch: '-', .. })
        ));
    }
}
