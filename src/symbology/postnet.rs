//! POSTNET symbol logic.
//!
//! Each digit maps to a fixed five-bar pattern with exactly two tall bars
//! (a two-out-of-five code), framed by a single tall bar at each end. The
//! check digit makes the digit sum a multiple of 10. The gap between bars
//! is a separate, configurable width distinct from the bar width.

use super::{handle_checksum, require_non_empty, EncodedSymbol, SymbolOptions, SymbolShape, Symbology};
use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::model::{
    BaselineAlignment, ChecksumMode, EventBuffer, HeightClass, HumanReadablePlacement,
};

const NAME: &str = "postnet";

/// Tall/short patterns per digit; `1` is tall.
const PATTERNS: [&str; 10] = [
    "11000", "00011", "00101", "00110", "01001", "01010", "01100", "10001", "10010", "10100",
];

const MODULE_WIDTH: f64 = 0.66;
const QUIET_ZONE_MODULES: f64 = 4.8;

/// POSTNET symbol generator.
#[derive(Debug)]
pub struct Postnet {
    options: SymbolOptions,
    interchar_gap: f64,
    tall_bar_height: f64,
    short_bar_height: f64,
    baseline: BaselineAlignment,
}

impl Postnet {
    /// Create a generator with default appearance (bar and gap widths per
    /// the USPS nominal dimensions).
    pub fn new() -> Self {
        let mut options =
            SymbolOptions::with_defaults(MODULE_WIDTH, 3.175, QUIET_ZONE_MODULES * MODULE_WIDTH);
        options.placement = HumanReadablePlacement::None;
        Self {
            interchar_gap: 0.635,
            tall_bar_height: 3.175,
            short_bar_height: 1.27,
            baseline: BaselineAlignment::Bottom,
            options,
        }
    }

    /// Create a generator from a configuration node.
    pub fn from_config(cfg: &Configuration) -> Result<Self> {
        let mut gen = Self::new();
        gen.options = SymbolOptions::from_config(cfg, MODULE_WIDTH, 3.175, QUIET_ZONE_MODULES)?;
        // POSTNET carries no human-readable line unless asked for one.
        if cfg.attribute("human-readable").is_err() && cfg.child("human-readable").is_none() {
            gen.options.placement = HumanReadablePlacement::None;
        }
        gen.interchar_gap = cfg.length_or("interchar-gap-width", 0.635)?;
        gen.tall_bar_height = cfg.length_or("tall-bar-height", 3.175)?;
        gen.short_bar_height = cfg.length_or("short-bar-height", 1.27)?;
        if gen.short_bar_height > gen.tall_bar_height {
            return Err(Error::Configuration(
                "short-bar-height exceeds tall-bar-height".to_string(),
            ));
        }
        gen.baseline = BaselineAlignment::from_name(cfg.attribute_or("baseline-alignment", "bottom"))?;
        Ok(gen)
    }

    /// Mutable access to the shared options.
    pub fn options_mut(&mut self) -> &mut SymbolOptions {
        &mut self.options
    }

    /// Mod-10 check digit making the digit sum a multiple of 10.
    fn check_char(message: &str) -> Result<char> {
        let mut sum = 0u32;
        for c in message.chars() {
            sum += c
                .to_digit(10)
                .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })?;
        }
        Ok((b'0' + ((10 - sum % 10) % 10) as u8) as char)
    }

    fn emit_bar(&self, buf: &mut EventBuffer, tall: bool, last: bool) {
        let class = if tall {
            HeightClass::Full
        } else {
            HeightClass::Track
        };
        buf.element_with_height(true, self.options.module_width, class);
        if !last {
            buf.element(false, self.interchar_gap);
        }
    }
}

impl Default for Postnet {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbology for Postnet {
    fn name(&self) -> &'static str {
        NAME
    }

    fn options(&self) -> &SymbolOptions {
        &self.options
    }

    fn shape(&self) -> SymbolShape {
        SymbolShape::Variable {
            track: self.short_bar_height,
            ascender: self.tall_bar_height - self.short_bar_height,
            descender: 0.0,
            baseline: self.baseline,
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
        self.emit_bar(&mut buf, true, false);
        for c in encoded.chars() {
            let digit = c
                .to_digit(10)
                .ok_or(Error::UnsupportedCharacter { ch: c, symbology: NAME })?;
            for tall in PATTERNS[digit as usize].chars() {
                self.emit_bar(&mut buf, tall == '1', false);
            }
        }
        self.emit_bar(&mut buf, true, true);
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
    fn test_check_char() {
        // 5+5+5+5+5 = 25 -> check 5
        assert_eq!(Postnet::check_char("55555").unwrap(), '5');
        // 1+2+3+4+5 = 15 -> check 5
        assert_eq!(Postnet::check_char("12345").unwrap(), '5');
    }

    #[test]
    fn test_default_quiet_zone_matches_empty_config() {
        let by_default = Postnet::new();
        let by_config = Postnet::from_config(&Configuration::new("postnet")).unwrap();
        assert_eq!(
            by_default.options().quiet_zone,
            by_config.options().quiet_zone
        );
    }

    #[test]
    fn test_auto_appends_check() {
        let gen = Postnet::new();
        let symbol = gen.encode("12345").unwrap();
        assert_eq!(symbol.human_readable, "123455");
    }

    #[test]
    fn test_check_mismatch() {
        let mut gen = Postnet::new();
        gen.options_mut().checksum_mode = ChecksumMode::Check;
        assert!(gen.encode("123455").is_ok());
        assert!(matches!(
            gen.encode("123456"),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_pattern_has_two_tall_bars() {
        for pattern in PATTERNS {
            assert_eq!(pattern.chars().filter(|c| *c == '1').count(), 2);
        }
    }

    #[test]
    fn test_bar_count() {
        let gen = Postnet::new();
        let symbol = gen.encode("12345").unwrap();
        let bars = symbol.events.filter(SymbolEvent::is_bar).count();
        // 2 frame bars + 6 digits (incl. check) * 5
        assert_eq!(bars, 2 + 6 * 5);
    }
}
